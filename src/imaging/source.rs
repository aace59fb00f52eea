use crate::error::ViewerError;

// ---------------------------------------------------------------------------
// ImageSource – where image bytes come from
// ---------------------------------------------------------------------------

/// Retrieves the raw bytes behind a URL.
pub trait ImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ViewerError>;
}

/// Plain blocking HTTP GET.
///
/// The call runs on the UI thread, so the window stalls for the duration of
/// the request. The display only changes once the body has been fully
/// received and decoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSource;

impl ImageSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ViewerError> {
        let request = ehttp::Request::get(url);
        let response = ehttp::fetch_blocking(&request).map_err(|reason| ViewerError::Fetch {
            url: url.to_owned(),
            reason,
        })?;

        if !response.ok {
            return Err(ViewerError::Fetch {
                url: url.to_owned(),
                reason: format!("HTTP {} {}", response.status, response.status_text),
            });
        }

        log::debug!("Fetched {} bytes from {url}", response.bytes.len());
        Ok(response.bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::thread;

    use super::*;

    /// Answer a single request on a local port with `response`, returning
    /// the URL to fetch.
    fn serve_once(response: Vec<u8>) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/latest.jpg", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            read_request_head(&mut stream);
            stream.write_all(&response).unwrap();
        });
        (url, handle)
    }

    fn read_request_head(stream: &mut TcpStream) {
        let mut head = Vec::new();
        let mut byte = [0u8; 1];
        while !head.ends_with(b"\r\n\r\n") {
            match stream.read(&mut byte) {
                Ok(0) | Err(_) => break,
                Ok(_) => head.push(byte[0]),
            }
        }
    }

    fn http_response(status: &str, body: &[u8]) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        )
        .into_bytes();
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn returns_body_on_success() {
        let (url, server) = serve_once(http_response("200 OK", b"jpeg bytes"));
        let bytes = HttpSource.fetch(&url).unwrap();
        server.join().unwrap();
        assert_eq!(bytes, b"jpeg bytes");
    }

    #[test]
    fn non_success_status_is_a_fetch_error() {
        let (url, server) = serve_once(http_response("404 Not Found", b"gone"));
        let err = HttpSource.fetch(&url).unwrap_err();
        server.join().unwrap();
        match err {
            ViewerError::Fetch { url: failed, reason } => {
                assert_eq!(failed, url);
                assert!(reason.contains("404"), "{reason}");
            }
            other => panic!("expected a fetch error, got {other:?}"),
        }
    }

    #[test]
    fn closed_port_is_a_fetch_error() {
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        // The listener is dropped, so nothing accepts on this port.
        let url = format!("http://{addr}/latest.jpg");
        let err = HttpSource.fetch(&url).unwrap_err();
        assert!(
            matches!(err, ViewerError::Fetch { ref reason, .. } if !reason.is_empty()),
            "{err:?}"
        );
    }
}
