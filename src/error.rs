use thiserror::Error;

// ---------------------------------------------------------------------------
// Viewer errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading an image.
///
/// None of these are fatal: the caller reports them and keeps showing the
/// last image that loaded successfully.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// Network failure, timeout, or a non-2xx response.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The response body is not a decodable raster image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The requested name is not in the catalog.
    #[error("unknown catalog entry: {0:?}")]
    UnknownEntry(String),
}
