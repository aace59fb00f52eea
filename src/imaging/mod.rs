/// Imaging layer: fetching and decoding remote images.
///
/// Architecture:
/// ```text
///   catalog URL
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  HTTP GET → raw bytes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  codec    │  bytes → DynamicImage → resized → egui::ColorImage
///   └──────────┘
/// ```

pub mod codec;
pub mod source;
