//! Recipe image storage
//!
//! Images arrive as `data:image/<ext>;base64,<payload>` URIs and are written
//! under the upload directory as `recipes/<uuid>.<ext>`.

mod image;

pub use image::{decode_data_uri, DecodedImage, ImageStorage, ALLOWED_IMAGE_EXTENSIONS};
