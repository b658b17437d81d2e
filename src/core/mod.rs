//! Image validation core: extension matching, signature detection and decoding

pub mod extension;
pub mod format;
pub mod validator;

pub use extension::{claimed_extension, extensions_match, is_image_extension, IMAGE_EXTENSIONS};
pub use format::{detect_format, ImageFormat};
pub use validator::{decode_available, validate_deep, validate_shallow, Rejection, Strictness};
