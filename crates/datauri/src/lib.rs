pub mod mime;
pub mod types;
pub mod utils;

pub use mime::{extension_of, MimeRule, DEFAULT_IMAGE_MIME};
pub use types::DataUri;
pub use utils::{decode_base64, encode_byte_to_base64};
