pub const OUTPUT_FILE_NAME: &str = "converted_images.json";
pub const DEFAULT_FOLDERS: &[&str] = &["glyphs", "examples"];
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
pub const PRIMARY_SOURCE_DIR: &str = "primary";
pub const PRIMARY_OUTPUT_PATH: &str = "examples/converted_images.json";
pub const PRIMARY_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const DEFAULT_SINGLE_IMAGE: &str = "glyphs/m_00.png";
