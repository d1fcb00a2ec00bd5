mod cli;
mod commands;
mod constants;
mod error;
mod fs_utils;
mod models;

pub use cli::{init_tracing, Cli};
pub use commands::convert::{
    convert_folder, convert_folder_to, convert_folders, data_uri_preview, encode_image_file,
    missing_folder_message, preview_image_file,
};
pub use constants::{
    DEFAULT_FOLDERS, DEFAULT_SINGLE_IMAGE, IMAGE_EXTENSIONS, OUTPUT_FILE_NAME, PRIMARY_EXTENSIONS,
    PRIMARY_OUTPUT_PATH, PRIMARY_SOURCE_DIR,
};
pub use error::ConvertError;
pub use fs_utils::{collect_candidate_files, results_to_json, write_results_json, ImageEntry};
pub use models::{
    ConversionReport, ConvertConfig, ConvertOutcome, OutputLocation, Preset, ReportStyle,
};

pub use datauri::{DataUri, MimeRule};

/// Runs every conversion the command line asks for, printing on `out`.
pub async fn run<W: std::io::Write>(
    cli: Cli,
    out: &mut W,
) -> Result<Vec<ConvertOutcome>, ConvertError> {
    if let Some(path) = &cli.single {
        return Ok(vec![preview_image_file(path, out).await?]);
    }

    let configs = cli.configs().await?;
    tracing::debug!(count = configs.len(), "resolved conversion configs");
    convert_folders(&configs, out).await
}
