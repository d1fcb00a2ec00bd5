use std::io::{self, Write};
use std::path::Path;

use datauri::{DataUri, MimeRule};
use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::ConvertError;
use crate::fs_utils::{collect_candidate_files, folder_exists, read_image_bytes, write_results_json};
use crate::models::{ConversionReport, ConvertConfig, ConvertOutcome, ReportStyle};

const PREVIEW_CHARS: usize = 100;

pub fn missing_folder_message(dir: &Path) -> String {
    format!("Error: Folder '{}' not found!", dir.display())
}

/// `Data URI preview: ` followed by the first 100 characters and `...`.
pub fn data_uri_preview(uri: &str) -> String {
    let head: String = uri.chars().take(PREVIEW_CHARS).collect();
    format!("Data URI preview: {head}...")
}

fn say<W: Write>(out: &mut W, line: impl std::fmt::Display) -> Result<(), ConvertError> {
    writeln!(out, "{line}").map_err(ConvertError::Console)
}

/// Reads `path` and renders it as `data:<mime>;base64,<bytes>`.
pub async fn encode_image_file(path: &Path, rule: MimeRule) -> Result<String, ConvertError> {
    let bytes = read_image_bytes(path).await?;
    let mime_type = rule.resolve_path(path);
    debug!(path = %path.display(), mime_type, size = bytes.len(), "encoded image");

    Ok(DataUri::encode(mime_type, &bytes).to_string())
}

/// Encodes one image with the full MIME table and prints a preview of the URI.
pub async fn preview_image_file<W: Write>(
    path: &Path,
    out: &mut W,
) -> Result<ConvertOutcome, ConvertError> {
    let data_uri = encode_image_file(path, MimeRule::Table).await?;
    say(out, data_uri_preview(&data_uri))?;

    Ok(ConvertOutcome::Encoded {
        path: path.to_path_buf(),
        data_uri,
    })
}

/// [`convert_folder_to`] printing on stdout.
pub async fn convert_folder(config: &ConvertConfig) -> Result<ConvertOutcome, ConvertError> {
    convert_folder_to(config, &mut io::stdout()).await
}

/// Converts every matching image in `config.source_dir` and writes the table.
///
/// With `check_source` a missing folder is reported on `out` and yields
/// [`ConvertOutcome::FolderMissing`] without writing anything. Without it the
/// listing error is returned.
pub async fn convert_folder_to<W: Write>(
    config: &ConvertConfig,
    out: &mut W,
) -> Result<ConvertOutcome, ConvertError> {
    let source_dir = config.source_dir.as_path();

    if config.check_source && !folder_exists(source_dir).await? {
        say(out, missing_folder_message(source_dir))?;
        return Ok(ConvertOutcome::FolderMissing(source_dir.to_path_buf()));
    }

    let extensions = config.normalized_extensions();
    let entries = collect_candidate_files(source_dir, &extensions).await?;
    info!(
        folder = %source_dir.display(),
        candidates = entries.len(),
        "scanning folder"
    );

    let mut images = IndexMap::with_capacity(entries.len());
    for entry in entries {
        if config.report == ReportStyle::Progress {
            say(out, format_args!("Converting: {}", entry.file_name))?;
        }

        let uri = encode_image_file(&entry.path, config.mime_rule).await?;

        if config.report == ReportStyle::Completion {
            say(out, format_args!("Converted: {}", entry.file_name))?;
        }
        images.insert(entry.file_name, uri);
    }

    let output_path = config.output_path();
    write_results_json(&output_path, &images).await?;

    match config.report {
        ReportStyle::Progress => {
            say(out, format_args!("\n✓ Converted {} images", images.len()))?;
            say(out, format_args!("✓ Results saved to: {}", output_path.display()))?;
            say(out, "\nYou can now copy the data URIs from the JSON file!")?;
        }
        ReportStyle::Completion => {
            say(out, format_args!("\nDone! Saved to {}", output_path.display()))?;
        }
    }
    info!(output = %output_path.display(), count = images.len(), "wrote conversion table");

    Ok(ConvertOutcome::Written(ConversionReport {
        source_dir: source_dir.to_path_buf(),
        output_path,
        images,
    }))
}

/// Runs each config in order. Missing folders are skipped, the first error
/// stops the batch.
pub async fn convert_folders<W: Write>(
    configs: &[ConvertConfig],
    out: &mut W,
) -> Result<Vec<ConvertOutcome>, ConvertError> {
    let mut outcomes = Vec::with_capacity(configs.len());
    for config in configs {
        outcomes.push(convert_folder_to(config, out).await?);
    }
    Ok(outcomes)
}
