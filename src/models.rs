use std::path::{Path, PathBuf};

use clap::ValueEnum;
use datauri::MimeRule;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::constants::{
    IMAGE_EXTENSIONS, OUTPUT_FILE_NAME, PRIMARY_EXTENSIONS, PRIMARY_OUTPUT_PATH,
    PRIMARY_SOURCE_DIR,
};
use crate::error::ConvertError;

/// Where the JSON table is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputLocation {
    /// `converted_images.json` inside the scanned folder.
    InSource,
    Path(PathBuf),
}

/// Console lines printed while converting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportStyle {
    /// `Converting: <name>` per file, `✓ Converted N images` at the end.
    #[default]
    Progress,
    /// `Converted: <name>` per file, `Done! Saved to <path>` at the end.
    Completion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertConfig {
    pub source_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output: OutputLocation,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub mime_rule: MimeRule,
    #[serde(default = "default_check_source")]
    pub check_source: bool,
    #[serde(default)]
    pub report: ReportStyle,
}

fn default_output() -> OutputLocation {
    OutputLocation::InSource
}

fn default_extensions() -> Vec<String> {
    IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

fn default_check_source() -> bool {
    true
}

impl ConvertConfig {
    /// Checked scan of `source_dir` with the full MIME table, writing next to
    /// the images.
    pub fn general(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output: default_output(),
            extensions: default_extensions(),
            mime_rule: MimeRule::Table,
            check_source: true,
            report: ReportStyle::Progress,
        }
    }

    /// Unchecked scan restricted to png/jpg/jpeg with the two-way MIME rule,
    /// writing to `examples/converted_images.json`.
    pub fn primary(source_dir: Option<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.unwrap_or_else(|| PathBuf::from(PRIMARY_SOURCE_DIR)),
            output: OutputLocation::Path(PathBuf::from(PRIMARY_OUTPUT_PATH)),
            extensions: PRIMARY_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            mime_rule: MimeRule::JpgOrPng,
            check_source: false,
            report: ReportStyle::Completion,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            OutputLocation::InSource => self.source_dir.join(OUTPUT_FILE_NAME),
            OutputLocation::Path(path) => path.clone(),
        }
    }

    /// Extensions lowercased with any leading dot removed.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    pub async fn load(path: &Path) -> Result<Self, ConvertError> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|err| ConvertError::Config {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        serde_json::from_str(&contents).map_err(|err| ConvertError::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Built-in configurations selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    #[default]
    General,
    Primary,
}

impl Preset {
    pub fn config_for(self, source_dir: PathBuf) -> ConvertConfig {
        match self {
            Preset::General => ConvertConfig::general(source_dir),
            Preset::Primary => ConvertConfig::primary(Some(source_dir)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    pub source_dir: PathBuf,
    pub output_path: PathBuf,
    /// File name to data URI, in directory listing order.
    pub images: IndexMap<String, String>,
}

impl ConversionReport {
    pub fn count(&self) -> usize {
        self.images.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConvertOutcome {
    Written(ConversionReport),
    FolderMissing(PathBuf),
    /// A single image encoded without writing a table.
    Encoded { path: PathBuf, data_uri: String },
}
