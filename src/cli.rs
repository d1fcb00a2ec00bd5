use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_FOLDERS, DEFAULT_SINGLE_IMAGE};
use crate::error::ConvertError;
use crate::models::{ConvertConfig, Preset};

#[derive(Debug, Parser)]
#[command(
    name = "image-uri",
    version,
    about = "Convert a folder of images into a JSON table of base64 data URIs"
)]
pub struct Cli {
    /// Folders to scan. Defaults to `glyphs` and `examples` for the general preset.
    #[arg(value_name = "FOLDER")]
    pub folders: Vec<PathBuf>,

    /// Built-in conversion settings.
    #[arg(long, value_enum, default_value_t = Preset::General)]
    pub preset: Preset,

    /// Encode one image and print a preview of its data URI instead of
    /// converting folders. Without a value, `glyphs/m_00.png`.
    #[arg(
        long,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = DEFAULT_SINGLE_IMAGE,
        conflicts_with_all = ["folders", "preset", "config"]
    )]
    pub single: Option<PathBuf>,

    /// JSON file describing a single conversion.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["folders", "preset"])]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolves the arguments into the configs to run, in order.
    pub async fn configs(&self) -> Result<Vec<ConvertConfig>, ConvertError> {
        if let Some(path) = &self.config {
            return Ok(vec![ConvertConfig::load(path).await?]);
        }

        if self.folders.is_empty() {
            return Ok(match self.preset {
                Preset::General => DEFAULT_FOLDERS
                    .iter()
                    .map(|folder| ConvertConfig::general(*folder))
                    .collect(),
                Preset::Primary => vec![ConvertConfig::primary(None)],
            });
        }

        Ok(self
            .folders
            .iter()
            .map(|folder| self.preset.config_for(folder.clone()))
            .collect())
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Diagnostics go to stderr so stdout carries only conversion progress.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
