//! Extension to MIME resolution.
//!
//! Resolution only ever looks at the file name. Unknown extensions resolve to
//! [`DEFAULT_IMAGE_MIME`] instead of failing.

use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// How an extension is mapped to a MIME type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MimeRule {
    /// `png`, `jpg`/`jpeg`, `gif` and `webp`.
    #[default]
    Table,
    /// `jpg` is `image/jpeg`, everything else is `image/png`, `jpeg` included.
    JpgOrPng,
    /// Whatever `mime_guess` reports, as long as it is an `image/*` type.
    Guess,
}

impl MimeRule {
    pub fn resolve(self, extension: &str) -> &'static str {
        let ext = extension.trim_start_matches('.').to_lowercase();
        match self {
            MimeRule::Table => match ext.as_str() {
                "png" => "image/png",
                "jpg" | "jpeg" => "image/jpeg",
                "gif" => "image/gif",
                "webp" => "image/webp",
                _ => DEFAULT_IMAGE_MIME,
            },
            MimeRule::JpgOrPng => {
                if ext == "jpg" {
                    "image/jpeg"
                } else {
                    DEFAULT_IMAGE_MIME
                }
            }
            MimeRule::Guess => mime_guess::from_ext(&ext)
                .iter_raw()
                .find(|candidate| candidate.starts_with("image/"))
                .unwrap_or(DEFAULT_IMAGE_MIME),
        }
    }

    pub fn resolve_path<P: AsRef<Path>>(self, path: P) -> &'static str {
        match path.as_ref().file_name().and_then(|name| name.to_str()) {
            Some(name) => extension_of(name)
                .map(|ext| self.resolve(&ext))
                .unwrap_or(DEFAULT_IMAGE_MIME),
            None => DEFAULT_IMAGE_MIME,
        }
    }
}

/// Lowercased extension of `name` without the leading dot.
///
/// `.png` on its own is a hidden file with no extension, same as
/// [`Path::extension`].
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_lowercase())
}
