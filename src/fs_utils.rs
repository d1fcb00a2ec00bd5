use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use datauri::extension_of;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};
use tokio::fs;
use tokio::fs::try_exists;
use tracing::{debug, warn};

use crate::error::ConvertError;

/// A directory entry that passed the extension filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageEntry {
    pub file_name: String,
    pub path: PathBuf,
}

pub async fn folder_exists(dir: &Path) -> Result<bool, ConvertError> {
    try_exists(dir)
        .await
        .map_err(|source| ConvertError::CheckFolder {
            path: dir.to_path_buf(),
            source,
        })
}

pub fn has_extension(file_name: &str, extensions: &[String]) -> bool {
    extension_of(file_name).is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext))
}

/// Lists `dir` in the order the file system returns entries and keeps regular
/// files whose extension is in `extensions` (lowercase, no dot).
pub async fn collect_candidate_files(
    dir: &Path,
    extensions: &[String],
) -> Result<Vec<ImageEntry>, ConvertError> {
    let read_dir_err = |source: std::io::Error| ConvertError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_dir_err)?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_dir_err)? {
        let file_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!(name = ?raw, "skipping entry with non UTF-8 name");
                continue;
            }
        };

        if !has_extension(&file_name, extensions) {
            continue;
        }

        let path = entry.path();
        let metadata = fs::metadata(&path)
            .await
            .map_err(|source| ConvertError::ReadFile {
                path: path.clone(),
                source,
            })?;

        if !metadata.is_file() {
            debug!(path = %path.display(), "skipping non-file entry");
            continue;
        }

        candidates.push(ImageEntry { file_name, path });
    }

    Ok(candidates)
}

pub async fn read_image_bytes(path: &Path) -> Result<Vec<u8>, ConvertError> {
    fs::read(path).await.map_err(|source| ConvertError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}

/// 2-space pretty printing with every non-ASCII character written as a
/// `\uXXXX` escape, surrogate pairs above the BMP.
struct AsciiPrettyFormatter {
    inner: PrettyFormatter<'static>,
}

impl AsciiPrettyFormatter {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for AsciiPrettyFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

pub fn results_to_json(images: &IndexMap<String, String>) -> Result<String, ConvertError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, AsciiPrettyFormatter::new());
    images.serialize(&mut serializer)?;

    // The formatter only emits ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes `images` as 2-space indented ASCII JSON, replacing any existing file.
pub async fn write_results_json(
    path: &Path,
    images: &IndexMap<String, String>,
) -> Result<(), ConvertError> {
    let json = results_to_json(images)?;

    fs::write(path, json)
        .await
        .map_err(|source| ConvertError::WriteOutput {
            path: path.to_path_buf(),
            source,
        })
}
