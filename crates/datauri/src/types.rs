use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::utils::{decode_base64, encode_byte_to_base64};

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A `data:<mime>;base64,<payload>` string, kept in its two parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    base64: String,
}

impl DataUri {
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        DataUri {
            mime_type: mime_type.into(),
            base64: encode_byte_to_base64(bytes),
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let Some(rest) = text.strip_prefix(SCHEME) else {
            bail!("Data URI must start with '{SCHEME}'");
        };
        let Some((mime_type, base64)) = rest.split_once(BASE64_MARKER) else {
            bail!("Data URI is missing the '{BASE64_MARKER}' marker");
        };
        if mime_type.is_empty() {
            bail!("Data URI has an empty MIME type");
        }

        decode_base64(base64).context("Data URI payload is not valid base64")?;

        Ok(DataUri {
            mime_type: mime_type.to_string(),
            base64: base64.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn base64(&self) -> &str {
        &self.base64
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        decode_base64(&self.base64)
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}{BASE64_MARKER}{}", self.mime_type, self.base64)
    }
}

impl FromStr for DataUri {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        DataUri::parse(s)
    }
}
