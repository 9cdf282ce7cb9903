use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Delimiter
// ---------------------------------------------------------------------------

/// Field separator used when reading benchmark CSV files.
///
/// In JSON it is written either as `"auto"` or as a single ASCII character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Delimiter {
    /// `;` if the header line contains one, `,` otherwise.
    #[default]
    Auto,
    Fixed(u8),
}

impl Delimiter {
    /// Resolve the delimiter for a file whose first line is `header`.
    pub fn resolve(self, header: &[u8]) -> u8 {
        match self {
            Delimiter::Fixed(b) => b,
            Delimiter::Auto if header.contains(&b';') => b';',
            Delimiter::Auto => b',',
        }
    }
}

impl TryFrom<String> for Delimiter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Delimiter::Auto);
        }
        match s.as_bytes() {
            [b] if b.is_ascii() => Ok(Delimiter::Fixed(*b)),
            _ => Err(format!("delimiter must be \"auto\" or one ASCII character, got {s:?}")),
        }
    }
}

impl From<Delimiter> for String {
    fn from(d: Delimiter) -> Self {
        d.to_string()
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Auto => write!(f, "auto"),
            Delimiter::Fixed(b) => write!(f, "{}", *b as char),
        }
    }
}

// ---------------------------------------------------------------------------
// LoaderConfig
// ---------------------------------------------------------------------------

/// Knobs for [`load_dir`](crate::data::loader::load_dir).
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub delimiter: Delimiter,
    /// `<kind>` token marking retrieval measurements.
    pub retrieval_kind: String,
    /// Column that receives the averaged retrieval time.
    pub retrieval_column: String,
    /// Column that receives the originating table name.
    pub source_column: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Auto,
            retrieval_kind: "retr".to_string(),
            retrieval_column: "retrieval_ns".to_string(),
            source_column: "source".to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config: LoaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(config.retrieval_kind, "retr");
    }

    #[test]
    fn delimiter_from_json() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{"delimiter": ",", "source_column": "table"}"#).unwrap();
        assert_eq!(config.delimiter, Delimiter::Fixed(b','));
        assert_eq!(config.source_column, "table");
        assert_eq!(config.retrieval_column, "retrieval_ns");

        let err = serde_json::from_str::<LoaderConfig>(r#"{"delimiter": ";;"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn auto_delimiter_sniffs_header() {
        assert_eq!(Delimiter::Auto.resolve(b"cells;bytes"), b';');
        assert_eq!(Delimiter::Auto.resolve(b"cells,bytes"), b',');
        assert_eq!(Delimiter::Fixed(b'\t').resolve(b"a;b"), b'\t');
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoaderConfig::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
