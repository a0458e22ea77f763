use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;

use crate::analyzer::ParseOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default)]
    pub parse: ParseOptions,

    /// Retry a failed strict parse with the lenient parser.
    #[serde(default = "default_true")]
    pub lenient_fallback: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            lenient_fallback: default_true(),
        }
    }
}

impl ConvertConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        from_file(path)
    }
}

pub fn from_file<T: for<'de> Deserialize<'de>, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

pub fn from_str<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, ConfigError> {
    let config = serde_json::from_str(s)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: ConvertConfig = from_str("{}").unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert!(config.lenient_fallback);
        assert!(config.parse.allow_return_outside_function);
    }

    #[test]
    fn test_partial_parse_options() {
        let config: ConvertConfig = from_str(
            r#"{ "parse": { "allow_import_export_everywhere": false }, "lenient_fallback": false }"#,
        )
        .unwrap();
        assert!(!config.lenient_fallback);
        assert!(!config.parse.allow_import_export_everywhere);
        assert!(config.parse.allow_await_outside_function);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "lenient_fallback": false }}"#).unwrap();
        let config = ConvertConfig::from_file(file.path()).unwrap();
        assert!(!config.lenient_fallback);

        assert!(matches!(
            ConvertConfig::from_file("/nonexistent/shapeprint.json"),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            from_str::<ConvertConfig>("{"),
            Err(ConfigError::Parse(_))
        ));
    }
}
