//! # Hub Configuration
//!
//! Optional TOML file. A missing file means defaults; a file that exists but
//! cannot be read or parsed is a startup error.
//!
//! ```toml
//! [upstream]
//! url = "https://www.ccxp.nthu.edu.tw/ccxp/INQUIRE/JH/OPENDATA/open_course_data.json"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::feed::DEFAULT_COURSE_DATA_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_upstream_url")]
    pub url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
        }
    }
}

fn default_upstream_url() -> String {
    DEFAULT_COURSE_DATA_URL.to_string()
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load(&dir.path().join("cq-hub.toml")).unwrap();
        assert_eq!(config.upstream.url, DEFAULT_COURSE_DATA_URL);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.upstream.url, DEFAULT_COURSE_DATA_URL);
    }

    #[test]
    fn test_upstream_url_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upstream]\nurl = \"http://localhost:9000/courses.json\"").unwrap();

        let config = load(file.path()).unwrap();
        assert_eq!(config.upstream.url, "http://localhost:9000/courses.json");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[upstream\nurl = 3").unwrap();

        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
