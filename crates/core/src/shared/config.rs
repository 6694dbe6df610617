use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_SERVER_BASE_URL, MIN_DETECTION_INTERVAL_MS,
    PROCESS_FACES_PATH,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Startup configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub server_base_url: String,
    pub forward_results: bool,
    pub min_detection_interval_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            server_base_url: DEFAULT_SERVER_BASE_URL.to_string(),
            forward_results: true,
            min_detection_interval_ms: MIN_DETECTION_INTERVAL_MS,
        }
    }
}

impl ViewerConfig {
    /// Platform config location, e.g. `~/.config/FaceWatch/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads from the platform location, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        Self::default_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Loads from an explicit path. Unlike [`ViewerConfig::load`], problems
    /// are reported.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Resolves the forwarding endpoint `{server_base_url}/process_faces`.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let base = self.server_base_url.trim().trim_end_matches('/');
        let raw = format!("{base}/{PROCESS_FACES_PATH}");
        let url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
            url: self.server_base_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: self.server_base_url.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Ok(url)
    }

    pub fn min_detection_interval(&self) -> Duration {
        Duration::from_millis(self.min_detection_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.server_base_url, "http://127.0.0.1:5000");
        assert!(config.forward_results);
        assert_eq!(config.min_detection_interval(), Duration::from_millis(300));
    }

    #[rstest]
    #[case::plain("http://192.168.1.20:5000", "http://192.168.1.20:5000/process_faces")]
    #[case::trailing_slash("http://192.168.1.20:5000/", "http://192.168.1.20:5000/process_faces")]
    #[case::with_prefix("https://faces.example.com/api", "https://faces.example.com/api/process_faces")]
    fn test_endpoint(#[case] base: &str, #[case] expected: &str) {
        let config = ViewerConfig {
            server_base_url: base.to_string(),
            ..ViewerConfig::default()
        };
        assert_eq!(config.endpoint().unwrap().as_str(), expected);
    }

    #[rstest]
    #[case::garbage("not a url")]
    #[case::wrong_scheme("ftp://example.com")]
    #[case::empty("")]
    fn test_invalid_endpoint(#[case] base: &str) {
        let config = ViewerConfig {
            server_base_url: base.to_string(),
            ..ViewerConfig::default()
        };
        assert!(matches!(
            config.endpoint(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_load_from_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{"server_base_url":"http://10.0.0.2:8000"}"#).unwrap();

        let config = ViewerConfig::load_from(&path).unwrap();
        assert_eq!(config.server_base_url, "http://10.0.0.2:8000");
        assert!(config.forward_results);
        assert_eq!(config.min_detection_interval_ms, 300);
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        let result = ViewerConfig::load_from(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_from_malformed_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            ViewerConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_default_path_names_app_dir() {
        if let Some(path) = ViewerConfig::default_path() {
            let s = path.to_string_lossy();
            assert!(s.contains("FaceWatch"));
            assert!(s.ends_with("config.json"));
        }
    }
}
