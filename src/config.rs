use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::github::client::DEFAULT_API_URL;

/// Config file looked up in the working directory when `--config` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = ".pr-size.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "unsupported event type {0:?} is specified: event types other than \"pull_request\" are not supported"
    )]
    UnsupportedEvent(String),

    #[error("mandatory environment variable GITHUB_EVENT_PATH is not specified")]
    MissingEventPath,

    #[error("unable to read an event file at {path:?}: {source}")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse the event payload: {0}")]
    EventParse(#[from] serde_json::Error),

    #[error("Invalid PR URL: {0}")]
    InvalidPrUrl(String),
}

/// Top-level configuration.
///
/// Every field is optional in the file; inside a workflow run the runner's
/// environment supplies whatever the file leaves out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    /// The event that triggered the run
    #[serde(default)]
    pub event: EventConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,

    /// API base URL, for GitHub Enterprise Server. Falls back to GITHUB_API_URL.
    pub api_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventConfig {
    /// Event kind (GITHUB_EVENT_NAME)
    pub name: Option<String>,

    /// Path to the webhook payload (GITHUB_EVENT_PATH)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// File the Markdown job summary is appended to (GITHUB_STEP_SUMMARY)
    pub summary_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, or from .pr-size.toml in the current
    /// directory when no path is given, then fill unset fields from the
    /// environment.
    ///
    /// An explicitly named file must exist; the default one may be absent.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load_from(default)?
                } else {
                    Config::default()
                }
            }
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Fill every field the file left unset from the runner environment.
    /// Empty variables count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if self.github.token.is_none() {
            self.github.token = var("GITHUB_TOKEN");
        }
        if self.github.api_url.is_none() {
            self.github.api_url = var("GITHUB_API_URL");
        }
        if self.event.name.is_none() {
            self.event.name = var("GITHUB_EVENT_NAME");
        }
        if self.event.path.is_none() {
            self.event.path = var("GITHUB_EVENT_PATH").map(PathBuf::from);
        }
        if self.report.summary_path.is_none() {
            self.report.summary_path = var("GITHUB_STEP_SUMMARY").map(PathBuf::from);
        }
    }

    /// Token for authenticated requests. An empty token means unauthenticated.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone().filter(|token| !token.is_empty())
    }

    pub fn api_url(&self) -> &str {
        self.github.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github_token().is_none());
        assert_eq!(config.api_url(), "https://api.github.com");
        assert!(config.event.name.is_none());
        assert!(config.report.summary_path.is_none());
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[github]
api_url = "https://ghe.example.com/api/v3"

[event]
name = "pull_request"
path = "/tmp/event.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(config.event.name.as_deref(), Some("pull_request"));
        assert_eq!(config.event.path, Some(PathBuf::from("/tmp/event.json")));
    }

    #[test]
    fn test_env_fills_unset_fields() {
        let mut config = Config::default();
        config.apply_env(env(&[
            ("GITHUB_TOKEN", "s3cret"),
            ("GITHUB_EVENT_NAME", "pull_request"),
            ("GITHUB_EVENT_PATH", "/github/workflow/event.json"),
            ("GITHUB_STEP_SUMMARY", "/github/summary.md"),
        ]));
        assert_eq!(config.github_token().as_deref(), Some("s3cret"));
        assert_eq!(config.event.name.as_deref(), Some("pull_request"));
        assert_eq!(
            config.event.path,
            Some(PathBuf::from("/github/workflow/event.json"))
        );
        assert_eq!(
            config.report.summary_path,
            Some(PathBuf::from("/github/summary.md"))
        );
    }

    #[test]
    fn test_file_values_take_precedence_over_env() {
        let mut config: Config = toml::from_str("[github]\ntoken = \"from-file\"\n").unwrap();
        config.apply_env(env(&[("GITHUB_TOKEN", "from-env")]));
        assert_eq!(config.github_token().as_deref(), Some("from-file"));
    }

    #[test]
    fn test_empty_env_is_unset() {
        let mut config = Config::default();
        config.apply_env(env(&[("GITHUB_TOKEN", ""), ("GITHUB_EVENT_PATH", "")]));
        assert!(config.github_token().is_none());
        assert!(config.event.path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr-size.toml");
        fs::write(&path, "[report]\nsummary_path = \"summary.md\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.report.summary_path, Some(PathBuf::from("summary.md")));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = Config::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead(_)));
    }
}
