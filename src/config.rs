// ABOUTME: Application configuration loaded from a TOML file with defaults for every key

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::SectionIdx;
use crate::panel::PanelOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Rows kept between the cursor and the window edge before scrolling.
    pub scroll_padding: usize,
    pub max_notices: usize,
    /// Automatic status refresh period; 0 disables it.
    pub refresh_interval_secs: u64,
    /// Forget per-path expansion for paths that disappear from the status.
    pub prune_expansions: bool,
    pub collapsed_sections: Vec<SectionIdx>,
    pub log_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scroll_padding: 2,
            max_notices: 5,
            refresh_interval_secs: 0,
            prune_expansions: false,
            collapsed_sections: vec![SectionIdx::Unversioned],
            log_dir: None,
            log_filter: "wc_status=info".to_string(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "wc-status")
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads `path`, or the default location when `None`. A missing default
    /// file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_path() {
                Some(path) => (path, false),
                None => return Ok(Self::default()),
            },
        };

        if !explicit && !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            Self::project_dirs().map_or_else(
                || PathBuf::from(".wc-status/logs"),
                |dirs| dirs.data_local_dir().join("logs"),
            )
        })
    }

    pub fn panel_options(&self) -> PanelOptions {
        PanelOptions {
            scroll_padding: self.scroll_padding,
            max_notices: self.max_notices,
            prune_expansions: self.prune_expansions,
            collapsed_sections: self.collapsed_sections.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_file_overrides_named_keys() {
        let config = AppConfig::parse(
            r#"
            scroll_padding = 4
            collapsed_sections = ["ignored", "unversioned"]
            prune_expansions = true
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll_padding, 4);
        assert!(config.prune_expansions);
        assert_eq!(
            config.collapsed_sections,
            vec![SectionIdx::Ignored, SectionIdx::Unversioned]
        );
        assert_eq!(config.max_notices, 5);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(AppConfig::parse(r#"collapsed_sections = ["bogus"]"#).is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_panel_options_follow_config() {
        let config = AppConfig {
            scroll_padding: 1,
            max_notices: 3,
            ..AppConfig::default()
        };
        let options = config.panel_options();
        assert_eq!(options.scroll_padding, 1);
        assert_eq!(options.max_notices, 3);
        assert_eq!(options.collapsed_sections, vec![SectionIdx::Unversioned]);
    }
}
