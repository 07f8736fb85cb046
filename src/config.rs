// src/config.rs
//! Configuration: environment selection, optional config.yaml, env overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_PORT: u16 = 8000;
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnvironmentConfig {
    pub data_path: PathBuf,
    pub candidates_file: PathBuf,
    pub model_cache_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub port: u16,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Layout used when no config.yaml is present
    pub fn defaults(base_dir: &Path) -> Self {
        let data_path = base_dir.join("data");
        Self {
            candidates_file: data_path.join("candidates.json"),
            model_cache_dir: base_dir.join("model_cache"),
            data_path,
        }
    }

    fn resolved(self, base_dir: &Path) -> Self {
        Self {
            data_path: resolve_path(base_dir, &self.data_path),
            candidates_file: resolve_path(base_dir, &self.candidates_file),
            model_cache_dir: resolve_path(base_dir, &self.model_cache_dir),
        }
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

impl ConfigManager {
    pub fn load() -> Result<Self> {
        let environment = Self::environment_name();
        info!("Loading configuration for environment: {}", environment);

        let base_dir = if environment == "production" {
            PathBuf::from("/app")
        } else {
            std::env::current_dir().context("Failed to get current directory")?
        };

        let config_path = base_dir.join(CONFIG_FILE);
        let mut env_config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            Self::from_yaml_str(&content, &environment, &base_dir)?
        } else {
            EnvironmentConfig::defaults(&base_dir)
        };

        if let Ok(cache_dir) = std::env::var("TALENTSCOUT_CACHE_DIR") {
            env_config.model_cache_dir = resolve_path(&base_dir, Path::new(&cache_dir));
        }

        let port = match std::env::var("TALENTSCOUT_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| anyhow::anyhow!("TALENTSCOUT_PORT must be a valid port number"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            environment: env_config,
            server: ServerSettings { port },
        })
    }

    fn environment_name() -> String {
        std::env::var("TALENTSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Pick the section for `environment` out of a config.yaml body
    pub fn from_yaml_str(
        content: &str,
        environment: &str,
        base_dir: &Path,
    ) -> Result<EnvironmentConfig> {
        let config_file: ConfigFile =
            serde_yaml::from_str(content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(env_config.resolved(base_dir))
    }

    pub async fn ensure_directories(&self) -> Result<()> {
        for dir in [
            &self.environment.data_path,
            &self.environment.model_cache_dir,
        ] {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        if let Some(parent) = self.environment.candidates_file.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
local:
  data_path: data
  candidates_file: data/candidates.json
  model_cache_dir: model_cache
production:
  data_path: /srv/talentscout
  candidates_file: /srv/talentscout/candidates.json
  model_cache_dir: /var/cache/talentscout
"#;

    #[test]
    fn test_local_section_resolves_relative_paths() {
        let config = ConfigManager::from_yaml_str(YAML, "local", Path::new("/work")).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/work/data"));
        assert_eq!(
            config.candidates_file,
            PathBuf::from("/work/data/candidates.json")
        );
        assert_eq!(config.model_cache_dir, PathBuf::from("/work/model_cache"));
    }

    #[test]
    fn test_production_section_keeps_absolute_paths() {
        let config =
            ConfigManager::from_yaml_str(YAML, "production", Path::new("/app")).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/srv/talentscout"));
        assert_eq!(
            config.model_cache_dir,
            PathBuf::from("/var/cache/talentscout")
        );
    }

    #[test]
    fn test_unknown_environment_falls_back_to_local() {
        let config = ConfigManager::from_yaml_str(YAML, "staging", Path::new("/work")).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/work/data"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ConfigManager::from_yaml_str("local: [", "local", Path::new("/")).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::defaults(Path::new("/work"));
        assert_eq!(
            config.candidates_file,
            PathBuf::from("/work/data/candidates.json")
        );
    }

    #[tokio::test]
    async fn test_ensure_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigManager {
            environment: EnvironmentConfig::defaults(tmp.path()),
            server: ServerSettings { port: DEFAULT_PORT },
        };

        config.ensure_directories().await.unwrap();
        assert!(tmp.path().join("data").is_dir());
        assert!(tmp.path().join("model_cache").is_dir());
    }
}
