// src/chatbot/greeting.rs
//! Greeting collaborator. Only the opening message of a session comes from
//! here; every other turn is templated.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use super::questions::GREETING;

pub trait GreetingModel: Send + Sync {
    fn greeting(&self) -> String;
}

/// Greeting model backed by the fixed template.
#[derive(Debug, Clone)]
pub struct StaticGreeting {
    cache_dir: PathBuf,
}

impl StaticGreeting {
    /// Prepare the model cache directory. Failure here is fatal: no session
    /// can start without a greeting model.
    pub fn load(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir).with_context(|| {
            format!(
                "Failed to initialize model cache directory: {}",
                cache_dir.display()
            )
        })?;

        info!("Greeting model ready (cache: {})", cache_dir.display());

        Ok(Self {
            cache_dir: cache_dir.to_path_buf(),
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }
}

impl GreetingModel for StaticGreeting {
    fn greeting(&self) -> String {
        GREETING.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_cache_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let cache = tmp.path().join("model_cache");

        let model = StaticGreeting::load(&cache).unwrap();
        assert!(cache.is_dir());
        assert_eq!(model.cache_dir(), cache.as_path());
        assert!(model.greeting().starts_with("Hello! I'm the TalentScout Hiring Assistant."));
    }

    #[test]
    fn test_load_fails_when_cache_path_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("not_a_dir");
        std::fs::write(&blocker, "x").unwrap();

        assert!(StaticGreeting::load(&blocker.join("cache")).is_err());
    }
}
