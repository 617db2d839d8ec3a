use super::{
    creation::CreatorConfig, evaluation::EvaluationConfig, grammar::GrammarConfig,
    traits::ConfigSection,
};
use crate::error::{Result, TreegpError};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment overrides, e.g. `TREEGP__CREATOR__MAX_DEPTH=8`
pub const ENV_PREFIX: &str = "TREEGP";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub creator: CreatorConfig,
    pub grammar: GrammarConfig,
    pub evaluation: EvaluationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.creator.validate()?;
        self.grammar.validate()?;
        self.evaluation.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Loads a TOML or JSON file (by extension), applies environment
    /// overrides and validates the result before replacing the current
    /// configuration.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TreegpError::Configuration(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let settings = Config::builder()
            .add_source(File::from(path))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());

        *self.write()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config = self.get()?;

        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::to_string_pretty(&config)?,
            _ => toml::to_string_pretty(&config)
                .map_err(|e| TreegpError::Configuration(format!("Failed to serialize: {}", e)))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| TreegpError::Configuration("Config lock poisoned".to_string()))
    }

    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut updated = self.get()?;
        f(&mut updated);
        updated.validate()?;
        *self.write()? = updated;
        Ok(())
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>> {
        self.config
            .write()
            .map_err(|_| TreegpError::Configuration("Config lock poisoned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreatorKind;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("treegp_manager_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_partial_file_and_env_override() {
        let path = temp_path("partial.toml");
        std::fs::write(
            &path,
            "[creator]\nkind = \"probabilistic\"\nmax_length = 30\n\n[evaluation]\ntarget = \"z\"\n",
        )
        .unwrap();

        std::env::set_var("TREEGP__CREATOR__MAX_DEPTH", "7");
        let manager = ConfigManager::new();
        let loaded = manager.load_from_file(&path);
        std::env::remove_var("TREEGP__CREATOR__MAX_DEPTH");
        loaded.unwrap();

        let config = manager.get().unwrap();
        assert_eq!(config.creator.kind, CreatorKind::Probabilistic);
        assert_eq!(config.creator.max_length, 30);
        assert_eq!(config.creator.max_depth, 7);
        assert_eq!(config.evaluation.target, "z");
        assert_eq!(config.grammar, GrammarConfig::default());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_update_rejects_invalid() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.creator.max_depth = 0);
        assert!(result.is_err());
        assert_eq!(manager.get().unwrap().creator.max_depth, 10);
    }

    #[test]
    fn test_missing_file() {
        let manager = ConfigManager::new();
        assert!(manager.load_from_file(temp_path("missing.toml")).is_err());
    }
}
