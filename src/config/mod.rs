use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::BudgetError,
    services::budget_service::DEFAULT_ALERT_THRESHOLDS,
    utils::{ensure_dir, write_atomic, PathResolver},
};

const DEFAULT_TREND_MONTHS: u32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Percent-of-limit marks that raise a budget alert.
    #[serde(default = "default_thresholds")]
    pub alert_thresholds: Vec<f64>,
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,
    /// Overrides where books are stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_thresholds() -> Vec<f64> {
    DEFAULT_ALERT_THRESHOLDS.to_vec()
}

fn default_trend_months() -> u32 {
    DEFAULT_TREND_MONTHS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-AR".into(),
            currency: "ARS".into(),
            alert_thresholds: default_thresholds(),
            trend_months: DEFAULT_TREND_MONTHS,
            data_dir: None,
        }
    }
}

impl Config {
    /// Rejects values the services cannot work with.
    pub fn validate(&self) -> Result<(), BudgetError> {
        if let Some(bad) = self
            .alert_thresholds
            .iter()
            .find(|value| !value.is_finite() || **value <= 0.0)
        {
            return Err(BudgetError::ConfigError(format!(
                "alert threshold `{bad}` must be a positive percentage"
            )));
        }
        if self.trend_months == 0 {
            return Err(BudgetError::ConfigError(
                "trend_months must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Thresholds sorted ascending, so alerts come out in order.
    pub fn sorted_thresholds(&self) -> Vec<f64> {
        let mut thresholds = self.alert_thresholds.clone();
        thresholds.sort_by(f64::total_cmp);
        thresholds.dedup();
        thresholds
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BudgetError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Reads the stored config, falling back to defaults when none exists.
    pub fn load(&self) -> Result<Config, BudgetError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| BudgetError::ConfigError(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), BudgetError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "saved config");
        Ok(())
    }

    /// Where books live: the configured override or `<base>`.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config.data_dir.clone().unwrap_or_else(|| self.base.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.alert_thresholds, vec![80.0, 100.0]);
        assert_eq!(manager.data_dir(&config), temp.path());
    }

    #[test]
    fn save_then_load_preserves_values() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            currency: "USD".into(),
            alert_thresholds: vec![100.0, 50.0],
            trend_months: 12,
            ..Config::default()
        };
        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.sorted_thresholds(), vec![50.0, 100.0]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        let config = Config {
            trend_months: 0,
            ..Config::default()
        };
        assert!(matches!(manager.save(&config), Err(BudgetError::ConfigError(_))));

        fs::write(manager.path(), r#"{"locale":"es-AR","currency":"ARS","alert_thresholds":[-1]}"#)
            .unwrap();
        assert!(matches!(manager.load(), Err(BudgetError::ConfigError(_))));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"locale":"es-UY","currency":"UYU"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.currency, "UYU");
        assert_eq!(config.trend_months, 6);
    }
}
