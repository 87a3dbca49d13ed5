use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::checkout::CheckoutSettings;
use crate::errors::{AssessmentError, Result};
use crate::payload::DEFAULT_SOURCE;
use crate::utils::{fs::write_atomic, paths};
use crate::validation::ValidationMode;
use crate::webhook::WebhookSettings;

pub const ENV_PAYMENT_PUBLIC_KEY: &str = "ASSESSMENT_PAYMENT_PUBLIC_KEY";
pub const ENV_PRICE_WORKOUT: &str = "ASSESSMENT_PRICE_WORKOUT";
pub const ENV_PRICE_MEAL: &str = "ASSESSMENT_PRICE_MEAL";
pub const ENV_PRICE_COMBINED: &str = "ASSESSMENT_PRICE_COMBINED";
pub const ENV_MEAL_WEBHOOK_URL: &str = "ASSESSMENT_MEAL_WEBHOOK_URL";
pub const ENV_WORKOUT_WEBHOOK_URL: &str = "ASSESSMENT_WORKOUT_WEBHOOK_URL";
pub const ENV_VALIDATION_MODE: &str = "ASSESSMENT_VALIDATION_MODE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveySettings {
    pub validation_mode: ValidationMode,
    pub source: String,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::Strict,
            source: DEFAULT_SOURCE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub checkout: CheckoutSettings,
    pub webhooks: WebhookSettings,
    pub survey: SurveySettings,
}

impl AppConfig {
    /// Applies environment overrides read through `lookup`. Blank values are
    /// ignored so an exported-but-empty variable keeps the file value.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = get(ENV_PAYMENT_PUBLIC_KEY) {
            self.checkout.publishable_key = key;
        }
        if let Some(price) = get(ENV_PRICE_WORKOUT) {
            self.checkout.prices.workout = price;
        }
        if let Some(price) = get(ENV_PRICE_MEAL) {
            self.checkout.prices.meal = price;
        }
        if let Some(price) = get(ENV_PRICE_COMBINED) {
            self.checkout.prices.combined = price;
        }
        if let Some(url) = get(ENV_MEAL_WEBHOOK_URL) {
            self.webhooks.meal_plan_url = Some(url);
        }
        if let Some(url) = get(ENV_WORKOUT_WEBHOOK_URL) {
            self.webhooks.workout_plan_url = Some(url);
        }
        if let Some(mode) = get(ENV_VALIDATION_MODE) {
            self.survey.validation_mode = mode.parse().map_err(|err| {
                AssessmentError::Config(format!("{ENV_VALIDATION_MODE}: {err}"))
            })?;
        }
        Ok(())
    }

    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }
}

/// Loads and saves `config.json` under the application data directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: paths::config_file_in(&base),
        }
    }

    /// Manager for an explicit file, e.g. from `--config`.
    pub fn from_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<AppConfig> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                AssessmentError::Config(format!("{}: {err}", self.path.display()))
            })
        } else {
            Ok(AppConfig::default())
        }
    }

    /// File values (or defaults) with environment overrides applied.
    pub fn load_effective(&self) -> Result<AppConfig> {
        let mut config = self.load()?;
        config.apply_env()?;
        Ok(config)
    }

    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        let config = manager.load().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.survey.validation_mode, ValidationMode::Strict);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf());
        let mut config = AppConfig::default();
        config.survey.validation_mode = ValidationMode::Lenient;
        config.webhooks.meal_plan_url = None;
        manager.save(&config).unwrap();
        assert!(manager.path().ends_with("config/config.json"));
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"survey":{"validationMode":"lenient"}}"#).unwrap();
        let config = ConfigManager::from_path(path).load().unwrap();
        assert_eq!(config.survey.validation_mode, ValidationMode::Lenient);
        assert_eq!(config.checkout, CheckoutSettings::default());
    }

    #[test]
    fn environment_overrides_file_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_PAYMENT_PUBLIC_KEY, "pk_live_123"),
            (ENV_PRICE_MEAL, "price_meal_live"),
            (ENV_WORKOUT_WEBHOOK_URL, "http://127.0.0.1:9/workout"),
            (ENV_VALIDATION_MODE, "lenient"),
            (ENV_PRICE_WORKOUT, "   "),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|value| value.to_string()))
            .unwrap();

        assert_eq!(config.checkout.publishable_key, "pk_live_123");
        assert_eq!(config.checkout.prices.meal, "price_meal_live");
        assert_eq!(
            config.checkout.prices.workout,
            CheckoutSettings::default().prices.workout
        );
        assert_eq!(
            config.webhooks.workout_plan_url.as_deref(),
            Some("http://127.0.0.1:9/workout")
        );
        assert_eq!(config.survey.validation_mode, ValidationMode::Lenient);
    }

    #[test]
    fn invalid_mode_override_is_a_config_error() {
        let mut config = AppConfig::default();
        let result = config.apply_overrides(|key| {
            (key == ENV_VALIDATION_MODE).then(|| "sloppy".to_string())
        });
        assert!(matches!(result, Err(AssessmentError::Config(_))));
    }
}
