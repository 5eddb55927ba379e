// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, ScannerSettings, Settings};

/// Loads the application settings from the `config/` directory.
///
/// The environment is taken from `APP_ENVIRONMENT` and defaults to "development".
pub fn load_settings() -> Result<Settings> {
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());
    load_settings_from(Path::new("config"), &environment)
}

/// Layered configuration loading rooted at `dir`:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(dir: &Path, environment: &str) -> Result<Settings> {
    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::from(dir.join("base")))
        // 2. Load the environment-specific configuration file.
        .add_source(File::from(dir.join(environment)).required(false))
        // 3. Load settings from environment variables (e.g., `APP_SCANNER__DATA_DIR=...`).
        // The prefix is `APP`, separator is `__`.
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{StrategyStatus, StrategyType};

    const BASE: &str = r#"
[app]
environment = "development"
log_level = "info"

[scanner]
data_dir = "bars"
watchlist = ["005930", "000660"]

[[strategies]]
name = "golden-cross"
strategy_type = "MOMENTUM"
status = "ACTIVE"
parameters = { fast_period = 5, slow_period = 20, ma_type = "EMA" }
"#;

    #[test]
    fn loads_base_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let settings = load_settings_from(dir.path(), "development").unwrap();

        assert_eq!(settings.app.log_level, "info");
        assert_eq!(settings.scanner.data_dir, std::path::PathBuf::from("bars"));
        assert_eq!(settings.scanner.max_concurrency, None);
        assert_eq!(settings.scanner.watchlist, vec!["005930", "000660"]);

        let strategy = settings.strategy("golden-cross").unwrap();
        assert_eq!(strategy.strategy_type, StrategyType::Momentum);
        assert_eq!(strategy.status, StrategyStatus::Active);
        assert_eq!(strategy.parameters.get("slow_period"), Some(&serde_json::json!(20)));
        assert_eq!(strategy.parameters.get("ma_type"), Some(&serde_json::json!("EMA")));
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.toml"), BASE).unwrap();
        std::fs::write(
            dir.path().join("production.toml"),
            "[app]\nenvironment = \"production\"\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), "production").unwrap();

        assert_eq!(settings.app.environment, "production");
        assert_eq!(settings.app.log_level, "warn");
        assert_eq!(settings.strategies.len(), 1);
    }

    #[test]
    fn max_concurrency_is_read_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.toml"), BASE).unwrap();
        std::fs::write(
            dir.path().join("staging.toml"),
            "[scanner]\nmax_concurrency = 2\n",
        )
        .unwrap();

        let settings = load_settings_from(dir.path(), "staging").unwrap();
        assert_eq!(settings.scanner.max_concurrency, Some(2));
    }

    #[test]
    fn unknown_strategy_is_reported_by_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("base.toml"), BASE).unwrap();

        let settings = load_settings_from(dir.path(), "development").unwrap();
        let err = settings.strategy("nope").unwrap_err();
        assert!(matches!(err, Error::UnknownStrategy(ref name) if name == "nope"));
    }

    #[test]
    fn missing_base_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_settings_from(dir.path(), "development"),
            Err(Error::LoadError(_))
        ));
    }
}
