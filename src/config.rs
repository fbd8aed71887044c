use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::catalog::CategoryId;
use crate::error::AppError;

pub const DEFAULT_CONFIG_FILE: &str = "ecosort.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub session: SessionSettings,
    pub gui: GuiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Label shown in the header and the local guidelines note.
    pub location: String,
    pub classification_delay_ms: u64,
    /// Categories offered as demo buttons, in display order.
    pub demo_categories: Vec<CategoryId>,
    pub demo_asset_dir: PathBuf,
    /// Fixed seed for the simulated classifier; random when absent.
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session: SessionSettings::default(),
            gui: GuiSettings {
                title: "EcoSort AI".to_string(),
                width: 1024.0,
                height: 900.0,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            location: "Portland, OR 97201".to_string(),
            classification_delay_ms: 1500,
            demo_categories: vec![CategoryId::Plastic, CategoryId::Cardboard, CategoryId::Glass],
            demo_asset_dir: PathBuf::from("assets"),
            rng_seed: None,
        }
    }
}

impl SessionSettings {
    pub fn classification_delay(&self) -> Duration {
        Duration::from_millis(self.classification_delay_ms)
    }

    pub fn demo_asset_path(&self, category: CategoryId) -> PathBuf {
        self.demo_asset_dir.join(format!("demo-{}.jpg", category.key()))
    }
}

impl Settings {
    /// Layers defaults, the config file and `ECOSORT__*` environment variables.
    ///
    /// An explicit `path` must exist; otherwise `ecosort.toml` in the working
    /// directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("ECOSORT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("session.demo_categories")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.demo_categories.is_empty() {
            return Err(AppError::InvalidSettings(
                "At least one demo category must be configured".to_string(),
            ));
        }

        if self.gui.width <= 0.0 || self.gui.height <= 0.0 {
            return Err(AppError::InvalidSettings(
                "Window size must be greater than 0".to_string(),
            ));
        }

        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<Level, AppError> {
        Level::from_str(&self.logging.level).map_err(|_| {
            AppError::InvalidSettings(format!("Unknown log level: {}", self.logging.level))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Mutex, MutexGuard};

    use super::*;
    use uuid::Uuid;

    // `load` reads the process environment, so tests that call it take turns.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ecosort-{}.toml", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_match_the_demo() {
        let settings = Settings::default();
        assert_eq!(settings.session.location, "Portland, OR 97201");
        assert_eq!(
            settings.session.classification_delay(),
            Duration::from_millis(1500)
        );
        assert_eq!(
            settings.session.demo_categories,
            vec![CategoryId::Plastic, CategoryId::Cardboard, CategoryId::Glass]
        );
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn demo_assets_are_named_by_key() {
        let settings = SessionSettings::default();
        assert_eq!(
            settings.demo_asset_path(CategoryId::Glass),
            PathBuf::from("assets").join("demo-glass.jpg")
        );
    }

    #[test]
    fn rejects_empty_demo_list() {
        let mut settings = Settings::default();
        settings.session.demo_categories.clear();
        assert!(matches!(
            settings.validate(),
            Err(AppError::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "chatty".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn file_overrides_defaults() {
        let _env = env_lock();
        let path = write_config(
            r#"
[session]
location = "New York, NY"
classification_delay_ms = 250
demo_categories = ["metal", "organic"]
rng_seed = 7

[logging]
level = "debug"
"#,
        );

        let settings = Settings::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.session.location, "New York, NY");
        assert_eq!(settings.session.classification_delay_ms, 250);
        assert_eq!(
            settings.session.demo_categories,
            vec![CategoryId::Metal, CategoryId::Organic]
        );
        assert_eq!(settings.session.rng_seed, Some(7));
        assert_eq!(settings.log_level().unwrap(), Level::DEBUG);
        assert_eq!(settings.gui.title, "EcoSort AI");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let _env = env_lock();
        let path = std::env::temp_dir().join(format!("ecosort-missing-{}.toml", Uuid::new_v4()));
        assert!(matches!(
            Settings::load(Some(&path)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn environment_overrides_file_and_defaults() {
        let _env = env_lock();
        let path = write_config(
            r#"
[session]
classification_delay_ms = 250
demo_categories = ["glass"]
"#,
        );

        std::env::set_var("ECOSORT__SESSION__CLASSIFICATION_DELAY_MS", "750");
        std::env::set_var("ECOSORT__SESSION__DEMO_CATEGORIES", "organic,metal");
        let loaded = Settings::load(Some(&path));
        std::env::remove_var("ECOSORT__SESSION__CLASSIFICATION_DELAY_MS");
        std::env::remove_var("ECOSORT__SESSION__DEMO_CATEGORIES");
        std::fs::remove_file(&path).unwrap();

        let settings = loaded.unwrap();
        assert_eq!(
            settings.session.classification_delay(),
            Duration::from_millis(750)
        );
        assert_eq!(
            settings.session.demo_categories,
            vec![CategoryId::Organic, CategoryId::Metal]
        );
        assert_eq!(settings.session.location, "Portland, OR 97201");
    }
}
