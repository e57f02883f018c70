use std::path::Path;
use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;

use crate::core::state::ModalTiming;
use crate::utils;

const CONFIG: &str = include_str!("../../.config/config.json5");

/// Milliseconds as a `config` default value, which only stores signed integers
fn default_millis(key: &str, ms: u64) -> Result<i64, ConfigError> {
    i64::try_from(ms).map_err(|_| ConfigError::Message(format!("{key} out of range: {ms}")))
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ModalConfig {
    #[serde(default = "ModalConfig::default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    #[serde(default)]
    pub reveal_delay_ms: u64,
}

impl ModalConfig {
    fn default_settle_delay_ms() -> u64 {
        ModalTiming::DEFAULT_SETTLE_DELAY.as_millis() as u64
    }

    pub fn timing(&self) -> ModalTiming {
        ModalTiming {
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: Self::default_settle_delay_ms(),
            reveal_delay_ms: 0,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub modal: ModalConfig,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_from(&utils::get_config_dir())
    }

    /// Layers embedded defaults, optional files in `config_dir` and
    /// `REPLYSHEET_*` environment variables, in that order.
    pub fn load_from(config_dir: &Path) -> Result<Self, ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| ConfigError::Message(format!("Failed to load default config: {e}")))?;

        let defaults = [
            ("modal.settle_delay_ms", default_config.modal.settle_delay_ms),
            ("modal.reveal_delay_ms", default_config.modal.reveal_delay_ms),
        ];
        let mut builder = config::Config::builder();
        for (key, ms) in defaults {
            builder = builder.set_default(key, default_millis(key, ms)?)?;
        }

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::debug!("No configuration file found, using defaults");
        }

        builder = builder.add_source(
            config::Environment::with_prefix(&utils::PROJECT_NAME)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "replysheet-config-{name}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn test_embedded_defaults() {
        let default_config: Config = json5::from_str(CONFIG).expect("embedded config parses");
        assert_eq!(default_config.modal, ModalConfig::default());
    }

    #[test]
    fn test_default_millis_rejects_overflow() {
        assert_eq!(default_millis("modal.settle_delay_ms", 400).ok(), Some(400));
        assert_eq!(
            default_millis("modal.settle_delay_ms", i64::MAX as u64).ok(),
            Some(i64::MAX)
        );

        let err = default_millis("modal.settle_delay_ms", u64::MAX)
            .expect_err("u64::MAX does not fit");
        assert!(err.to_string().contains("modal.settle_delay_ms out of range"));
    }

    #[test]
    fn test_config_without_user_files() -> Result<(), ConfigError> {
        let dir = scratch_dir("empty");
        let cfg = Config::load_from(&dir)?;

        assert_eq!(cfg.modal.timing(), ModalTiming::default());

        Ok(())
    }

    #[test]
    fn test_user_file_overrides_settle_delay() -> Result<(), ConfigError> {
        let dir = scratch_dir("override");
        std::fs::write(
            dir.join("config.toml"),
            "[modal]\nsettle_delay_ms = 250\n",
        )
        .expect("write config");

        let cfg = Config::load_from(&dir)?;

        assert_eq!(cfg.modal.settle_delay_ms, 250);
        assert_eq!(cfg.modal.reveal_delay_ms, 0);
        assert_eq!(
            cfg.modal.timing().settle_delay,
            Duration::from_millis(250)
        );

        Ok(())
    }
}
