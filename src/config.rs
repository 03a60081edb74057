use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub animation: AnimationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Opponent pacing and randomness.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Shortest simulated "thinking" delay before the AI moves.
    pub ai_think_min_ms: u64,
    /// Longest simulated "thinking" delay before the AI moves.
    pub ai_think_max_ms: u64,
    /// Fixed seed for the AI and its delays; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            ai_think_min_ms: 1000,
            ai_think_max_ms: 2000,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn think_range(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.ai_think_min_ms),
            Duration::from_millis(self.ai_think_max_ms),
        )
    }
}

/// Disc drop pacing in the terminal UI.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub drop_base_ms: u64,
    pub drop_per_row_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            drop_base_ms: 600,
            drop_per_row_ms: 100,
        }
    }
}

/// Upper bound for any single animation timing value.
pub const MAX_DROP_MS: u64 = 60_000;

impl AnimationConfig {
    /// How long a disc takes to fall into `row`.
    pub fn drop_duration(&self, row: usize) -> Duration {
        let per_row = self.drop_per_row_ms.saturating_mul(row as u64);
        Duration::from_millis(self.drop_base_ms.saturating_add(per_row))
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the score record.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_dir: PathBuf::from(".four-in-a-row"),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file; the terminal itself belongs to the UI.
    pub file: PathBuf,
    /// `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: PathBuf::from("four-in-a-row.log"),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.ai_think_min_ms > self.game.ai_think_max_ms {
            return Err(ConfigError::Validation(
                "game.ai_think_min_ms must be <= game.ai_think_max_ms".into(),
            ));
        }
        if self.animation.drop_base_ms > MAX_DROP_MS
            || self.animation.drop_per_row_ms > MAX_DROP_MS
        {
            return Err(ConfigError::Validation(format!(
                "animation.drop_base_ms and animation.drop_per_row_ms must be <= {MAX_DROP_MS}"
            )));
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "storage.data_dir must not be empty".into(),
            ));
        }
        if self.logging.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "logging.file must not be empty".into(),
            ));
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[game]
seed = 42
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.game.seed, Some(42));
        assert_eq!(config.game.ai_think_min_ms, 1000);
        assert_eq!(config.animation.drop_base_ms, 600);
        assert_eq!(config.storage.data_dir, PathBuf::from(".four-in-a-row"));
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.game.ai_think_max_ms, 2000);
        assert_eq!(config.game.seed, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_drop_duration_grows_with_row() {
        let anim = AnimationConfig::default();
        assert_eq!(anim.drop_duration(0), Duration::from_millis(600));
        assert_eq!(anim.drop_duration(5), Duration::from_millis(1100));
    }

    #[test]
    fn test_validation_rejects_inverted_think_range() {
        let mut config = AppConfig::default();
        config.game.ai_think_min_ms = 3000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_huge_drop_timing() {
        let config: AppConfig =
            toml::from_str("[animation]\ndrop_per_row_ms = 9223372036854775807\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));

        let mut config = AppConfig::default();
        config.animation.drop_base_ms = MAX_DROP_MS + 1;
        assert!(config.validate().is_err());
        config.animation.drop_base_ms = MAX_DROP_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_drop_duration_saturates() {
        let anim = AnimationConfig {
            drop_base_ms: u64::MAX,
            drop_per_row_ms: u64::MAX,
        };
        assert_eq!(anim.drop_duration(5), Duration::from_millis(u64::MAX));
    }

    #[test]
    fn test_validation_rejects_empty_data_dir() {
        let mut config = AppConfig::default();
        config.storage.data_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "four_in_a_row=loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.game.ai_think_min_ms, 1000);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[game]
ai_think_min_ms = 0
ai_think_max_ms = 0

[animation]
drop_per_row_ms = 50
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.game.think_range(), (Duration::ZERO, Duration::ZERO));
        assert_eq!(config.animation.drop_per_row_ms, 50);
        assert_eq!(config.animation.drop_base_ms, 600);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\nai_think_min_ms = 5\nai_think_max_ms = 1\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }
}
