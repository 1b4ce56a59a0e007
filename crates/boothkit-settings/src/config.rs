//! Designer configuration file handling.
//!
//! The tunable parameters live in `boothkit_core::DesignerConfig`; this
//! module owns where the TOML file sits on disk and how it is read and
//! written. A missing file means defaults; a corrupt file is logged and
//! replaced by defaults rather than blocking startup.

use std::path::{Path, PathBuf};

use boothkit_core::DesignerConfig;

use crate::error::{SettingsError, SettingsResult};

const CONFIG_FILE: &str = "config.toml";
const APP_DIR: &str = "boothkit";

/// Platform config file location, e.g. `~/.config/boothkit/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        SettingsError::ConfigDirectory("no platform config directory".to_string())
    })?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

/// Loads the config from `path`.
pub fn load_config(path: &Path) -> SettingsResult<DesignerConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: DesignerConfig = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

/// Loads the config from `path`, falling back to defaults when the file is
/// missing or unreadable. A malformed file is logged, never fatal.
pub fn load_config_or_default(path: &Path) -> DesignerConfig {
    match load_config(path) {
        Ok(config) => config,
        Err(SettingsError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            DesignerConfig::default()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring bad config file");
            DesignerConfig::default()
        }
    }
}

/// Saves the config to `path`, creating parent directories as needed.
pub fn save_config(config: &DesignerConfig, path: &Path) -> SettingsResult<()> {
    validate(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| SettingsError::SaveError(e.to_string()))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Rejects values the designer cannot operate with.
pub fn validate(config: &DesignerConfig) -> SettingsResult<()> {
    let positive = [
        ("snap_threshold_px", config.snap_threshold_px),
        ("handle_size_px", config.handle_size_px),
        ("min_slot_fraction", config.min_slot_fraction),
        ("nudge_step_px", config.nudge_step_px),
        ("fast_nudge_step_px", config.fast_nudge_step_px),
    ];
    for (key, value) in positive {
        if !(value > 0.0 && value.is_finite()) {
            return Err(SettingsError::InvalidSetting {
                key: key.to_string(),
                reason: "must be positive".to_string(),
            });
        }
    }

    // Margins and gaps may be zero but must leave room for at least one cell.
    for (key, value) in [
        ("preset_margin", config.preset_margin),
        ("preset_gap", config.preset_gap),
    ] {
        if !(0.0..0.5).contains(&value) {
            return Err(SettingsError::InvalidSetting {
                key: key.to_string(),
                reason: "must be in [0, 0.5)".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = DesignerConfig::default();
        config.snap_threshold_px = 6.0;
        config.preset_gap = 0.05;
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_or_default(&dir.path().join("nope.toml"));
        assert_eq!(config, DesignerConfig::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "snap_threshold_px = \"fast\"").unwrap();
        let config = load_config_or_default(&path);
        assert_eq!(config, DesignerConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "snap_threshold_px = 4.0\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.snap_threshold_px, 4.0);
        assert_eq!(config.handle_size_px, DesignerConfig::default().handle_size_px);
    }

    #[test]
    fn validation_rejects_nonpositive_thresholds() {
        let mut config = DesignerConfig::default();
        config.snap_threshold_px = 0.0;
        assert!(matches!(
            validate(&config),
            Err(SettingsError::InvalidSetting { .. })
        ));
    }
}
