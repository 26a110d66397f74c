use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default smith data directory: ~/.smith
pub fn get_smith_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".smith"))
}

/// Load settings from the default locations.
///
/// Priority: `~/.smith/config.toml`, then `./smith.toml`, then built-in defaults.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let user_config = get_smith_data_dir().ok().map(|d| d.join("config.toml"));
    let local_config = Path::new("smith.toml");

    let cfg = match user_config.filter(|p| p.exists()) {
        Some(path) => read_settings(&path)?,
        None if local_config.exists() => read_settings(local_config)?,
        None => AppConfig::default(),
    };

    Ok(apply_env_overrides(cfg))
}

/// Load settings from an explicit file, then apply environment overrides.
pub fn load_from(path: &Path) -> anyhow::Result<AppConfig> {
    Ok(apply_env_overrides(read_settings(path)?))
}

fn read_settings(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read settings {}: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid settings {}: {e}", path.display()))?;
    Ok(cfg)
}

fn apply_env_overrides(mut cfg: AppConfig) -> AppConfig {
    if let Ok(v) = std::env::var("SMITH_TASK_PATH") {
        if !v.trim().is_empty() {
            cfg.paths.task_file = PathBuf::from(v.trim());
        }
    }
    if let Ok(v) = std::env::var("SMITH_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v.trim().to_string();
        }
    }
    cfg
}
