use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Global configuration (from the per-user config dir, `config.toml`)
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Terminal emulator command used by "open shell". When unset, the
    /// launcher falls back to `$TERMINAL` and then a list of common
    /// emulators found on `PATH`.
    #[serde(default)]
    pub terminal: Option<String>,

    /// How many commits the commit pickers list.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Default `-n` bound for the log viewer.
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,
}

fn default_history_limit() -> usize {
    40
}

fn default_log_limit() -> usize {
    200
}

impl Default for Config {
    fn default() -> Self {
        Self {
            terminal: None,
            history_limit: default_history_limit(),
            log_limit: default_log_limit(),
        }
    }
}

impl Config {
    /// Load configuration from the per-user config dir. A missing file is
    /// fine (defaults); a malformed one is an error the caller reports.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join("config.toml");

        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let cfg: Config =
            toml::from_str(&s).with_context(|| format!("failed to parse {}", path.display()))?;

        Ok(cfg)
    }
}

/// Per-user configuration directory, created on first use.
pub fn config_dir() -> Result<PathBuf> {
    let mut path = dirs::config_dir().context("could not find a user config directory")?;
    path.push("gitdeck");

    if !path.exists() {
        fs::create_dir_all(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
    }

    Ok(path)
}

/// Backing file for the persistent repository list.
pub fn repolist_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("repositories"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg: Config = toml::from_str(
            r#"
terminal = "alacritty"
history_limit = 15
log_limit = 80
"#,
        )
        .unwrap();

        assert_eq!(cfg.terminal.as_deref(), Some("alacritty"));
        assert_eq!(cfg.history_limit, 15);
        assert_eq!(cfg.log_limit, 80);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = toml::from_str("").unwrap();

        assert!(cfg.terminal.is_none());
        assert_eq!(cfg.history_limit, 40);
        assert_eq!(cfg.log_limit, 200);
    }
}
