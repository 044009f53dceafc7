// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{error::Error, path::PathBuf, str::FromStr};

use tokio::fs;

use calport_core::{APP_NAME, Config};

const CALPORT_CONFIG_ENV: &str = "CALPORT_CONFIG";

/// Load the configuration.
///
/// The file is taken from `path`, then `$CALPORT_CONFIG`, then the user
/// config directory. Only a missing file in the user config directory
/// falls back to the defaults.
#[tracing::instrument]
pub async fn parse_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = if let Some(path) = path {
        path
    } else if let Ok(env_path) = std::env::var(CALPORT_CONFIG_ENV) {
        PathBuf::from(env_path)
    } else {
        let config = get_config_dir()?.join(format!("{APP_NAME}/config.toml"));
        if !config.exists() {
            tracing::debug!(path = %config.display(), "no config found, using defaults");
            let mut config = Config::default();
            config.normalize();
            return Ok(config);
        }
        config
    };

    let mut config = fs::read_to_string(&path)
        .await
        .map_err(|e| format!("Failed to read config file at {}: {}", path.display(), e))?
        .parse::<ConfigRaw>()
        .map_err(|e| format!("Failed to parse config file at {}: {}", path.display(), e))?
        .core;
    config.normalize();
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

#[derive(Debug, serde::Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    core: Config,
}

impl FromStr for ConfigRaw {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

fn get_config_dir() -> Result<PathBuf, Box<dyn Error>> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(not(unix))]
    let config_dir = dirs::config_dir();
    config_dir.ok_or_else(|| "User-specific home directory not found".into())
}

#[cfg(test)]
#[allow(unsafe_code)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn write_config(dir: &TempDir, name: &str, calendar_id: &str) -> PathBuf {
        let path = dir.path().join(name);
        let content = format!(
            r#"
[core]
timezone = "Asia/Tokyo"
calendar_id = "{calendar_id}"
"#
        );
        fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn cli_flag_overrides_env_var() {
        let temp_dir = TempDir::new().unwrap();
        let cli_path = write_config(&temp_dir, "config.toml", "cli");
        let env_path = write_config(&temp_dir, "env_config.toml", "env");

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(CALPORT_CONFIG_ENV, env_path.to_str().unwrap());
        }

        let config = parse_config(Some(cli_path)).await.unwrap();
        assert_eq!(config.calendar_id.as_deref(), Some("cli"));
        assert_eq!(config.timezone(), "Asia/Tokyo");

        unsafe {
            std::env::remove_var(CALPORT_CONFIG_ENV);
        }
    }

    #[tokio::test]
    async fn env_var_overrides_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let env_path = write_config(&temp_dir, "env_config.toml", "env");

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::set_var(CALPORT_CONFIG_ENV, env_path.to_str().unwrap());
        }

        let config = parse_config(None).await.unwrap();
        assert_eq!(config.calendar_id.as_deref(), Some("env"));

        unsafe {
            std::env::remove_var(CALPORT_CONFIG_ENV);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn uses_default_location_when_no_cli_or_env() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("calport")).unwrap();
        write_config(&temp_dir, "calport/config.toml", "default");

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(CALPORT_CONFIG_ENV);
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap());
        }

        let config = parse_config(None).await.unwrap();
        assert_eq!(config.calendar_id.as_deref(), Some("default"));

        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn falls_back_to_defaults_when_no_config_found() {
        let temp_dir = TempDir::new().unwrap();

        let _guard = env_lock().lock().await;
        unsafe {
            std::env::remove_var(CALPORT_CONFIG_ENV);
            std::env::set_var("XDG_CONFIG_HOME", temp_dir.path().to_str().unwrap());
        }

        let config = parse_config(None).await.unwrap();
        assert_eq!(config.calendar_id, None);
        assert!(config.timezone.is_some());
        assert_eq!(
            config.google.base_url,
            "https://www.googleapis.com/calendar/v3"
        );

        unsafe {
            std::env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[tokio::test]
    async fn explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let result = parse_config(Some(path)).await;
        let error = result.unwrap_err().to_string();
        assert!(error.contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[core\ntimezone = ").unwrap();

        let result = parse_config(Some(path)).await;
        let error = result.unwrap_err().to_string();
        assert!(error.contains("Failed to parse config file"));
    }

    #[tokio::test]
    async fn reads_google_section() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let content = r#"
[core]
timezone = "UTC"

[core.google]
access_token = "token-from-file"
timeout_secs = 5
"#;
        fs::write(&path, content).unwrap();

        let config = parse_config(Some(path)).await.unwrap();
        assert_eq!(config.google.access_token, "token-from-file");
        assert_eq!(config.google.timeout_secs, 5);
        assert_eq!(config.timezone(), "UTC");
    }
}
