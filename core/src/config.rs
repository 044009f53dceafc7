// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// The name of the calport application.
pub const APP_NAME: &str = "calport";

/// Environment variable holding the Google Calendar access token.
pub const GOOGLE_TOKEN_ENV: &str = "CALPORT_GOOGLE_TOKEN";

const DEFAULT_TIMEZONE: &str = "UTC";

/// Configuration for the calport application.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Config {
    /// IANA timezone used to read every event date-time.
    ///
    /// Defaults to the system timezone, or UTC if that is unknown.
    #[serde(default)]
    pub timezone: Option<String>,

    /// Calendar to import into.
    #[serde(default)]
    pub calendar_id: Option<String>,

    /// Google Calendar API settings.
    #[serde(default)]
    pub google: GoogleConfig,
}

impl Config {
    /// Normalize the configuration.
    ///
    /// Fills the timezone from the system and the access token from
    /// [`GOOGLE_TOKEN_ENV`] when the file leaves them out.
    pub fn normalize(&mut self) {
        if self.timezone.is_none() {
            self.timezone = Some(system_timezone());
        }

        if self.google.access_token.is_empty()
            && let Ok(token) = std::env::var(GOOGLE_TOKEN_ENV)
        {
            tracing::debug!("using access token from {GOOGLE_TOKEN_ENV}");
            self.google.access_token = token;
        }
    }

    /// The configured timezone, UTC if unset.
    #[must_use]
    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }
}

/// Google Calendar API configuration.
#[derive(Clone, serde::Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Base URL of the Calendar v3 API.
    pub base_url: String,

    /// OAuth 2.0 bearer token with calendar scope.
    pub access_token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent string.
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/calendar/v3".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("calport/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: String::new(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// Keeps the token out of logs.
impl fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.access_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("GoogleConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &token)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn system_timezone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!("failed to detect system timezone, falling back to {DEFAULT_TIMEZONE}: {e}");
            DEFAULT_TIMEZONE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
timezone = "Asia/Tokyo"
calendar_id = "primary"

[google]
access_token = "token"
base_url = "http://localhost:8080"
timeout_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(config.timezone(), "Asia/Tokyo");
        assert_eq!(config.calendar_id.as_deref(), Some("primary"));
        assert_eq!(config.google.access_token, "token");
        assert_eq!(config.google.base_url, "http://localhost:8080");
        assert_eq!(config.google.timeout_secs, 5);
        assert!(config.google.user_agent.starts_with("calport/"));
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.timezone, None);
        assert_eq!(config.timezone(), "UTC");
        assert_eq!(config.calendar_id, None);
        assert_eq!(
            config.google.base_url,
            "https://www.googleapis.com/calendar/v3"
        );
        assert_eq!(config.google.timeout_secs, 30);
    }

    #[test]
    fn test_normalize_keeps_explicit_values() {
        let mut config = Config {
            timezone: Some("Europe/Berlin".to_string()),
            google: GoogleConfig {
                access_token: "from-file".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        config.normalize();

        assert_eq!(config.timezone(), "Europe/Berlin");
        assert_eq!(config.google.access_token, "from-file");
    }

    #[test]
    fn test_normalize_fills_timezone() {
        let mut config = Config::default();
        config.normalize();
        assert!(config.timezone.is_some());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = GoogleConfig {
            access_token: "secret".to_string(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
