// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Google Calendar v3 client: `events.import` and `calendarList.list`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};

use crate::config::{GOOGLE_TOKEN_ENV, GoogleConfig};
use crate::error::ImportError;
use crate::import::EventImporter;
use crate::normalize::NormalizedEvent;

/// One entry of the account's calendar list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct CalendarListEntry {
    /// Calendar identifier, e.g. `primary` or `abc@group.calendar.google.com`
    pub id: String,

    /// Display name
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct CalendarList {
    #[serde(default)]
    items: Vec<CalendarListEntry>,
}

/// Client for the Google Calendar v3 REST API.
///
/// Authenticates with a pre-obtained OAuth 2.0 bearer token.
///
/// # Example
///
/// ```ignore
/// use calport_core::{GoogleCalendarClient, GoogleConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GoogleConfig {
///     access_token: "ya29...".to_string(),
///     ..Default::default()
/// };
///
/// let client = GoogleCalendarClient::new(config)?;
/// let calendars = client.list_calendars().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    base_url: Url,
    config: GoogleConfig,
}

impl GoogleCalendarClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Config`] if the token is missing or the base URL
    /// is invalid, and [`ImportError::Request`] if the HTTP client cannot be
    /// built.
    pub fn new(config: GoogleConfig) -> Result<Self, ImportError> {
        if config.access_token.is_empty() {
            return Err(ImportError::Config(format!(
                "missing Google access token, set `access_token` in [core.google] or {GOOGLE_TOKEN_ENV}"
            )));
        }

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ImportError::Config(format!("invalid base URL {}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ImportError::Config(format!(
                "base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Lists the calendars of the authenticated account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn list_calendars(&self) -> Result<Vec<CalendarListEntry>, ImportError> {
        let mut url = self.endpoint(&["users", "me", "calendarList"])?;
        url.query_pairs_mut().append_pair("fields", "items(id,summary)");

        let resp = self.execute(self.build_request(Method::GET, url)).await?;
        let list: CalendarList = resp.json().await?;
        tracing::debug!(count = list.items.len(), "listed calendars");
        Ok(list.items)
    }

    /// Builds an API URL below the base URL; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ImportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ImportError::Config(format!("invalid base URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.config.access_token)
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Response, ImportError> {
        let resp = req.send().await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        Err(ImportError::Http(format!("{status}: {text}")))
    }
}

#[async_trait]
impl EventImporter for GoogleCalendarClient {
    async fn import_event(
        &self,
        calendar_id: &str,
        event: &NormalizedEvent,
    ) -> Result<(), ImportError> {
        let url = self.endpoint(&["calendars", calendar_id, "events", "import"])?;
        self.execute(self.build_request(Method::POST, url).json(event))
            .await?;
        Ok(())
    }
}
