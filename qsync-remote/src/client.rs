//! HTTP transport for the remote article service.
//!
//! [`RemoteApi`] is the seam the sync engine talks to; [`QiitaClient`] is the
//! blocking `ureq` implementation used by the CLI. Every request carries the
//! bearer token and is bounded by the agent-wide timeout.

use std::time::Duration;

use serde::de::DeserializeOwned;

use qsync_core::Settings;

use crate::error::RemoteError;
use crate::item::Item;

/// Page size requested when listing; the service caps it at 100.
pub const PER_PAGE: usize = 100;
/// The service refuses pages past 100.
const MAX_PAGES: usize = 100;

/// Operations the sync engine needs from the remote service.
pub trait RemoteApi {
    /// Every item owned by the authenticated user, across all pages.
    fn list_items(&self) -> Result<Vec<Item>, RemoteError>;

    fn get_item(&self, id: &str) -> Result<Item, RemoteError>;

    /// Create a new item; the response carries the server-assigned id, url,
    /// and timestamps.
    fn create_item(&self, item: &Item) -> Result<Item, RemoteError>;

    fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError>;
}

/// Blocking client for a Qiita-compatible `/api/v2`.
#[derive(Debug, Clone)]
pub struct QiitaClient {
    agent: ureq::Agent,
    api_base: String,
    access_token: String,
}

impl QiitaClient {
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("qsync/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.api_base, &settings.access_token, settings.timeout)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }

    fn request(&self, method: &'static str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .set("Accept", "application/json")
    }

    fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        url: &str,
        request: ureq::Request,
        body: Option<&Item>,
    ) -> Result<T, RemoteError> {
        tracing::debug!(method, url, "request");
        let result = match body {
            Some(item) => request.send_json(item),
            None => request.call(),
        };
        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(RemoteError::Status {
                    method,
                    url: url.to_string(),
                    code,
                    text: response.status_text().to_string(),
                })
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(RemoteError::Transport {
                    method,
                    url: url.to_string(),
                    message: transport.to_string(),
                })
            }
        };
        serde_json::from_reader(response.into_reader()).map_err(|source| RemoteError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

impl RemoteApi for QiitaClient {
    fn list_items(&self) -> Result<Vec<Item>, RemoteError> {
        let url = self.url("authenticated_user/items");
        let mut items = Vec::new();
        for page in 1..=MAX_PAGES {
            let request = self
                .request("GET", &url)
                .query("page", &page.to_string())
                .query("per_page", &PER_PAGE.to_string());
            let batch: Vec<Item> = self.send("GET", &url, request, None)?;
            let last = batch.len() < PER_PAGE;
            items.extend(batch);
            if last {
                break;
            }
        }
        tracing::debug!(count = items.len(), "listed remote items");
        Ok(items)
    }

    fn get_item(&self, id: &str) -> Result<Item, RemoteError> {
        if id.is_empty() {
            return Err(RemoteError::MissingId);
        }
        let url = self.url(&format!("items/{id}"));
        self.send("GET", &url, self.request("GET", &url), None)
    }

    fn create_item(&self, item: &Item) -> Result<Item, RemoteError> {
        let url = self.url("items");
        self.send("POST", &url, self.request("POST", &url), Some(item))
    }

    fn update_item(&self, id: &str, item: &Item) -> Result<Item, RemoteError> {
        if id.is_empty() {
            return Err(RemoteError::MissingId);
        }
        let url = self.url(&format!("items/{id}"));
        self.send("PATCH", &url, self.request("PATCH", &url), Some(item))
    }
}
