//! HTTP client for the Duck CI server REST API.
//!
//! This module provides:
//!
//! - `DuckClient`: HTTP client wrapper for the Duck endpoints
//! - `BuildRecord`, `ServerInfo`, `ViewInfo`: deserialized API responses
//! - `FetchError`: what went wrong with a request
//!
//! The server exposes three read-only endpoints:
//!
//! - `/api/builds`: every build the server currently tracks
//! - `/api/builds/view/{id}`: builds filtered through a server-defined view
//! - `/api/server`: server title, version, start time and available views

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User agent for API requests
const USER_AGENT: &str = concat!("Duckboard/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when talking to a Duck server.
///
/// The synchronization store treats every variant the same way ("fetch
/// failed"); the distinction exists for logging.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Status of a single build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildStatus {
    Success,
    Failed,
    Running,
    Canceled,
    Queued,
    Skipped,
    /// Statuses introduced by newer servers degrade to this instead of
    /// failing the whole payload.
    #[default]
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    /// Short tag for text output
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Failed => "FAIL",
            Self::Running => "run",
            Self::Canceled => "stop",
            Self::Queued => "queue",
            Self::Skipped => "skip",
            Self::Unknown => "?",
        }
    }
}

/// One build's status snapshot as returned by the server.
///
/// Every field is optional on the wire; servers omit what they don't track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub collector: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub build: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default, rename = "buildId")]
    pub build_id: String,
    #[serde(default, rename = "buildNumber")]
    pub build_number: String,
    #[serde(default)]
    pub started: String,
    #[serde(default)]
    pub finished: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub status: BuildStatus,
}

/// Server metadata, fetched once per session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    /// Unix timestamp of server start
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub started: Option<DateTime<Utc>>,
    #[serde(default)]
    pub views: Vec<ViewInfo>,
}

/// A named server-side filter over the build list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewInfo {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Duck REST API client
#[derive(Clone)]
pub struct DuckClient {
    client: reqwest::Client,
}

impl DuckClient {
    /// Create a new client with the given per-request timeout.
    ///
    /// The timeout bounds every request end to end, so a server that stops
    /// responding settles as a failed fetch instead of hanging a
    /// synchronization round.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Base URL for a server address, prepending a scheme when missing
    fn base_url(server: &str) -> String {
        let server = server.trim_end_matches('/');
        if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("http://{}", server)
        }
    }

    /// Address of the build list endpoint, filtered when a view is given
    pub fn builds_address(server: &str, view: Option<&str>) -> String {
        let base = Self::base_url(server);
        match view {
            Some(view) => format!("{}/api/builds/view/{}", base, view),
            None => format!("{}/api/builds", base),
        }
    }

    /// Address of the server information endpoint
    pub fn server_address(server: &str) -> String {
        format!("{}/api/server", Self::base_url(server))
    }

    /// Fetch the build list, filtered through a view when one is given.
    ///
    /// The returned sequence preserves the server's ordering.
    pub async fn get_builds(
        &self,
        server: &str,
        view: Option<&str>,
    ) -> Result<Vec<BuildRecord>, FetchError> {
        let url = Self::builds_address(server, view);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.json().await?)
    }

    /// Fetch server metadata
    pub async fn get_server_info(&self, server: &str) -> Result<ServerInfo, FetchError> {
        let url = Self::server_address(server);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> DuckClient {
        DuckClient::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn builds_address_unfiltered() {
        assert_eq!(
            DuckClient::builds_address("http://localhost:15825", None),
            "http://localhost:15825/api/builds"
        );
    }

    #[test]
    fn builds_address_with_view() {
        assert_eq!(
            DuckClient::builds_address("http://localhost:15825", Some("nightly")),
            "http://localhost:15825/api/builds/view/nightly"
        );
    }

    #[test]
    fn address_without_scheme_defaults_to_http() {
        assert_eq!(
            DuckClient::builds_address("localhost:9000", None),
            "http://localhost:9000/api/builds"
        );
        assert_eq!(
            DuckClient::server_address("localhost:9000/"),
            "http://localhost:9000/api/server"
        );
    }

    #[test]
    fn unknown_status_degrades_instead_of_failing() {
        let build: BuildRecord =
            serde_json::from_str(r#"{"id":7,"status":"Exploded"}"#).unwrap();
        assert_eq!(build.status, BuildStatus::Unknown);
        assert_eq!(build.id, 7);
    }

    #[test]
    fn sparse_server_info_parses() {
        let info: ServerInfo = serde_json::from_str(r#"{"title":"CI"}"#).unwrap();
        assert_eq!(info.title, "CI");
        assert!(info.started.is_none());
        assert!(info.views.is_empty());
    }

    #[test]
    fn server_info_with_views_and_start_time() {
        let info: ServerInfo = serde_json::from_str(
            r#"{"title":"Duck","version":"0.15.0","started":1577836800,
                "views":[{"name":"Nightly","slug":"nightly"},{"name":"All"}]}"#,
        )
        .unwrap();
        assert_eq!(info.version, "0.15.0");
        assert_eq!(info.started.unwrap().timestamp(), 1_577_836_800);
        assert_eq!(info.views.len(), 2);
        assert_eq!(info.views[0].slug.as_deref(), Some("nightly"));
        assert!(info.views[1].slug.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/builds"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client().get_builds(&server.uri(), None).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/builds"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client().get_builds(&server.uri(), None).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }
}
