// src/client/mod.rs
// TestRail REST client: URL building, basic auth, error mapping

pub mod projects;
pub mod sections;
pub mod suites;

use crate::config::{EnvConfig, ResolvedSettings};
use crate::error::{Result, TestRailError};
use crate::http::create_shared_client;
use crate::sections::DiscoveryBackend;
use crate::types::{Project, Suite};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Path prefix every API v2 endpoint lives under
const API_PREFIX: &str = "index.php?/api/v2/";

/// Client for one TestRail instance
#[derive(Clone)]
pub struct TestRailClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    api_key: String,
}

impl std::fmt::Debug for TestRailClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestRailClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Shape of TestRail error bodies
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    error: String,
}

impl TestRailClient {
    /// Create a client with its own pooled HTTP client
    pub fn new(settings: ResolvedSettings) -> Self {
        let http = create_shared_client(settings.timeout);
        Self::with_http_client(http, settings)
    }

    /// Create from an existing reqwest::Client
    pub fn with_http_client(http: reqwest::Client, settings: ResolvedSettings) -> Self {
        Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            username: settings.username,
            api_key: settings.api_key,
        }
    }

    /// Build from loaded configuration, failing if anything required is missing
    pub fn from_config(config: &EnvConfig) -> Result<Self> {
        Ok(Self::new(config.resolve()?))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}{}", self.base_url, API_PREFIX, endpoint)
    }

    fn request(&self, method: reqwest::Method, endpoint: &str, query: &[(&str, String)]) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, self.endpoint_url(endpoint))
            .basic_auth(&self.username, Some(&self.api_key));
        // Extra parameters continue the `?/api/v2/...` query with `&`
        if !query.is_empty() {
            builder = builder.query(query);
        }
        builder
    }

    pub(crate) async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!(endpoint, "GET");
        let response = self.request(reqwest::Method::GET, endpoint, query).send().await?;
        Self::parse(Self::check(response).await?).await
    }

    pub(crate) async fn post<B, T>(&self, endpoint: &str, query: &[(&str, String)], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(endpoint, "POST");
        let response = self
            .request(reqwest::Method::POST, endpoint, query)
            .json(body)
            .send()
            .await?;
        Self::parse(Self::check(response).await?).await
    }

    /// POST where TestRail answers with an empty body
    pub(crate) async fn post_empty<B>(&self, endpoint: &str, query: &[(&str, String)], body: &B) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        debug!(endpoint, "POST");
        let response = self
            .request(reqwest::Method::POST, endpoint, query)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
            Err(_) => body,
        };
        Err(TestRailError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl DiscoveryBackend for TestRailClient {
    async fn load_project(&self, project_id: u64) -> Result<Project> {
        self.get_project(project_id).await
    }

    async fn list_suites(&self, project_id: u64) -> Result<Vec<Suite>> {
        self.get_suites(project_id).await
    }

    async fn load_suite(&self, suite_id: u64) -> Result<Suite> {
        self.get_suite(suite_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings(base_url: &str) -> ResolvedSettings {
        ResolvedSettings {
            base_url: base_url.to_string(),
            username: "qa@acme.dev".to_string(),
            api_key: "key".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint_url_trims_trailing_slash() {
        let client = TestRailClient::new(settings("https://acme.testrail.io/"));
        assert_eq!(client.base_url(), "https://acme.testrail.io");
        assert_eq!(
            client.endpoint_url("get_section/5"),
            "https://acme.testrail.io/index.php?/api/v2/get_section/5"
        );
    }

    #[test]
    fn test_query_appends_with_ampersand() {
        let client = TestRailClient::new(settings("https://acme.testrail.io"));
        let request = client
            .request(
                reqwest::Method::GET,
                "get_sections/1",
                &[("offset", "0".to_string()), ("limit", "250".to_string())],
            )
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://acme.testrail.io/index.php?/api/v2/get_sections/1&offset=0&limit=250"
        );
    }

    #[test]
    fn test_request_carries_basic_auth() {
        let client = TestRailClient::new(settings("https://acme.testrail.io"));
        let request = client
            .request(reqwest::Method::GET, "get_project/1", &[])
            .build()
            .unwrap();
        let auth = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(auth.starts_with("Basic "));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = TestRailClient::new(settings("https://acme.testrail.io"));
        let debug = format!("{:?}", client);
        assert!(!debug.contains("key\""));
        assert!(debug.contains("acme.testrail.io"));
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let config = EnvConfig::from_sources(&crate::config::FileConfig::default(), |_| None);
        let err = TestRailClient::from_config(&config).unwrap_err();
        assert!(matches!(err, TestRailError::Config(_)));
    }
}
