use crate::domain::model::{WebProperty, WebPropertyValues};
use crate::domain::ports::{ConfigProvider, SiteClient};
use crate::utils::error::{Result, SiteHeaderError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

const ACCEPT_NO_METADATA: &str = "application/json;odata=nometadata";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// REST client for one site.
///
/// Every call is bounded by the configured timeout; reaching it yields
/// [`SiteHeaderError::Timeout`].
#[derive(Debug, Clone)]
pub struct RestSiteClient {
    site_url: String,
    access_token: Option<String>,
    timeout: Duration,
    client: Client,
}

impl RestSiteClient {
    pub fn new(site_url: &str, access_token: Option<String>, timeout_seconds: u64) -> Self {
        Self {
            site_url: site_url.trim_end_matches('/').to_string(),
            access_token,
            timeout: Duration::from_secs(timeout_seconds),
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.site_url(),
            config.access_token().map(str::to_string),
            config.timeout_seconds(),
        )
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn api_url(&self, relative_url: &str) -> String {
        format!("{}/{}", self.site_url, relative_url.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// 發送請求並等待完成，超過時限即回傳錯誤
    async fn send(&self, request: RequestBuilder, url: &str) -> Result<String> {
        let call = async {
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, SiteHeaderError>((status, body))
        };

        let (status, body) = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| SiteHeaderError::Timeout {
                url: url.to_string(),
                seconds: self.timeout.as_secs(),
            })??;

        tracing::debug!("API response status: {} ({})", status, url);

        if !status.is_success() {
            return Err(SiteHeaderError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl SiteClient for RestSiteClient {
    fn site_url(&self) -> &str {
        &self.site_url
    }

    async fn load_web_properties(&self, properties: &[WebProperty]) -> Result<WebPropertyValues> {
        let select = properties
            .iter()
            .map(WebProperty::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!("{}?$select={}", self.api_url("/_api/web"), select);

        tracing::debug!("📡 Loading web properties: {}", select);
        let request = self
            .authorize(self.client.get(&url))
            .header(reqwest::header::ACCEPT, ACCEPT_NO_METADATA);

        let body = self.send(request, &url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn execute_post(&self, relative_url: &str, body: serde_json::Value) -> Result<()> {
        let url = self.api_url(relative_url);

        tracing::debug!("📡 POST {}: {}", url, body);
        let request = self
            .authorize(self.client.post(&url))
            .header(reqwest::header::ACCEPT, ACCEPT_NO_METADATA)
            .json(&body);

        self.send(request, &url).await?;
        Ok(())
    }
}
