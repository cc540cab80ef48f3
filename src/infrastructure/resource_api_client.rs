// Resource API client implementation
use crate::application::resource_client::{ResourceClient, ResourceFilter};
use crate::domain::dashboard::DashboardRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ResourceApiClient {
    host: String,
    key: String,
    token: String,
    version: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    action: &'static str,
    version: &'a str,
    key: &'a str,
    token: &'a str,
    find: &'a ResourceFilter,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    rows: Vec<DashboardRecord>,
}

impl ResourceApiClient {
    pub fn new(
        host: String,
        key: String,
        token: String,
        version: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            key,
            token,
            version,
            client,
        })
    }

    fn build_url(&self, resource: &str) -> String {
        format!(
            "{}/{}/{}",
            self.host,
            self.version,
            urlencoding::encode(resource)
        )
    }

    fn build_request<'a>(&'a self, filter: &'a ResourceFilter) -> ApiRequest<'a> {
        ApiRequest {
            action: "get",
            version: &self.version,
            key: &self.key,
            token: &self.token,
            find: filter,
        }
    }
}

#[async_trait]
impl ResourceClient for ResourceApiClient {
    async fn query(&self, resource: &str, filter: &ResourceFilter) -> Result<Vec<DashboardRecord>> {
        let url = self.build_url(resource);
        tracing::debug!("Querying {} for '{}'", url, filter.search.keyphrase);

        let response = self
            .client
            .post(&url)
            .json(&self.build_request(filter))
            .send()
            .await
            .context("Failed to send request to resource API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Resource API query failed with status {}: {}", status, body);
        }

        let data = response
            .json::<ApiResponse>()
            .await
            .context("Failed to parse resource API response")?;

        if let Some(count) = data.count {
            if count as usize != data.rows.len() {
                tracing::warn!(
                    "Resource API reported {} rows but returned {}",
                    count,
                    data.rows.len()
                );
            }
        }

        Ok(data.rows)
    }
}
