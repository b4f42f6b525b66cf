use super::info::parse_info_response;
use super::TenantInfo;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::info;

/// Error body returned by the server on a failed fetch
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct TenantClient {
    http: reqwest::Client,
    server_url: String,
}

impl TenantClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the tenant settings for an organisation key.
    ///
    /// Without a key there is nothing to fetch: the configuration-required
    /// fallback is returned immediately.
    pub async fn fetch_info(&self, organisation: Option<&str>) -> Result<TenantInfo> {
        let Some(key) = organisation else {
            info!("No organisation key supplied, skipping tenant fetch");
            return Ok(TenantInfo::configuration_required());
        };

        let url = format!("{}/organisation/info", self.server_url);
        info!("Fetching organisation info from {} for {}", url, key);

        let response = self
            .http
            .get(&url)
            .query(&[("organisation", key)])
            .send()
            .await
            .context("Failed to fetch organisation info")?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ErrorBody = response.json().await.unwrap_or(ErrorBody { message: None });
            bail!(
                "Organisation info request failed ({}): {}",
                status,
                body.message.unwrap_or_else(|| "no message".to_string())
            );
        }

        let body = response
            .text()
            .await
            .context("Failed to read organisation info response")?;
        let tenant = parse_info_response(&body)?;

        info!(
            "Loaded tenant '{}' with {} languages, default service {}",
            tenant.name,
            tenant.languages.len(),
            tenant.default_service_id
        );

        Ok(tenant)
    }
}
