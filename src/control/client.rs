use crate::tenant::Language;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct StartServiceRequest<'a> {
    languages: &'a [Language],
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Organisation profile as returned by `GET /api/organisation/profile`
#[derive(Debug, Clone, Deserialize)]
pub struct OrganisationProfile {
    pub name: String,
    pub organisation_key: String,
    pub default_service_id: String,
    pub host_language: Option<String>,
    #[serde(default)]
    pub translation_languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    data: OrganisationProfile,
}

// ============================================================================
// Client
// ============================================================================

/// Authenticated client for the service lifecycle API
pub struct ControlClient {
    http: reqwest::Client,
    server_url: String,
    token: String,
}

impl ControlClient {
    pub fn new(server_url: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            server_url: server_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Fetch the operator's organisation profile
    pub async fn fetch_profile(&self) -> Result<OrganisationProfile> {
        let url = format!("{}/api/organisation/profile", self.server_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to fetch organisation profile")?;

        if !response.status().is_success() {
            bail!("{}", Self::server_error(response, "profile fetch").await);
        }

        let envelope: ProfileEnvelope = response
            .json()
            .await
            .context("Invalid organisation profile response")?;

        Ok(envelope.data)
    }

    /// Start a translation service with the given language list.
    /// Non-2xx responses surface the server's message.
    pub async fn start_service(&self, service_id: &str, languages: &[Language]) -> Result<()> {
        let url = format!("{}/api/service/{}/start", self.server_url, service_id);
        info!("Starting service {} with {} languages", service_id, languages.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&StartServiceRequest { languages })
            .send()
            .await
            .context("Failed to reach the server to start the service")?;

        if !response.status().is_success() {
            bail!("Failed to start service: {}", Self::server_error(response, "start").await);
        }

        info!("Service {} started successfully", service_id);
        Ok(())
    }

    /// Stop a running translation service
    pub async fn stop_service(&self, service_id: &str) -> Result<()> {
        let url = format!("{}/api/service/{}/stop", self.server_url, service_id);
        info!("Stopping service {}", service_id);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to reach the server to stop the service")?;

        if !response.status().is_success() {
            bail!("Failed to stop service: {}", Self::server_error(response, "stop").await);
        }

        info!("Service {} stopped successfully", service_id);
        Ok(())
    }

    async fn server_error(response: reqwest::Response, action: &str) -> String {
        let status = response.status();
        let body: ErrorBody = response.json().await.unwrap_or(ErrorBody { message: None });
        body.message
            .unwrap_or_else(|| format!("{} failed with status {}", action, status))
    }
}
