use anyhow::{Context, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One selectable translation language.
///
/// `value` is the locale the server was configured with (e.g. "es-ES");
/// `label` is the display name shown to the participant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub value: String,
    pub label: String,
}

impl Language {
    /// Short language code used in room names ("es-ES" -> "es").
    pub fn code(&self) -> String {
        crate::session::language_code(&self.value)
    }
}

/// Welcome-screen text for a tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub greeting: String,
    pub messages: Vec<String>,
    pub additional_message: String,
    pub waiting: String,
}

/// Tenant settings, fetched once per run and immutable afterwards
#[derive(Debug, Clone)]
pub struct TenantInfo {
    pub name: String,
    pub default_service_id: String,
    pub languages: Vec<Language>,
    pub welcome: Welcome,
    pub logo: Option<Vec<u8>>,
}

impl TenantInfo {
    /// Fallback shown when no organisation key was supplied. No fetch is
    /// issued in that case; the participant has to fix the URL.
    pub fn configuration_required() -> Self {
        Self {
            name: String::new(),
            default_service_id: String::new(),
            languages: Vec::new(),
            welcome: Welcome {
                greeting: "Configuration Required".to_string(),
                messages: vec![
                    "Please add your organization key to the URL.".to_string(),
                    "Example: ?organisation=YOUR_ORGANISATION_KEY".to_string(),
                ],
                additional_message: String::new(),
                waiting: "Waiting for configuration...".to_string(),
            },
            logo: None,
        }
    }
}

/// Parse the body of `GET /organisation/info`
pub fn parse_info_response(body: &str) -> Result<TenantInfo> {
    let envelope: ApiEnvelope<TenantInfoWire> =
        serde_json::from_str(body).context("Invalid organisation info response")?;
    envelope.response_object.into_info()
}

/// Response envelope used by the organisation endpoints
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(rename = "responseObject")]
    response_object: T,
}

/// Raw wire shape of `GET /organisation/info`. The language list and the
/// welcome messages arrive as JSON-array strings and are parsed out.
#[derive(Debug, Deserialize)]
struct TenantInfoWire {
    name: Option<String>,
    #[serde(rename = "defaultServiceId")]
    default_service_id: String,
    #[serde(rename = "translationLanguages")]
    translation_languages: Option<String>,
    message: String,
    greeting: String,
    #[serde(rename = "additionalWelcome")]
    additional_welcome: Option<String>,
    waiting: String,
    #[serde(rename = "base64Logo")]
    base64_logo: Option<String>,
}

impl TenantInfoWire {
    fn into_info(self) -> Result<TenantInfo> {
        let languages = match self.translation_languages {
            Some(raw) => serde_json::from_str::<Vec<Language>>(&raw)
                .context("Invalid translationLanguages payload")?,
            None => Vec::new(),
        };

        let messages = serde_json::from_str::<Vec<String>>(&self.message)
            .context("Invalid welcome message payload")?;

        let logo = match self.base64_logo {
            Some(encoded) => Some(
                base64::engine::general_purpose::STANDARD
                    .decode(encoded.as_bytes())
                    .context("Invalid base64 logo")?,
            ),
            None => None,
        };

        Ok(TenantInfo {
            name: self.name.unwrap_or_default(),
            default_service_id: self.default_service_id,
            languages,
            welcome: Welcome {
                greeting: self.greeting,
                messages,
                additional_message: self.additional_welcome.unwrap_or_default(),
                waiting: self.waiting,
            },
            logo,
        })
    }
}
