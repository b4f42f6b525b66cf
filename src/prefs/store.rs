use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Persisted key set. Field names match the keys the participant page has
/// always used, so an existing preference file keeps working.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreferenceValues {
    pub language: Option<String>,
    #[serde(rename = "languageName")]
    pub language_name: Option<String>,
    #[serde(rename = "serviceCode")]
    pub service_code: Option<String>,
}

/// Store for the last-used language and service, injected into the session
/// controller. Single-threaded access, last write wins.
pub trait PreferenceStore: Send + Sync {
    fn language(&self) -> Option<String>;
    fn language_name(&self) -> Option<String>;
    fn service_code(&self) -> Option<String>;

    fn set_language(&self, code: &str, name: &str) -> Result<()>;
    fn set_service_code(&self, code: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral runs
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<PreferenceValues>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn language(&self) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.language.clone())
    }

    fn language_name(&self) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.language_name.clone())
    }

    fn service_code(&self) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.service_code.clone())
    }

    fn set_language(&self, code: &str, name: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?;
        values.language = Some(code.to_string());
        values.language_name = Some(name.to_string());
        Ok(())
    }

    fn set_service_code(&self, code: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?;
        values.service_code = Some(code.to_string());
        Ok(())
    }
}
