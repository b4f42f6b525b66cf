use super::store::{PreferenceStore, PreferenceValues};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSON-file-backed preference store, the durable equivalent of the
/// browser's local storage. Writes go through to disk immediately.
#[derive(Debug)]
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<PreferenceValues>,
}

impl FilePreferences {
    /// Open the store, loading existing values when the file is present.
    /// A malformed file is treated as empty rather than fatal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences at {}", path.display()))?;
            match serde_json::from_str(&raw) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Ignoring malformed preference file {}: {}", path.display(), e);
                    PreferenceValues::default()
                }
            }
        } else {
            PreferenceValues::default()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    /// Default location under the platform data directory
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("openword")
            .join("preferences.json")
    }

    fn flush(path: &Path, values: &PreferenceValues) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preference directory {}", parent.display())
            })?;
        }
        let payload = serde_json::to_string_pretty(values)?;
        std::fs::write(path, payload)
            .with_context(|| format!("Failed to write preferences to {}", path.display()))?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
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
        Self::flush(&self.path, &values)
    }

    fn set_service_code(&self, code: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| anyhow!("Preference store lock poisoned"))?;
        values.service_code = Some(code.to_string());
        Self::flush(&self.path, &values)
    }
}
