use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub transport: TransportConfig,
    pub preferences: PreferencesConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the translation server, e.g. "https://translate.example.org"
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct TransportConfig {
    /// Realtime namespace appended to the server URL
    pub namespace: String,

    /// Fixed delay between reconnect attempts, in seconds
    pub reconnect_delay_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesConfig {
    /// Path of the preference file. Defaults under the user data directory
    /// when not set.
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Bearer token for control-panel operations (start/stop/profile)
    pub token: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.url", "http://localhost:3000")?
            .set_default("transport.namespace", "participant")?
            .set_default("transport.reconnect_delay_secs", 2_i64)?
            .set_default::<_, Option<String>>("preferences.path", None)?
            .set_default::<_, Option<String>>("auth.token", None)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("OPENWORD").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
