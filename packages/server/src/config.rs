use common::config::StorageAppConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Privileged connection string. Never exposed through the API.
    pub url: String,
}

/// Verification settings for session tokens issued by the auth provider.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Shared HS256 secret of the auth provider.
    pub jwt_secret: String,
    /// Cookie holding the access token.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Expected `aud` claim. Not checked when unset.
    #[serde(default)]
    pub audience: Option<String>,
}

fn default_session_cookie() -> String {
    "sb-access-token".into()
}

/// Shared-secret integrations (voice-note ingestion).
#[derive(Debug, Deserialize, Clone)]
pub struct IntegrationConfig {
    /// Expected value of the `x-voice-secret` header. Empty disables the route.
    #[serde(default)]
    pub voice_secret: String,
    /// Identity recorded as `created_by` on ingested voice notes.
    #[serde(default = "default_voice_user_id")]
    pub voice_user_id: String,
}

fn default_voice_user_id() -> String {
    "voice-integration".into()
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            voice_secret: String::new(),
            voice_user_id: default_voice_user_id(),
        }
    }
}

/// Background removal of storage objects that no row references.
#[derive(Debug, Deserialize, Clone)]
pub struct SweepConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_sweep_interval")]
    pub interval_secs: u64,
    /// Objects younger than this are never removed, so in-flight uploads
    /// are not mistaken for orphans.
    #[serde(default = "default_sweep_grace")]
    pub grace_secs: u64,
}

fn default_sweep_interval() -> u64 {
    3600
}
fn default_sweep_grace() -> u64 {
    24 * 3600
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_secs: default_sweep_interval(),
            grace_secs: default_sweep_grace(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageAppConfig,
    #[serde(default)]
    pub integration: IntegrationConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PRINTSHOP__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("PRINTSHOP").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
