use serde::Deserialize;

use petmatch_core::config::Config;

/// API configuration loaded from `PETMATCH_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// sea-orm connection URL (`sqlite://...` or `postgres://...`). Env var: `PETMATCH_DATABASE_URL`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// TCP port for the HTTP server (default 8084). Env var: `PETMATCH_HTTP_PORT`.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// HMAC secret for signing access tokens. Env var: `PETMATCH_JWT_SECRET`.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Email of the bootstrapped admin account. Env var: `PETMATCH_ADMIN_EMAIL`.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Env var: `PETMATCH_ADMIN_PASSWORD`.
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

impl Config for ApiConfig {
    const PREFIX: &'static str = "PETMATCH_";
}

fn default_database_url() -> String {
    "sqlite://petmatch.db?mode=rwc".to_owned()
}

fn default_http_port() -> u16 {
    8084
}

fn default_jwt_secret() -> String {
    "change-me".to_owned()
}

fn default_admin_email() -> String {
    "admin@petmatch.local".to_owned()
}

fn default_admin_password() -> String {
    "admin123".to_owned()
}
