use anyhow::{Result, bail};
use std::env;

/// Environment-driven configuration. `JWT_SECRET` is the only required
/// variable; everything else has a development default.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: String,
    pub jwt_secret: String,
    pub cors_allowed_origin: String,
    pub asset_bucket: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => bail!("JWT_SECRET must be set and non-empty"),
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            jwt_secret,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            asset_bucket: env::var("ASSET_BUCKET")
                .unwrap_or_else(|_| "fitplan-assets".to_string()),
        })
    }
}
