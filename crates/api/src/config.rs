//! Runtime settings.

use std::net::SocketAddr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

const DEV_SECRET: &str = "dev-secret";

/// Server settings.
///
/// Loaded from an optional `filmoteca.{toml,yaml,json}` file, then overridden by
/// `FILMOTECA_*` environment variables (a `.env` file is read first when
/// present).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// MongoDB connection string; the in-memory store is used when unset.
    #[serde(default)]
    pub database_url: Option<String>,

    /// MongoDB database name
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Access-token signing secret
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Access-token lifetime in seconds
    #[serde(default = "default_token_expires_in_secs")]
    pub token_expires_in_secs: i64,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Allow cross-origin requests from any origin
    #[serde(default = "default_true")]
    pub enable_cors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            database_url: None,
            database_name: default_database_name(),
            jwt_secret: None,
            token_expires_in_secs: default_token_expires_in_secs(),
            log_level: default_log_level(),
            enable_cors: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from `.env`, the optional config file and the environment.
    pub fn load() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("filmoteca").required(false))
            .add_source(config::Environment::with_prefix("FILMOTECA").try_parsing(true));

        let settings: Settings = builder.build()?.try_deserialize()?;
        if settings.token_expires_in_secs <= 0 {
            anyhow::bail!("token_expires_in_secs must be positive");
        }
        Ok(settings)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Signing secret, falling back to an insecure development default.
    pub fn jwt_secret(&self) -> String {
        match self.jwt_secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                tracing::warn!("FILMOTECA_JWT_SECRET not set; using insecure dev default");
                DEV_SECRET.to_string()
            }
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::seconds(self.token_expires_in_secs)
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_database_name() -> String {
    "filmoteca".to_string()
}

fn default_token_expires_in_secs() -> i64 {
    300
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.port, 4000);
        assert_eq!(s.database_name, "filmoteca");
        assert_eq!(s.token_expires_in_secs, 300);
        assert!(s.database_url.is_none());
        assert!(s.enable_cors);
    }

    #[test]
    fn test_socket_addr() {
        let s = Settings::default();
        let addr = s.socket_addr().unwrap();
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn test_dev_secret_fallback() {
        let mut s = Settings::default();
        assert_eq!(s.jwt_secret(), DEV_SECRET);
        s.jwt_secret = Some(String::new());
        assert_eq!(s.jwt_secret(), DEV_SECRET);
        s.jwt_secret = Some("real".into());
        assert_eq!(s.jwt_secret(), "real");
    }

    #[test]
    fn test_token_ttl() {
        let s = Settings {
            token_expires_in_secs: 90,
            ..Settings::default()
        };
        assert_eq!(s.token_ttl(), Duration::seconds(90));
    }
}
