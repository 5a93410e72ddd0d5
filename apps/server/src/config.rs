use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use vnstock_core::constants::DEFAULT_LEG_TIMEOUT;
use vnstock_core::SourceMode;

pub const DEFAULT_API_VERSION: &str = "1.0";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub provider_timeout: Duration,
    pub source_mode: SourceMode,
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            provider_timeout: DEFAULT_LEG_TIMEOUT,
            source_mode: SourceMode::Lenient,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(default)
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let raw_addr =
            std::env::var("VNSTOCK_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .with_context(|| format!("Invalid VNSTOCK_LISTEN_ADDR '{}'", raw_addr))?;
        let cors_allow = std::env::var("VNSTOCK_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let source_mode = if env_flag("VNSTOCK_STRICT_SOURCE") {
            SourceMode::Strict
        } else {
            SourceMode::Lenient
        };
        let api_version = std::env::var("VNSTOCK_API_VERSION")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_version);

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout: env_millis("VNSTOCK_REQUEST_TIMEOUT_MS", defaults.request_timeout),
            provider_timeout: env_millis("VNSTOCK_PROVIDER_TIMEOUT_MS", defaults.provider_timeout),
            source_mode,
            api_version,
        })
    }
}
