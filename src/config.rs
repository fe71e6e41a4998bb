// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values and the
//! typed configuration structs handed to each component at construction.
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Service | Description | Default |
//! |----------|---------|-------------|---------|
//! | `JWT_SECRET` | gateway | Session token signing secret (>= 32 bytes) | Required |
//! | `JWT_EXPIRATION_MS` | gateway | Session token lifetime in milliseconds | `86400000` |
//! | `SERVICE_B_URL` | gateway | Base URL of the transformer service | `http://localhost:8081` |
//! | `SERVICE_B_TIMEOUT_MS` | gateway | Timeout for calls to the transformer | `5000` |
//! | `INTERNAL_API_TOKEN` | both | Shared internal secret | Required |
//! | `DATA_DIR` | gateway | Directory holding the embedded database | `./data` |
//! | `HOST` | both | Server bind address | `0.0.0.0` |
//! | `PORT` | both | Server bind port | `8080` gateway, `8081` transformer |
//! | `LOG_FORMAT` | both | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | both | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Environment variable name for the session token signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the session token lifetime (milliseconds).
pub const JWT_EXPIRATION_MS_ENV: &str = "JWT_EXPIRATION_MS";

/// Environment variable name for the transformer base URL.
pub const SERVICE_B_URL_ENV: &str = "SERVICE_B_URL";

/// Environment variable name for the outbound transformer timeout (milliseconds).
pub const SERVICE_B_TIMEOUT_MS_ENV: &str = "SERVICE_B_TIMEOUT_MS";

/// Environment variable name for the shared internal secret.
pub const INTERNAL_API_TOKEN_ENV: &str = "INTERNAL_API_TOKEN";

/// Environment variable name for the data directory path.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Environment variable name for the bind host.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default session token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL_MS: u64 = 86_400_000;

/// Default transformer base URL.
pub const DEFAULT_SERVICE_B_URL: &str = "http://localhost:8081";

/// Default outbound call timeout.
pub const DEFAULT_SERVICE_B_TIMEOUT_MS: u64 = 5_000;

/// Default data directory.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default gateway port.
pub const DEFAULT_GATEWAY_PORT: u16 = 8080;

/// Default transformer port.
pub const DEFAULT_TRANSFORMER_PORT: u16 = 8081;

/// HMAC-SHA256 signing needs at least 256 bits of key material.
pub const MIN_SIGNING_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Configuration for the gateway service (registration, login, processing).
#[derive(Clone)]
pub struct GatewayConfig {
    /// Symmetric key material for session token signatures.
    pub signing_secret: Vec<u8>,
    /// Session token lifetime.
    pub token_ttl: Duration,
    /// Base URL of the transformer service.
    pub downstream_base_url: Url,
    /// Timeout applied to every transformer call.
    pub downstream_timeout: Duration,
    /// Shared secret attached to transformer calls.
    pub internal_secret: String,
    /// Directory holding the embedded database.
    pub data_dir: PathBuf,
    /// Listen address.
    pub bind_addr: SocketAddr,
}

// Secrets stay out of debug output.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("signing_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("downstream_base_url", &self.downstream_base_url.as_str())
            .field("downstream_timeout", &self.downstream_timeout)
            .field("internal_secret", &"<redacted>")
            .field("data_dir", &self.data_dir)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl GatewayConfig {
    /// Load from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_optional)
    }

    /// Load using an arbitrary variable lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let signing_secret = lookup(JWT_SECRET_ENV)
            .ok_or(ConfigError::Missing(JWT_SECRET_ENV))?
            .into_bytes();
        if signing_secret.len() < MIN_SIGNING_SECRET_LEN {
            return Err(ConfigError::Invalid {
                name: JWT_SECRET_ENV,
                reason: format!("must be at least {MIN_SIGNING_SECRET_LEN} bytes"),
            });
        }

        let token_ttl_ms = parse_or(&lookup, JWT_EXPIRATION_MS_ENV, DEFAULT_TOKEN_TTL_MS)?;
        let timeout_ms = parse_or(&lookup, SERVICE_B_TIMEOUT_MS_ENV, DEFAULT_SERVICE_B_TIMEOUT_MS)?;

        let raw_url =
            lookup(SERVICE_B_URL_ENV).unwrap_or_else(|| DEFAULT_SERVICE_B_URL.to_string());
        let downstream_base_url = parse_base_url(&raw_url)?;

        let internal_secret = internal_secret(&lookup)?;

        let data_dir = lookup(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            signing_secret,
            token_ttl: Duration::from_millis(token_ttl_ms),
            downstream_base_url,
            downstream_timeout: Duration::from_millis(timeout_ms),
            internal_secret,
            data_dir,
            bind_addr: bind_addr(&lookup, DEFAULT_GATEWAY_PORT)?,
        })
    }
}

/// Configuration for the transformer service.
#[derive(Clone)]
pub struct TransformerConfig {
    /// Shared secret every inbound `/api/` call must present.
    pub internal_secret: String,
    /// Listen address.
    pub bind_addr: SocketAddr,
}

impl std::fmt::Debug for TransformerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerConfig")
            .field("internal_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

impl TransformerConfig {
    /// Load from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_optional)
    }

    /// Load using an arbitrary variable lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            internal_secret: internal_secret(&lookup)?,
            bind_addr: bind_addr(&lookup, DEFAULT_TRANSFORMER_PORT)?,
        })
    }
}

fn internal_secret<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(INTERNAL_API_TOKEN_ENV).ok_or(ConfigError::Missing(INTERNAL_API_TOKEN_ENV))
}

fn parse_or<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
            name,
            reason: format!("{e}"),
        }),
        None => Ok(default),
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        name: SERVICE_B_URL_ENV,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            name: SERVICE_B_URL_ENV,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn bind_addr<F>(lookup: &F, default_port: u16) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match lookup(PORT_ENV) {
        Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
            name: PORT_ENV,
            reason: e.to_string(),
        })?,
        None => default_port,
    };

    format!("{host}:{port}")
        .parse()
        .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: HOST_ENV,
            reason: e.to_string(),
        })
}

/// Read a variable, treating blank values as unset.
pub fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
