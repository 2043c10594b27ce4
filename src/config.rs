// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and passed
//! explicitly into the components that need it.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8000` |
//! | `JWT_SECRET` | HMAC secret for session tokens | Required |
//! | `JWT_EXPIRY` | Token lifetime in seconds | No expiry |
//! | `DATABASE_PATH` | redb database file | In-memory store |
//! | `AUTH_SCHEME` | Gate for protected routes (`bearer` or `basic`) | `bearer` |
//! | `TLS_CERT_PATH` / `TLS_KEY_PATH` | PEM files for HTTPS | Plain HTTP |
//! | `SEED_USER_NAME` / `SEED_USER_PASSWORD` | User created at startup if absent | None |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";
pub const JWT_EXPIRY_ENV: &str = "JWT_EXPIRY";
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";
pub const AUTH_SCHEME_ENV: &str = "AUTH_SCHEME";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const SEED_USER_NAME_ENV: &str = "SEED_USER_NAME";
pub const SEED_USER_PASSWORD_ENV: &str = "SEED_USER_PASSWORD";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Credential scheme guarding the protected routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    #[default]
    Bearer,
    /// Legacy `Authorization: Basic` with plaintext comparison.
    Basic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry: Option<Duration>,
    pub database_path: Option<PathBuf>,
    pub auth_scheme: AuthScheme,
    pub tls: Option<TlsPaths>,
    pub seed_user: Option<SeedUser>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match get(PORT_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: PORT_ENV,
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = get(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
        let jwt_expiry = match get(JWT_EXPIRY_ENV) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: JWT_EXPIRY_ENV,
                        value,
                    })
                }
            },
            None => None,
        };

        let auth_scheme = match get(AUTH_SCHEME_ENV) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "bearer" => AuthScheme::Bearer,
                "basic" => AuthScheme::Basic,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: AUTH_SCHEME_ENV,
                        value,
                    })
                }
            },
            None => AuthScheme::default(),
        };

        let log_format = match get(LOG_FORMAT_ENV).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        let seed_user = match (get(SEED_USER_NAME_ENV), get(SEED_USER_PASSWORD_ENV)) {
            (Some(user_name), Some(password)) => Some(SeedUser {
                user_name,
                password,
            }),
            (Some(_), None) => return Err(ConfigError::Missing(SEED_USER_PASSWORD_ENV)),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_expiry,
            database_path: get(DATABASE_PATH_ENV).map(PathBuf::from),
            auth_scheme,
            tls,
            seed_user,
            log_format,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Invalid {
            var: HOST_ENV,
            value: self.host.clone(),
        })
    }
}
