use std::env;

use crate::error::AppError;

/// Listen address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

impl ServerConfig {
    /// Reads `BACKEND_HOST` and `BACKEND_PORT`.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let host = env::var("BACKEND_HOST").unwrap_or(defaults.host);
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a port number, got '{raw}'"))
            })?,
            Err(_) => defaults.port,
        };
        Ok(Self { host, port })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
