use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use mp_core::TagCapabilities;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is not valid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub api_key: String,
    pub capabilities: TagCapabilities,
    pub cors_allowed_origin: Option<HeaderValue>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let listen_addr = lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into());
        let listen_addr: SocketAddr = listen_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "LISTEN_ADDR",
            value: listen_addr.clone(),
        })?;

        let api_key = lookup("MP_API_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::Missing("MP_API_KEY"))?;

        let capabilities = TagCapabilities {
            tags_enabled: flag(&lookup, "AWS_TAGS_NEW_MP")?,
            view_in_edit: flag(&lookup, "ENABLE_AWS_TAGS_VIEW_IN_EDIT_MODAL")?,
            edit_in_edit: flag(&lookup, "ENABLE_AWS_TAGS_EDITING_IN_EDIT_MODAL")?,
        };

        let cors_allowed_origin = lookup("CORS_ALLOWED_ORIGIN")
            .map(|origin| {
                HeaderValue::from_str(&origin).map_err(|_| ConfigError::Invalid {
                    name: "CORS_ALLOWED_ORIGIN",
                    value: origin.clone(),
                })
            })
            .transpose()?;

        Ok(Self {
            listen_addr,
            api_key,
            capabilities,
            cors_allowed_origin,
        })
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<bool, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(false);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}
