use serde::Deserialize;

use super::ApiError;

pub const HOST_ENV: &str = "DATABRICKS_HOST";
pub const TOKEN_ENV: &str = "DATABRICKS_TOKEN";

#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub host: String,
    pub token: String,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: normalize_host(&host.into()),
            token: token.into(),
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        let host = read_env(HOST_ENV)?;
        let token = read_env(TOKEN_ENV)?;
        Ok(Self::new(host, token))
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

fn read_env(name: &str) -> Result<String, ApiError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Config {
            message: format!("{} is not set", name),
        })
}

// NOTE: Bare workspace hostnames are accepted and default to https
pub fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Error payload shape shared by the REST (`error_code`/`message`) and SCIM
/// (`detail`) endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().or(self.detail.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
