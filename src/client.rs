mod error;
mod types;

pub use error::ApiError;
pub use types::{ClientConfig, ErrorBody, HOST_ENV, ScimUser, TOKEN_ENV, normalize_host};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

const SCIM_ME_PATH: &str = "/api/2.0/preview/scim/v2/Me";

const NOT_FOUND_CODES: &[&str] = &["RESOURCE_DOES_NOT_EXIST", "NOT_FOUND"];

/// Handle to a workspace REST API, passed to every lifecycle callback.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    host: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_base_url(config.token.clone(), config.host.clone())
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn with_base_url(token: String, base_url: String) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let header_value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ApiError::Config {
                message: "Invalid token format".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            host: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let url = self.url(path);
        self.send(self.client.get(&url).query(query)).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path);
        self.send(self.client.post(&url).json(body)).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let url = self.url(path);
        self.send(self.client.patch(&url).json(body)).await
    }

    pub async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = self.url(path);
        let request = match body {
            Some(body) => self.client.delete(&url).json(body),
            None => self.client.delete(&url),
        };
        self.send(request).await
    }

    /// Verifies the configured token by fetching the calling user.
    pub async fn current_user(&self) -> Result<ScimUser, ApiError> {
        let body = self.get(SCIM_ME_PATH, &[]).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Api {
            status: 200,
            error_code: "INVALID_RESPONSE".to_string(),
            message: format!("Failed to parse user: {}", e),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.host, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::debug!(status = status.as_u16(), "API response received");

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(|e| ApiError::Api {
                status: status.as_u16(),
                error_code: "INVALID_RESPONSE".to_string(),
                message: format!("Failed to parse response: {}", e),
            });
        }

        Err(error_from_response(status, &text))
    }
}

fn error_from_response(status: StatusCode, text: &str) -> ApiError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    let message = body
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                text.trim().to_string()
            }
        });
    let error_code = body.error_code.unwrap_or_default();

    if status == StatusCode::NOT_FOUND || NOT_FOUND_CODES.contains(&error_code.as_str()) {
        return ApiError::NotFound { message };
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ApiError::Auth { message };
    }

    ApiError::Api {
        status: status.as_u16(),
        error_code: if error_code.is_empty() {
            status.as_str().to_string()
        } else {
            error_code
        },
        message,
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("host", &self.host)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
