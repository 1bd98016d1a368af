use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbxError {
    #[error(transparent)]
    Pair(#[from] crate::pair::PairError),

    #[error(transparent)]
    Api(#[from] crate::client::ApiError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
