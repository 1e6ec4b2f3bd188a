use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("datastore unavailable: {0}")]
    Datastore(anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
