use thiserror::Error;

pub type Result<T> = std::result::Result<T, SiteError>;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Language code other than `zh` or `en` given where one is required
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("unknown record kind: {0}")]
    InvalidKind(String),
}
