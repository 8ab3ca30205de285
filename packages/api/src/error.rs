use showcase::BackendError;

/// Errors from configuration and the OAuth session flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not set")]
    MissingConfig(&'static str),
    #[error("invalid url {0}")]
    InvalidUrl(String),
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Backend(#[from] BackendError),
}
