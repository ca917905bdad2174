use thiserror::Error;

/// Failure to read the bundled Salawat dataset. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset not found: {0}")]
    MissingResource(String),

    #[error("Dataset is malformed: {0}")]
    ParseError(String),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::ParseError(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Notification permission denied")]
    PermissionDenied,

    #[error("Notification service error: {0}")]
    Platform(String),
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Could not open the store page: {0}")]
    StoreUnavailable(String),
}

/// Startup failures surfaced from `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Preferences(#[from] PreferenceError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
