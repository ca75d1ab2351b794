use thiserror::Error;

#[derive(Debug, Error)]
pub enum TouchError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} must be positive")]
    NonPositive { field: String },

    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    #[error("Unknown period unit: {0} (expected minutes, hours or days)")]
    UnknownPeriodUnit(String),

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Failed to read '{key}': {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Failed to write '{key}': {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl TouchError {
    /// True for errors caused by bad user input rather than storage.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TouchError::BlankField { .. }
                | TouchError::NonPositive { .. }
                | TouchError::NotANumber { .. }
                | TouchError::UnknownPeriodUnit(_)
        )
    }

    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            TouchError::StorageRead { .. } | TouchError::StorageWrite { .. }
        )
    }
}

pub type TouchResult<T> = Result<T, TouchError>;
