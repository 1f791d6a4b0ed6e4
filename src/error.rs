use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Contact not found: {reference}")]
    NotFound { reference: String },

    #[error("Invalid contact reference: {reference}")]
    InvalidReference { reference: String },

    #[error("Photo not found: {reference}")]
    PhotoNotFound { reference: String },

    #[error("Could not decode photo: {0}")]
    PhotoDecode(String),

    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl ContactError {
    pub fn not_found(reference: impl ToString) -> Self {
        Self::NotFound {
            reference: reference.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type ContactResult<T> = Result<T, ContactError>;
