//! Error Types for the Advisory Engine

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    /// A submitted profile field failed a domain rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Chat message was empty or whitespace-only
    #[error("Message cannot be empty")]
    EmptyMessage,

    /// Operation requires a financial profile the user has not created
    #[error("Financial profile not found")]
    ProfileNotFound,

    /// User already has a profile and tried to create another
    #[error("Financial profile already exists")]
    ProfileExists,

    /// No advice record with this id for the requesting user
    #[error("Advice not found: {0}")]
    AdviceNotFound(Uuid),

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(String),

    /// Anything that should never happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdvisorError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::EmptyMessage => "Message cannot be empty".into(),
            Self::ProfileNotFound => {
                "Please complete your financial profile first so I can provide personalized advice."
                    .into()
            }
            Self::ProfileExists => {
                "You already have a financial profile. You can update it instead.".into()
            }
            Self::AdviceNotFound(_) => "The requested advice could not be found.".into(),
            Self::Store(_) | Self::Internal(_) => {
                "An unexpected error occurred. Please try again.".into()
            }
        }
    }
}
