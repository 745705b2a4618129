use thiserror::Error;

use crate::auth::password::PasswordError;
use crate::auth::JwtError;
use crate::authorization::AuthorizationError;
use crate::database::DatabaseError;
use crate::validation::ValidationErrors;

/// Failure kinds a service operation can report. Translated to HTTP
/// statuses only at the handler boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Unauthenticated(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Database error: {0}")]
    Database(DatabaseError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation(ValidationErrors::single(field, message))
    }
}

impl From<DatabaseError> for ServiceError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ServiceError::NotFound(msg),
            other => ServiceError::Database(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<AuthorizationError> for ServiceError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::Forbidden => ServiceError::Forbidden,
            AuthorizationError::UnknownPolicy(name) => ServiceError::NotFound(format!("Policy '{}' not found", name)),
            AuthorizationError::Database(e) => e.into(),
        }
    }
}
