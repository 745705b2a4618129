pub mod policy;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::auth::{Claims, JwtError};
use crate::database::models::{Restaurant, Role};
use crate::database::DatabaseError;

pub use policy::{PolicyRegistry, Requirement};

/// The authenticated caller, decoded from the bearer token and passed
/// explicitly to every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl TryFrom<Claims> for Principal {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
            nationality: claims.nationality,
            date_of_birth: claims.date_of_birth,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceOperation {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("Forbidden")]
    Forbidden,

    #[error("Unknown policy: {0}")]
    UnknownPolicy(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Ownership rule: anyone may create or read; update and delete belong to
/// the creator and to administrators.
pub fn authorize_resource(
    principal: &Principal,
    operation: ResourceOperation,
    restaurant: &Restaurant,
) -> Result<(), AuthorizationError> {
    match operation {
        ResourceOperation::Create | ResourceOperation::Read => Ok(()),
        ResourceOperation::Update | ResourceOperation::Delete => {
            if principal.is_admin() || restaurant.is_created_by(principal.user_id) {
                Ok(())
            } else {
                Err(AuthorizationError::Forbidden)
            }
        }
    }
}
