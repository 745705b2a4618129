use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::database::models::Role;
use crate::validation::ValidationErrors;

pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Expected Input:
/// ```json
/// {
///   "email": "anna@example.com",
///   "password": "secret1",
///   "confirmPassword": "secret1",
///   "dateOfBirth": "1990-05-17",
///   "nationality": "Polish",
///   "roleId": 1
/// }
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterUserDto {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub role_id: Option<i32>,
}

impl RegisterUserDto {
    /// Field checks that need no store access. Email uniqueness is checked by
    /// the account service.
    pub fn validate(&self) -> Result<Role, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if errors.require("email", &self.email) && !self.email.trim().validate_email() {
            errors.add("email", "'email' is not a valid email address.");
        }

        if self.password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.add(
                "password",
                format!("The length of 'password' must be at least {} characters.", PASSWORD_MIN_LENGTH),
            );
        }

        if self.confirm_password != self.password {
            errors.add("confirmPassword", "'confirmPassword' must be equal to 'password'.");
        }

        let role = match self.role_id {
            None => Some(Role::DEFAULT),
            Some(id) => Role::from_id(id).filter(|r| r.is_self_assignable()),
        };
        if role.is_none() {
            errors.add("roleId", "'roleId' must be 1 (User) or 2 (Manager).");
        }

        match role {
            Some(role) if errors.is_empty() => Ok(role),
            _ => Err(errors),
        }
    }
}

// Plaintext passwords never reach a log line
impl std::fmt::Debug for RegisterUserDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserDto")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("date_of_birth", &self.date_of_birth)
            .field("nationality", &self.nationality)
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Expected Input:
/// ```json
/// { "email": "anna@example.com", "password": "secret1" }
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginDto")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDto {
    pub token: String,
}
