use std::sync::Arc;

use tracing::{info, warn};

use super::error::ServiceError;
use crate::auth::{self, password};
use crate::config::AuthenticationSettings;
use crate::database::models::NewUser;
use crate::database::{DatabaseError, Store};
use crate::dto::{LoginDto, RegisterUserDto};

pub const EMAIL_TAKEN: &str = "That email is taken";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
    settings: AuthenticationSettings,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>, settings: AuthenticationSettings) -> Self {
        Self { store, settings }
    }

    /// Create a user. Field problems and a taken email come back as
    /// validation failures; nothing is written in either case.
    pub async fn register(&self, dto: RegisterUserDto) -> Result<i32, ServiceError> {
        let role = dto.validate()?;
        let email = dto.email.trim().to_string();

        if self.store.email_exists(&email).await? {
            return Err(ServiceError::validation("email", EMAIL_TAKEN));
        }

        let password_hash = password::hash_password(&dto.password)?;
        let id = match self
            .store
            .insert_user(NewUser {
                email,
                password_hash,
                date_of_birth: dto.date_of_birth,
                nationality: dto.nationality,
                role,
            })
            .await
        {
            Ok(id) => id,
            // lost a race with a concurrent registration
            Err(DatabaseError::UniqueViolation(_)) => return Err(ServiceError::validation("email", EMAIL_TAKEN)),
            Err(e) => return Err(e.into()),
        };

        info!("Registered user {} with role {}", id, role);
        Ok(id)
    }

    /// Verify credentials and issue a bearer token
    pub async fn login(&self, dto: LoginDto) -> Result<String, ServiceError> {
        let user = match self.store.find_user_by_email(dto.email.trim()).await? {
            Some(user) => user,
            None => {
                password::verify_dummy(&dto.password);
                warn!("Login refused: unknown email");
                return Err(ServiceError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !password::verify_password(&dto.password, &user.password_hash)? {
            warn!("Login refused for user {}: wrong password", user.id);
            return Err(ServiceError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }

        let token = auth::generate_jwt(&self.settings, &user)?;
        info!("User {} logged in", user.id);
        Ok(token)
    }
}
