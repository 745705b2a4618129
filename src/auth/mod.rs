pub mod password;

use chrono::{Duration, NaiveDate, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthenticationSettings;
use crate::database::models::{Role, User};

/// Token payload. `iss` and `aud` both carry the configured issuer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User, settings: &AuthenticationSettings) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::days(settings.jwt_expire_days)).timestamp();

        Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            nationality: user.nationality.clone(),
            date_of_birth: user.date_of_birth,
            iss: settings.jwt_issuer.clone(),
            aud: settings.jwt_issuer.clone(),
            iat: now.timestamp(),
            exp,
        }
    }

    pub fn user_id(&self) -> Result<i32, JwtError> {
        self.sub.parse().map_err(|_| JwtError::InvalidSubject)
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("JWT signing key not configured")]
    MissingKey,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Token subject is not a user id")]
    InvalidSubject,
}

/// Sign a token for `user` valid for the configured number of days
pub fn generate_jwt(settings: &AuthenticationSettings, user: &User) -> Result<String, JwtError> {
    encode_claims(settings, &Claims::for_user(user, settings))
}

pub fn encode_claims(settings: &AuthenticationSettings, claims: &Claims) -> Result<String, JwtError> {
    if settings.jwt_key.is_empty() {
        return Err(JwtError::MissingKey);
    }

    let encoding_key = EncodingKey::from_secret(settings.jwt_key.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature, expiry, issuer and audience, then return the claims
pub fn validate_jwt(settings: &AuthenticationSettings, token: &str) -> Result<Claims, JwtError> {
    if settings.jwt_key.is_empty() {
        return Err(JwtError::MissingKey);
    }

    let decoding_key = DecodingKey::from_secret(settings.jwt_key.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[settings.jwt_issuer.as_str()]);
    validation.set_audience(&[settings.jwt_issuer.as_str()]);

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}
