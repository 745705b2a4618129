// handlers/public/account.rs - registration and token acquisition

use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::app::AppState;
use crate::dto::{CreatedDto, LoginDto, RegisterUserDto, TokenDto};
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/account/register
///
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
///
/// A taken email is reported as a validation error on `email`.
pub async fn account_register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUserDto>, JsonRejection>,
) -> ApiResult<CreatedDto> {
    let Json(dto) = payload?;
    let id = state.accounts.register(dto).await?;
    Ok(ApiResponse::success(CreatedDto { id }))
}

/// POST /api/account/login
///
/// Expected Output (Success):
/// ```json
/// { "success": true, "data": { "token": "eyJhbGciOiJIUzI1NiI..." } }
/// ```
///
/// Unknown email and wrong password both answer 401 with the same message.
pub async fn account_login(
    State(state): State<AppState>,
    payload: Result<Json<LoginDto>, JsonRejection>,
) -> ApiResult<TokenDto> {
    let Json(dto) = payload?;
    let token = state.accounts.login(dto).await?;
    Ok(ApiResponse::success(TokenDto { token }))
}
