use axum::extract::{rejection::PathRejection, Path, State};
use axum::Extension;
use serde::Serialize;

use crate::app::AppState;
use crate::authorization::Principal;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ServiceError;

#[derive(Debug, Serialize)]
pub struct PolicyResult {
    pub policy: String,
    pub satisfied: bool,
}

/// GET /api/account/me - the principal decoded from the bearer token
pub async fn account_me(Extension(principal): Extension<Principal>) -> ApiResult<Principal> {
    Ok(ApiResponse::success(principal))
}

/// GET /api/account/policy/:name
///
/// 200 when the caller satisfies the named policy, 403 when not, 404 for an
/// unknown policy name.
pub async fn account_policy(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    name: Result<Path<String>, PathRejection>,
) -> ApiResult<PolicyResult> {
    let Path(name) = name?;
    state
        .policies
        .authorize(&name, &principal, state.store.as_ref())
        .await
        .map_err(ServiceError::from)?;

    Ok(ApiResponse::success(PolicyResult {
        policy: name,
        satisfied: true,
    }))
}
