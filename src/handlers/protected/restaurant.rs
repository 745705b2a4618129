// handlers/protected/restaurant.rs - restaurant mutations

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::{Extension, Json};

use crate::app::AppState;
use crate::authorization::Principal;
use crate::dto::{CreateRestaurantDto, CreatedDto, UpdateRestaurantDto};
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/restaurant - the caller becomes the owner
///
/// Expected Input:
/// ```json
/// {
///   "name": "KFC",
///   "category": "Fast Food",
///   "hasDelivery": true,
///   "city": "Kraków",
///   "street": "Długa 5",
///   "postalCode": "30-001"
/// }
/// ```
///
/// Answers 201 with `{"id": n}` and `Location: /api/restaurant/{n}`.
pub async fn restaurant_create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CreateRestaurantDto>, JsonRejection>,
) -> ApiResult<CreatedDto> {
    let Json(dto) = payload?;
    let id = state.restaurants.create(&principal, dto).await?;
    Ok(ApiResponse::created(CreatedDto { id }, format!("/api/restaurant/{}", id)))
}

/// PUT /api/restaurant/:id - owner or admin only
pub async fn restaurant_update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateRestaurantDto>, JsonRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    state.restaurants.update(&principal, id, dto).await?;
    Ok(ApiResponse::success(()))
}

/// DELETE /api/restaurant/:id - owner or admin only
pub async fn restaurant_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.restaurants.delete(&principal, id).await?;
    Ok(ApiResponse::no_content())
}
