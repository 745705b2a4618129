use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Path, State,
};
use axum::{Extension, Json};

use crate::app::AppState;
use crate::authorization::Principal;
use crate::dto::{CreateDishDto, CreatedDto};
use crate::middleware::{ApiResponse, ApiResult};

/// POST /api/restaurant/:id/dish
///
/// Expected Input:
/// ```json
/// { "name": "Zinger", "description": "Spicy burger", "price": "10.50" }
/// ```
pub async fn dish_create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<CreateDishDto>, JsonRejection>,
) -> ApiResult<CreatedDto> {
    let Path(restaurant_id) = path?;
    let Json(dto) = payload?;
    let id = state.dishes.create(&principal, restaurant_id, dto).await?;
    Ok(ApiResponse::created(
        CreatedDto { id },
        format!("/api/restaurant/{}/dish/{}", restaurant_id, id),
    ))
}

/// DELETE /api/restaurant/:id/dish - clears every dish of the restaurant
pub async fn dish_delete_all(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(restaurant_id) = path?;
    state.dishes.remove_all(&principal, restaurant_id).await?;
    Ok(ApiResponse::no_content())
}

/// DELETE /api/restaurant/:id/dish/:dishId
pub async fn dish_delete(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<()> {
    let Path((restaurant_id, dish_id)) = path?;
    state.dishes.remove(&principal, restaurant_id, dish_id).await?;
    Ok(ApiResponse::no_content())
}
