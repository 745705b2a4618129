use axum::extract::{rejection::PathRejection, Path, State};

use crate::app::AppState;
use crate::dto::DishDto;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/restaurant/:id/dish
pub async fn dish_list(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Vec<DishDto>> {
    let Path(restaurant_id) = path?;
    let dishes = state.dishes.get_all(restaurant_id).await?;
    Ok(ApiResponse::success(dishes))
}

/// GET /api/restaurant/:id/dish/:dishId
pub async fn dish_get(
    State(state): State<AppState>,
    path: Result<Path<(i32, i32)>, PathRejection>,
) -> ApiResult<DishDto> {
    let Path((restaurant_id, dish_id)) = path?;
    let dish = state.dishes.get_by_id(restaurant_id, dish_id).await?;
    Ok(ApiResponse::success(dish))
}
