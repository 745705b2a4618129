// handlers/public/restaurant.rs - anonymous restaurant reads

use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};

use crate::app::AppState;
use crate::dto::RestaurantDto;
use crate::listing::{PagedResult, RestaurantQueryParams};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /api/restaurant - paginated listing
///
/// Query: `pageNumber` (≥ 1) and `pageSize` (5, 10 or 15) are required;
/// `searchPhrase`, `sortBy` (Name, Description, Category) and
/// `sortDirection` (ASC/DESC) are optional.
///
/// Expected Output (Success):
/// ```json
/// {
///   "success": true,
///   "data": {
///     "items": [{ "id": 1, "name": "KFC", "city": "Kraków", "dishes": [] }],
///     "totalPages": 1,
///     "itemFrom": 1,
///     "itemTo": 5,
///     "totalItemsCount": 1
///   }
/// }
/// ```
pub async fn restaurant_list(
    State(state): State<AppState>,
    query: Result<Query<RestaurantQueryParams>, QueryRejection>,
) -> ApiResult<PagedResult<RestaurantDto>> {
    let Query(params) = query?;
    let page = state.restaurants.get_all(&params).await?;
    Ok(ApiResponse::success(page))
}

/// GET /api/restaurant/:id
pub async fn restaurant_get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<RestaurantDto> {
    let Path(id) = id?;
    let restaurant = state.restaurants.get_by_id(id).await?;
    Ok(ApiResponse::success(restaurant))
}
