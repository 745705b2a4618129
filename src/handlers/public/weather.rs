use axum::extract::{rejection::QueryRejection, Query, State};

use crate::app::AppState;
use crate::dto::{GenerateForecastParams, WeatherForecast};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /weatherforecast - five random forecasts
pub async fn weather_get(State(state): State<AppState>) -> ApiResult<Vec<WeatherForecast>> {
    Ok(ApiResponse::success(state.weather.get_default()))
}

/// POST /weatherforecast/generate?count=3&min=-5&max=30
///
/// `count` must be 1..=100 and `max` greater than `min`.
pub async fn weather_generate(
    State(state): State<AppState>,
    query: Result<Query<GenerateForecastParams>, QueryRejection>,
) -> ApiResult<Vec<WeatherForecast>> {
    let Query(params) = query?;
    let (count, min, max) = params.validate()?;
    Ok(ApiResponse::success(state.weather.get(count, min, max)))
}
