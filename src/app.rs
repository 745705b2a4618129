use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, warn};

use crate::authorization::PolicyRegistry;
use crate::config::AppConfig;
use crate::database::Store;
use crate::error::ApiError;
use crate::handlers;
use crate::middleware::{jwt_auth_middleware, request_time_middleware};
use crate::services::{AccountService, DishService, RestaurantService, WeatherForecastService};

/// Shared, cheaply clonable state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub policies: Arc<PolicyRegistry>,
    pub restaurants: RestaurantService,
    pub dishes: DishService,
    pub accounts: AccountService,
    pub weather: WeatherForecastService,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        Self {
            restaurants: RestaurantService::new(store.clone()),
            dishes: DishService::new(store.clone()),
            accounts: AccountService::new(store.clone(), config.auth.clone()),
            weather: WeatherForecastService::new(),
            policies: Arc::new(PolicyRegistry::standard()),
            config: Arc::new(config),
            store,
        }
    }
}

/// Full router with every route group and the global middleware stack
pub fn app(state: AppState) -> Router {
    let max_body = state.config.api.max_request_size_bytes;
    let cors = cors_layer(&state.config);

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(restaurant_public_routes())
        .merge(account_public_routes())
        .merge(weather_routes())
        // Protected
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn_with_state(state.clone(), request_time_middleware))
                .layer(DefaultBodyLimit::max(max_body)),
        )
        .with_state(state)
}

fn restaurant_public_routes() -> Router<AppState> {
    use handlers::public::{dish, restaurant};

    Router::new()
        .route("/api/restaurant", get(restaurant::restaurant_list))
        .route("/api/restaurant/:id", get(restaurant::restaurant_get))
        .route("/api/restaurant/:id/dish", get(dish::dish_list))
        .route("/api/restaurant/:id/dish/:dish_id", get(dish::dish_get))
}

fn account_public_routes() -> Router<AppState> {
    use handlers::public::account;

    Router::new()
        .route("/api/account/register", post(account::account_register))
        .route("/api/account/login", post(account::account_login))
}

fn weather_routes() -> Router<AppState> {
    use handlers::public::weather;

    Router::new()
        .route("/weatherforecast", get(weather::weather_get))
        .route("/weatherforecast/generate", post(weather::weather_generate))
}

// Paths shared with the public groups merge per method, so GET stays
// anonymous while POST/PUT/DELETE require a token.
fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{account, dish, restaurant};

    Router::new()
        .route("/api/restaurant", post(restaurant::restaurant_create))
        .route(
            "/api/restaurant/:id",
            axum::routing::put(restaurant::restaurant_update).delete(restaurant::restaurant_delete),
        )
        .route(
            "/api/restaurant/:id/dish",
            post(dish::dish_create).delete(dish::dish_delete_all),
        )
        .route("/api/restaurant/:id/dish/:dish_id", delete(dish::dish_delete))
        .route("/api/account/me", get(account::account_me))
        .route("/api/account/policy/:name", get(account::account_policy))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }

    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(cors::Any);

    if config.security.cors_origins.iter().any(|o| o == "*") {
        return base.allow_origin(cors::Any);
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    base.allow_origin(origins)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);
    ApiError::InternalServerError(crate::error::INTERNAL_ERROR_MESSAGE.to_string()).into_response()
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Restaurant API",
            "version": version,
            "environment": state.config.environment,
            "store": state.store.backend(),
            "endpoints": {
                "restaurants": "/api/restaurant[/:id] (GET public, mutations protected)",
                "dishes": "/api/restaurant/:id/dish[/:dishId] (GET public, mutations protected)",
                "account": "/api/account/register, /api/account/login (public)",
                "me": "/api/account/me, /api/account/policy/:name (protected)",
                "weather": "/weatherforecast, /weatherforecast/generate (public)",
            },
            "policies": state.policies.names().collect::<Vec<_>>(),
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": state.store.backend()
                }
            })),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
