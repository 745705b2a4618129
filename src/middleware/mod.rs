pub mod auth;
pub mod request_time;
pub mod response;

pub use auth::jwt_auth_middleware;
pub use request_time::request_time_middleware;
pub use response::{ApiResponse, ApiResult};
