pub mod engine;
pub mod page;
pub mod params;
pub mod sql;
pub mod types;

pub use engine::apply;
pub use page::PagedResult;
pub use params::RestaurantQueryParams;
pub use sql::{ListingSql, RESTAURANT_COLUMNS};
pub use types::*;
