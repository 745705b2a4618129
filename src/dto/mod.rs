//! Request and response bodies. Field names are camelCase on the wire.

pub mod account;
pub mod dish;
pub mod restaurant;
pub mod weather;

pub use account::{LoginDto, RegisterUserDto, TokenDto};
pub use dish::{CreateDishDto, DishDto};
pub use restaurant::{CreateRestaurantDto, CreatedDto, RestaurantDto, UpdateRestaurantDto};
pub use weather::{GenerateForecastParams, WeatherForecast};
