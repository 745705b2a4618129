pub mod account_service;
pub mod dish_service;
pub mod error;
pub mod restaurant_service;
pub mod seeder;
pub mod weather_service;

pub use account_service::AccountService;
pub use dish_service::DishService;
pub use error::ServiceError;
pub use restaurant_service::RestaurantService;
pub use weather_service::WeatherForecastService;
