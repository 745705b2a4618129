pub mod dish;
pub mod restaurant;
pub mod role;
pub mod user;

pub use dish::{Dish, NewDish};
pub use restaurant::{Address, NewRestaurant, Restaurant, RestaurantChanges};
pub use role::Role;
pub use user::{NewUser, User};
