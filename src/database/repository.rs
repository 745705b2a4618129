use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Dish, NewDish, NewRestaurant, NewUser, Restaurant, RestaurantChanges, User};
use crate::listing::RestaurantQuery;

/// Restaurant aggregate access. Loaded restaurants always carry their
/// address and dishes.
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// One page of the filtered, sorted listing plus the filtered total.
    async fn list_restaurants(&self, query: &RestaurantQuery) -> Result<(Vec<Restaurant>, u64), DatabaseError>;

    async fn find_restaurant(&self, id: i32) -> Result<Option<Restaurant>, DatabaseError>;

    /// Insert the restaurant and its address as one unit, returning the new id.
    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<i32, DatabaseError>;

    async fn update_restaurant(&self, id: i32, changes: RestaurantChanges) -> Result<(), DatabaseError>;

    /// Removes the restaurant together with its address and dishes.
    async fn delete_restaurant(&self, id: i32) -> Result<(), DatabaseError>;

    async fn count_restaurants(&self) -> Result<u64, DatabaseError>;

    async fn count_created_by(&self, user_id: i32) -> Result<u64, DatabaseError>;
}

#[async_trait]
pub trait DishRepository: Send + Sync {
    async fn insert_dish(&self, restaurant_id: i32, dish: NewDish) -> Result<i32, DatabaseError>;

    async fn list_dishes(&self, restaurant_id: i32) -> Result<Vec<Dish>, DatabaseError>;

    /// `None` when the dish does not exist or belongs to another restaurant.
    async fn find_dish(&self, restaurant_id: i32, dish_id: i32) -> Result<Option<Dish>, DatabaseError>;

    /// Returns how many dishes were removed.
    async fn delete_dishes(&self, restaurant_id: i32) -> Result<u64, DatabaseError>;

    async fn delete_dish(&self, restaurant_id: i32, dish_id: i32) -> Result<bool, DatabaseError>;
}

/// Emails are matched case-insensitively everywhere.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError>;

    async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError>;

    /// Fails with [`DatabaseError::UniqueViolation`] when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<i32, DatabaseError>;
}

/// Everything the services need from persistence.
#[async_trait]
pub trait Store: RestaurantRepository + DishRepository + UserRepository {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    /// Short backend name for logs and the health endpoint
    fn backend(&self) -> &'static str;
}
