//! In-memory store for tests and database-less development runs

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Dish, NewDish, NewRestaurant, NewUser, Restaurant, RestaurantChanges, User};
use crate::database::repository::{DishRepository, RestaurantRepository, Store, UserRepository};
use crate::listing::{self, RestaurantQuery};

#[derive(Default)]
struct Tables {
    // stored without dishes; they are attached on read
    restaurants: BTreeMap<i32, Restaurant>,
    dishes: BTreeMap<i32, Dish>,
    users: BTreeMap<i32, User>,
    next_restaurant_id: i32,
    next_dish_id: i32,
    next_user_id: i32,
}

impl Tables {
    fn with_dishes(&self, restaurant: &Restaurant) -> Restaurant {
        let mut loaded = restaurant.clone();
        loaded.dishes = self
            .dishes
            .values()
            .filter(|d| d.restaurant_id == restaurant.id)
            .cloned()
            .collect();
        loaded
    }

    // Unicode folding, same as `LOWER()` in the SQL store
    fn user_by_email(&self, email: &str) -> Option<&User> {
        let wanted = email.to_lowercase();
        self.users.values().find(|u| u.email.to_lowercase() == wanted)
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Thread-safe store backed by ordered maps, so iteration follows id order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantRepository for MemoryStore {
    async fn list_restaurants(&self, query: &RestaurantQuery) -> Result<(Vec<Restaurant>, u64), DatabaseError> {
        let tables = self.tables.read().await;
        let all = tables.restaurants.values().map(|r| tables.with_dishes(r));
        Ok(listing::apply(all, query))
    }

    async fn find_restaurant(&self, id: i32) -> Result<Option<Restaurant>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.restaurants.get(&id).map(|r| tables.with_dishes(r)))
    }

    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<i32, DatabaseError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_restaurant_id);
        tables.restaurants.insert(
            id,
            Restaurant {
                id,
                name: restaurant.name,
                description: restaurant.description,
                category: restaurant.category,
                has_delivery: restaurant.has_delivery,
                contact_email: restaurant.contact_email,
                contact_number: restaurant.contact_number,
                created_by_id: restaurant.created_by_id,
                address: restaurant.address,
                dishes: vec![],
            },
        );
        Ok(id)
    }

    async fn update_restaurant(&self, id: i32, changes: RestaurantChanges) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        let restaurant = tables
            .restaurants
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("restaurant {}", id)))?;
        restaurant.name = changes.name;
        restaurant.description = changes.description;
        restaurant.has_delivery = changes.has_delivery;
        Ok(())
    }

    async fn delete_restaurant(&self, id: i32) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.restaurants.remove(&id).is_none() {
            return Err(DatabaseError::NotFound(format!("restaurant {}", id)));
        }
        tables.dishes.retain(|_, d| d.restaurant_id != id);
        Ok(())
    }

    async fn count_restaurants(&self) -> Result<u64, DatabaseError> {
        Ok(self.tables.read().await.restaurants.len() as u64)
    }

    async fn count_created_by(&self, user_id: i32) -> Result<u64, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.restaurants.values().filter(|r| r.is_created_by(user_id)).count() as u64)
    }
}

#[async_trait]
impl DishRepository for MemoryStore {
    async fn insert_dish(&self, restaurant_id: i32, dish: NewDish) -> Result<i32, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.restaurants.contains_key(&restaurant_id) {
            return Err(DatabaseError::NotFound(format!("restaurant {}", restaurant_id)));
        }
        let id = next_id(&mut tables.next_dish_id);
        tables.dishes.insert(
            id,
            Dish {
                id,
                restaurant_id,
                name: dish.name,
                description: dish.description,
                price: dish.price,
            },
        );
        Ok(id)
    }

    async fn list_dishes(&self, restaurant_id: i32) -> Result<Vec<Dish>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .dishes
            .values()
            .filter(|d| d.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn find_dish(&self, restaurant_id: i32, dish_id: i32) -> Result<Option<Dish>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .dishes
            .get(&dish_id)
            .filter(|d| d.restaurant_id == restaurant_id)
            .cloned())
    }

    async fn delete_dishes(&self, restaurant_id: i32) -> Result<u64, DatabaseError> {
        let mut tables = self.tables.write().await;
        let before = tables.dishes.len();
        tables.dishes.retain(|_, d| d.restaurant_id != restaurant_id);
        Ok((before - tables.dishes.len()) as u64)
    }

    async fn delete_dish(&self, restaurant_id: i32, dish_id: i32) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let belongs = tables
            .dishes
            .get(&dish_id)
            .is_some_and(|d| d.restaurant_id == restaurant_id);
        if belongs {
            tables.dishes.remove(&dish_id);
        }
        Ok(belongs)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.user_by_email(email).cloned())
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        Ok(self.tables.read().await.user_by_email(email).is_some())
    }

    async fn insert_user(&self, user: NewUser) -> Result<i32, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.user_by_email(&user.email).is_some() {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }
        let id = next_id(&mut tables.next_user_id);
        tables.users.insert(
            id,
            User {
                id,
                email: user.email,
                password_hash: user.password_hash,
                date_of_birth: user.date_of_birth,
                nationality: user.nationality,
                role: user.role,
            },
        );
        Ok(id)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
