use std::sync::Arc;

use tracing::info;

use super::error::ServiceError;
use super::restaurant_service::RestaurantService;
use crate::authorization::{Principal, ResourceOperation};
use crate::database::Store;
use crate::dto::{CreateDishDto, DishDto};

pub const DISH_NOT_FOUND: &str = "Dish not found";

/// Dishes are addressed through their restaurant; mutating them counts as
/// updating the restaurant.
#[derive(Clone)]
pub struct DishService {
    store: Arc<dyn Store>,
    restaurants: RestaurantService,
}

impl DishService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            restaurants: RestaurantService::new(store.clone()),
            store,
        }
    }

    pub async fn create(&self, principal: &Principal, restaurant_id: i32, dto: CreateDishDto) -> Result<i32, ServiceError> {
        let restaurant = self.restaurants.load(restaurant_id).await?;
        self.restaurants.authorize(principal, ResourceOperation::Update, &restaurant)?;
        dto.validate()?;

        let id = self.store.insert_dish(restaurant_id, dto.into()).await?;
        info!("Dish {} added to restaurant {}", id, restaurant_id);
        Ok(id)
    }

    pub async fn get_by_id(&self, restaurant_id: i32, dish_id: i32) -> Result<DishDto, ServiceError> {
        self.restaurants.load(restaurant_id).await?;
        self.store
            .find_dish(restaurant_id, dish_id)
            .await?
            .map(DishDto::from)
            .ok_or_else(|| ServiceError::not_found(DISH_NOT_FOUND))
    }

    pub async fn get_all(&self, restaurant_id: i32) -> Result<Vec<DishDto>, ServiceError> {
        let restaurant = self.restaurants.load(restaurant_id).await?;
        Ok(restaurant.dishes.into_iter().map(DishDto::from).collect())
    }

    pub async fn remove_all(&self, principal: &Principal, restaurant_id: i32) -> Result<(), ServiceError> {
        let restaurant = self.restaurants.load(restaurant_id).await?;
        self.restaurants.authorize(principal, ResourceOperation::Update, &restaurant)?;

        let removed = self.store.delete_dishes(restaurant_id).await?;
        info!("Removed {} dishes from restaurant {}", removed, restaurant_id);
        Ok(())
    }

    pub async fn remove(&self, principal: &Principal, restaurant_id: i32, dish_id: i32) -> Result<(), ServiceError> {
        let restaurant = self.restaurants.load(restaurant_id).await?;
        self.restaurants.authorize(principal, ResourceOperation::Update, &restaurant)?;

        if !self.store.delete_dish(restaurant_id, dish_id).await? {
            return Err(ServiceError::not_found(DISH_NOT_FOUND));
        }
        info!("Dish {} removed from restaurant {}", dish_id, restaurant_id);
        Ok(())
    }
}
