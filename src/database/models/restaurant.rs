use serde::{Deserialize, Serialize};

use super::dish::Dish;

/// Restaurant aggregate as loaded from the store: the owned address and
/// the dish collection travel with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub has_delivery: bool,
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub created_by_id: Option<i32>,
    pub address: Address,
    pub dishes: Vec<Dish>,
}

impl Restaurant {
    pub fn is_created_by(&self, user_id: i32) -> bool {
        self.created_by_id == Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub postal_code: Option<String>,
}

/// Insert payload; the address is created in the same unit of work.
#[derive(Debug, Clone)]
pub struct NewRestaurant {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub has_delivery: bool,
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub created_by_id: Option<i32>,
    pub address: Address,
}

/// The only attributes an update may touch.
#[derive(Debug, Clone)]
pub struct RestaurantChanges {
    pub name: String,
    pub description: Option<String>,
    pub has_delivery: bool,
}
