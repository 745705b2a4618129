use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::dish::DishDto;
use crate::database::models::{Address, NewRestaurant, Restaurant, RestaurantChanges};
use crate::validation::ValidationErrors;

pub const NAME_MAX_LENGTH: usize = 25;
pub const ADDRESS_FIELD_MAX_LENGTH: usize = 50;

/// Restaurant as returned to clients, with the address flattened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub has_delivery: bool,
    pub city: String,
    pub street: String,
    pub postal_code: Option<String>,
    pub dishes: Vec<DishDto>,
}

impl From<Restaurant> for RestaurantDto {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            description: restaurant.description,
            category: restaurant.category,
            has_delivery: restaurant.has_delivery,
            city: restaurant.address.city,
            street: restaurant.address.street,
            postal_code: restaurant.address.postal_code,
            dishes: restaurant.dishes.into_iter().map(DishDto::from).collect(),
        }
    }
}

/// Body of a 201 response
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CreatedDto {
    pub id: i32,
}

/// Expected Input:
/// ```json
/// {
///   "name": "KFC",
///   "category": "Fast Food",
///   "hasDelivery": true,
///   "contactEmail": "kfc@example.com",
///   "city": "Kraków",
///   "street": "Długa 5",
///   "postalCode": "30-001"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRestaurantDto {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub has_delivery: bool,
    pub contact_email: Option<String>,
    pub contact_number: Option<String>,
    pub city: String,
    pub street: String,
    pub postal_code: Option<String>,
}

impl CreateRestaurantDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if errors.require("name", &self.name) {
            errors.max_length("name", &self.name, NAME_MAX_LENGTH);
        }
        errors.require("category", &self.category);
        if errors.require("city", &self.city) {
            errors.max_length("city", &self.city, ADDRESS_FIELD_MAX_LENGTH);
        }
        if errors.require("street", &self.street) {
            errors.max_length("street", &self.street, ADDRESS_FIELD_MAX_LENGTH);
        }
        if let Some(email) = self.contact_email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.validate_email() {
                errors.add("contactEmail", "'contactEmail' is not a valid email address.");
            }
        }

        errors.into_result()
    }

    pub fn into_new_restaurant(self, created_by_id: Option<i32>) -> NewRestaurant {
        NewRestaurant {
            name: self.name,
            description: self.description,
            category: self.category,
            has_delivery: self.has_delivery,
            contact_email: self.contact_email,
            contact_number: self.contact_number,
            created_by_id,
            address: Address {
                city: self.city,
                street: self.street,
                postal_code: self.postal_code,
            },
        }
    }
}

/// Expected Input:
/// ```json
/// { "name": "KFC Express", "description": "Open late", "hasDelivery": false }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRestaurantDto {
    pub name: String,
    pub description: Option<String>,
    pub has_delivery: bool,
}

impl UpdateRestaurantDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if errors.require("name", &self.name) {
            errors.max_length("name", &self.name, NAME_MAX_LENGTH);
        }
        errors.into_result()
    }
}

impl From<UpdateRestaurantDto> for RestaurantChanges {
    fn from(dto: UpdateRestaurantDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            has_delivery: dto.has_delivery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateRestaurantDto {
        CreateRestaurantDto {
            name: "KFC".to_string(),
            category: "Fast Food".to_string(),
            city: "Kraków".to_string(),
            street: "Długa 5".to_string(),
            postal_code: Some("30-001".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn missing_fields_are_each_reported() {
        let errors = CreateRestaurantDto::default().validate().unwrap_err();
        for field in ["name", "category", "city", "street"] {
            assert!(errors.has_field(field), "missing {}", field);
        }
    }

    #[test]
    fn name_is_limited_to_25_characters() {
        let mut dto = valid();
        dto.name = "x".repeat(26);
        assert!(dto.validate().unwrap_err().has_field("name"));
        dto.name = "x".repeat(25);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn contact_email_must_be_well_formed_when_given() {
        let mut dto = valid();
        dto.contact_email = Some("not-an-email".to_string());
        assert!(dto.validate().unwrap_err().has_field("contactEmail"));
        dto.contact_email = Some("kfc@example.com".to_string());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn update_requires_name() {
        let dto = UpdateRestaurantDto::default();
        assert!(dto.validate().unwrap_err().has_field("name"));
    }

    #[test]
    fn dto_flattens_address() {
        let restaurant = valid().into_new_restaurant(Some(3));
        let dto = RestaurantDto::from(Restaurant {
            id: 9,
            name: restaurant.name,
            description: None,
            category: restaurant.category,
            has_delivery: false,
            contact_email: None,
            contact_number: None,
            created_by_id: restaurant.created_by_id,
            address: restaurant.address,
            dishes: vec![],
        });
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["city"], "Kraków");
        assert_eq!(json["street"], "Długa 5");
        assert_eq!(json["postalCode"], "30-001");
        assert_eq!(json["hasDelivery"], false);
        assert!(json.get("createdById").is_none());
    }
}
