use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::models::{Dish, NewDish};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

impl From<Dish> for DishDto {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            price: dish.price,
        }
    }
}

/// Expected Input:
/// ```json
/// { "name": "Zinger", "description": "Spicy burger", "price": "10.50" }
/// ```
/// `price` may also be a JSON number.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateDishDto {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
}

/// Prices fit `NUMERIC(12, 2)`: at most two decimal places, below 10^10.
pub const PRICE_MAX_SCALE: u32 = 2;
pub const PRICE_LIMIT: i64 = 10_000_000_000;

impl CreateDishDto {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name);
        if self.price.is_sign_negative() && !self.price.is_zero() {
            errors.add("price", "'price' must be greater than or equal to '0'.");
        } else if self.price >= Decimal::from(PRICE_LIMIT) {
            errors.add("price", format!("'price' must be less than '{}'.", PRICE_LIMIT));
        }
        if self.price.normalize().scale() > PRICE_MAX_SCALE {
            errors.add(
                "price",
                format!("'price' must not have more than {} decimal places.", PRICE_MAX_SCALE),
            );
        }
        errors.into_result()
    }
}

// Stored at the column scale, so "10.5" reads back as "10.50" from either store
impl From<CreateDishDto> for NewDish {
    fn from(dto: CreateDishDto) -> Self {
        let mut price = dto.price;
        price.rescale(PRICE_MAX_SCALE);
        Self {
            name: dto.name,
            description: dto.description,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_price_is_rejected() {
        let dto = CreateDishDto {
            name: "Soup".to_string(),
            price: Decimal::new(-1, 2),
            ..Default::default()
        };
        assert!(dto.validate().unwrap_err().has_field("price"));
    }

    #[test]
    fn price_must_fit_the_column() {
        let dish = |price: &str| CreateDishDto {
            name: "Soup".to_string(),
            price: price.parse().unwrap(),
            ..Default::default()
        };
        assert!(dish("99999999999999999.123456").validate().unwrap_err().has_field("price"));
        assert!(dish("10000000000").validate().unwrap_err().has_field("price"));
        assert!(dish("10.505").validate().unwrap_err().has_field("price"));
        assert!(dish("9999999999.99").validate().is_ok());
        // trailing zeros do not count as precision
        assert!(dish("10.500").validate().is_ok());
    }

    #[test]
    fn stored_price_uses_two_decimal_places() {
        let dto: CreateDishDto = serde_json::from_str(r#"{"name":"A","price":10.5}"#).unwrap();
        let dish = NewDish::from(dto);
        assert_eq!(dish.price.to_string(), "10.50");
    }

    #[test]
    fn free_dish_is_fine() {
        let dto = CreateDishDto {
            name: "Water".to_string(),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn price_accepts_string_or_number() {
        let from_string: CreateDishDto = serde_json::from_str(r#"{"name":"A","price":"10.50"}"#).unwrap();
        let from_number: CreateDishDto = serde_json::from_str(r#"{"name":"A","price":10.5}"#).unwrap();
        assert_eq!(from_string.price, Decimal::new(1050, 2));
        assert_eq!(from_number.price, Decimal::new(105, 1));
    }
}
