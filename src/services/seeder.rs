use rust_decimal::Decimal;
use tracing::info;

use crate::database::models::{Address, NewDish, NewRestaurant};
use crate::database::{DatabaseError, Store};

/// Inserts sample restaurants when the store has none. Returns how many
/// were added. Seeded rows have no creator.
pub async fn seed(store: &dyn Store) -> Result<usize, DatabaseError> {
    if store.count_restaurants().await? > 0 {
        info!("Seeding skipped: restaurants already present");
        return Ok(0);
    }

    let samples = sample_restaurants();
    let count = samples.len();
    for (restaurant, dishes) in samples {
        let id = store.insert_restaurant(restaurant).await?;
        for dish in dishes {
            store.insert_dish(id, dish).await?;
        }
    }

    info!("Seeded {} restaurants", count);
    Ok(count)
}

fn dish(name: &str, description: &str, cents: i64) -> NewDish {
    NewDish {
        name: name.to_string(),
        description: Some(description.to_string()),
        price: Decimal::new(cents, 2),
    }
}

fn sample_restaurants() -> Vec<(NewRestaurant, Vec<NewDish>)> {
    vec![
        (
            NewRestaurant {
                name: "KFC".to_string(),
                description: Some("Kentucky Fried Chicken is an American fast food restaurant chain".to_string()),
                category: "Fast Food".to_string(),
                has_delivery: true,
                contact_email: Some("contact@kfc.com".to_string()),
                contact_number: None,
                created_by_id: None,
                address: Address {
                    city: "Kraków".to_string(),
                    street: "Długa 5".to_string(),
                    postal_code: Some("30-001".to_string()),
                },
            },
            vec![
                dish("Nashville Hot Chicken", "Spicy fried chicken", 1030),
                dish("Chicken Nuggets", "Breaded chicken pieces", 530),
            ],
        ),
        (
            NewRestaurant {
                name: "McDonald Szewska".to_string(),
                description: Some("McDonald's is an American fast food restaurant chain".to_string()),
                category: "Fast Food".to_string(),
                has_delivery: true,
                contact_email: Some("contact@mcdonald.com".to_string()),
                contact_number: None,
                created_by_id: None,
                address: Address {
                    city: "Kraków".to_string(),
                    street: "Szewska 2".to_string(),
                    postal_code: Some("30-001".to_string()),
                },
            },
            vec![dish("Big Mac", "Double beef burger", 1490)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryStore, RestaurantRepository};

    #[tokio::test]
    async fn seeds_once() {
        let store = MemoryStore::new();
        assert_eq!(seed(&store).await.unwrap(), 2);
        assert_eq!(seed(&store).await.unwrap(), 0);
        assert_eq!(store.count_restaurants().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn seeded_rows_have_no_owner_and_carry_dishes() {
        let store = MemoryStore::new();
        seed(&store).await.unwrap();
        let kfc = store.find_restaurant(1).await.unwrap().unwrap();
        assert_eq!(kfc.created_by_id, None);
        assert_eq!(kfc.dishes.len(), 2);
    }
}
