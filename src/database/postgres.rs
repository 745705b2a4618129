use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{
    Address, Dish, NewDish, NewRestaurant, NewUser, Restaurant, RestaurantChanges, Role, User,
};
use crate::database::repository::{DishRepository, RestaurantRepository, Store, UserRepository};
use crate::listing::{ListingSql, RestaurantQuery, RESTAURANT_COLUMNS};

const DISH_COLUMNS: &str = "\"id\", \"restaurant_id\", \"name\", \"description\", \"price\"";
const USER_COLUMNS: &str = "\"id\", \"email\", \"password_hash\", \"date_of_birth\", \"nationality\", \"role_id\"";

#[derive(FromRow)]
struct RestaurantRow {
    id: i32,
    name: String,
    description: Option<String>,
    category: String,
    has_delivery: bool,
    contact_email: Option<String>,
    contact_number: Option<String>,
    created_by_id: Option<i32>,
    city: String,
    street: String,
    postal_code: Option<String>,
}

impl RestaurantRow {
    fn into_restaurant(self, dishes: Vec<Dish>) -> Restaurant {
        Restaurant {
            id: self.id,
            name: self.name,
            description: self.description,
            category: self.category,
            has_delivery: self.has_delivery,
            contact_email: self.contact_email,
            contact_number: self.contact_number,
            created_by_id: self.created_by_id,
            address: Address {
                city: self.city,
                street: self.street,
                postal_code: self.postal_code,
            },
            dishes,
        }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: i32,
    email: String,
    password_hash: String,
    date_of_birth: Option<NaiveDate>,
    nationality: Option<String>,
    role_id: i32,
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = Role::from_id(row.role_id)
            .ok_or_else(|| DatabaseError::QueryError(format!("unknown role id {}", row.role_id)))?;
        Ok(User {
            id: row.id,
            email: row.email,
            password_hash: row.password_hash,
            date_of_birth: row.date_of_birth,
            nationality: row.nationality,
            role,
        })
    }
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Dishes for a set of restaurants, grouped by restaurant id
    async fn dishes_for(&self, restaurant_ids: &[i32]) -> Result<HashMap<i32, Vec<Dish>>, DatabaseError> {
        if restaurant_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT {} FROM \"dishes\" WHERE \"restaurant_id\" = ANY($1) ORDER BY \"id\"",
            DISH_COLUMNS
        );
        let dishes = sqlx::query_as::<_, Dish>(&sql)
            .bind(restaurant_ids)
            .fetch_all(&self.pool)
            .await?;

        let mut grouped: HashMap<i32, Vec<Dish>> = HashMap::new();
        for dish in dishes {
            grouped.entry(dish.restaurant_id).or_default().push(dish);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl RestaurantRepository for PgStore {
    async fn list_restaurants(&self, query: &RestaurantQuery) -> Result<(Vec<Restaurant>, u64), DatabaseError> {
        let listing = ListingSql::new(query);

        let count = listing.to_count_sql();
        let mut count_query = sqlx::query_scalar::<_, i64>(&count.query);
        for param in &count.params {
            count_query = count_query.bind(param);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let select = listing.to_sql();
        debug!("Listing restaurants: {}", select.query);
        let mut select_query = sqlx::query_as::<_, RestaurantRow>(&select.query);
        for param in &select.params {
            select_query = select_query.bind(param);
        }
        let rows = select_query.fetch_all(&self.pool).await?;

        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let mut dishes = self.dishes_for(&ids).await?;
        let restaurants = rows
            .into_iter()
            .map(|row| {
                let own = dishes.remove(&row.id).unwrap_or_default();
                row.into_restaurant(own)
            })
            .collect();

        Ok((restaurants, to_count(total)))
    }

    async fn find_restaurant(&self, id: i32) -> Result<Option<Restaurant>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM \"restaurants\" r JOIN \"addresses\" a ON a.\"restaurant_id\" = r.\"id\" WHERE r.\"id\" = $1",
            RESTAURANT_COLUMNS
        );
        let row = sqlx::query_as::<_, RestaurantRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let dishes = self.list_dishes(id).await?;
                Ok(Some(row.into_restaurant(dishes)))
            }
            None => Ok(None),
        }
    }

    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<i32, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO \"restaurants\" (\"name\", \"description\", \"category\", \"has_delivery\", \
             \"contact_email\", \"contact_number\", \"created_by_id\") \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING \"id\"",
        )
        .bind(&restaurant.name)
        .bind(&restaurant.description)
        .bind(&restaurant.category)
        .bind(restaurant.has_delivery)
        .bind(&restaurant.contact_email)
        .bind(&restaurant.contact_number)
        .bind(restaurant.created_by_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO \"addresses\" (\"restaurant_id\", \"city\", \"street\", \"postal_code\") \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(&restaurant.address.city)
        .bind(&restaurant.address.street)
        .bind(&restaurant.address.postal_code)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    async fn update_restaurant(&self, id: i32, changes: RestaurantChanges) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE \"restaurants\" SET \"name\" = $2, \"description\" = $3, \"has_delivery\" = $4 WHERE \"id\" = $1",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.has_delivery)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("restaurant {}", id)));
        }
        Ok(())
    }

    async fn delete_restaurant(&self, id: i32) -> Result<(), DatabaseError> {
        // addresses and dishes go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM \"restaurants\" WHERE \"id\" = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("restaurant {}", id)));
        }
        Ok(())
    }

    async fn count_restaurants(&self) -> Result<u64, DatabaseError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM \"restaurants\"")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }

    async fn count_created_by(&self, user_id: i32) -> Result<u64, DatabaseError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM \"restaurants\" WHERE \"created_by_id\" = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }
}

#[async_trait]
impl DishRepository for PgStore {
    async fn insert_dish(&self, restaurant_id: i32, dish: NewDish) -> Result<i32, DatabaseError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO \"dishes\" (\"restaurant_id\", \"name\", \"description\", \"price\") \
             VALUES ($1, $2, $3, $4) RETURNING \"id\"",
        )
        .bind(restaurant_id)
        .bind(&dish.name)
        .bind(&dish.description)
        .bind(dish.price)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_dishes(&self, restaurant_id: i32) -> Result<Vec<Dish>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM \"dishes\" WHERE \"restaurant_id\" = $1 ORDER BY \"id\"",
            DISH_COLUMNS
        );
        let dishes = sqlx::query_as::<_, Dish>(&sql)
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(dishes)
    }

    async fn find_dish(&self, restaurant_id: i32, dish_id: i32) -> Result<Option<Dish>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM \"dishes\" WHERE \"id\" = $1 AND \"restaurant_id\" = $2",
            DISH_COLUMNS
        );
        let dish = sqlx::query_as::<_, Dish>(&sql)
            .bind(dish_id)
            .bind(restaurant_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(dish)
    }

    async fn delete_dishes(&self, restaurant_id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM \"dishes\" WHERE \"restaurant_id\" = $1")
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_dish(&self, restaurant_id: i32, dish_id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM \"dishes\" WHERE \"id\" = $1 AND \"restaurant_id\" = $2")
            .bind(dish_id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM \"users\" WHERE LOWER(\"email\") = LOWER($1)",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn find_user(&self, id: i32) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM \"users\" WHERE \"id\" = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(User::try_from).transpose()
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM \"users\" WHERE LOWER(\"email\") = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn insert_user(&self, user: NewUser) -> Result<i32, DatabaseError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO \"users\" (\"email\", \"password_hash\", \"date_of_birth\", \"nationality\", \"role_id\") \
             VALUES ($1, $2, $3, $4, $5) RETURNING \"id\"",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.date_of_birth)
        .bind(&user.nationality)
        .bind(user.role.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
