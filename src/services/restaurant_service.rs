use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::ServiceError;
use crate::authorization::{authorize_resource, Principal, ResourceOperation};
use crate::database::models::Restaurant;
use crate::database::Store;
use crate::dto::{CreateRestaurantDto, RestaurantDto, UpdateRestaurantDto};
use crate::listing::{PagedResult, RestaurantQueryParams};

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

#[derive(Clone)]
pub struct RestaurantService {
    store: Arc<dyn Store>,
}

impl RestaurantService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Validated, filtered, sorted page of restaurants
    pub async fn get_all(&self, params: &RestaurantQueryParams) -> Result<PagedResult<RestaurantDto>, ServiceError> {
        let query = params.validate()?;
        debug!("Listing restaurants with {:?}", query);

        let (restaurants, total) = self.store.list_restaurants(&query).await?;
        let items = restaurants.into_iter().map(RestaurantDto::from).collect();

        Ok(PagedResult::new(items, total, query.page_size, query.page_number))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<RestaurantDto, ServiceError> {
        self.load(id).await.map(RestaurantDto::from)
    }

    /// Returns the new restaurant id. The caller becomes its owner.
    pub async fn create(&self, principal: &Principal, dto: CreateRestaurantDto) -> Result<i32, ServiceError> {
        dto.validate()?;
        let id = self
            .store
            .insert_restaurant(dto.into_new_restaurant(Some(principal.user_id)))
            .await?;
        info!("Restaurant {} created by user {}", id, principal.user_id);
        Ok(id)
    }

    pub async fn update(&self, principal: &Principal, id: i32, dto: UpdateRestaurantDto) -> Result<(), ServiceError> {
        dto.validate()?;
        let restaurant = self.load(id).await?;
        self.authorize(principal, ResourceOperation::Update, &restaurant)?;

        self.store.update_restaurant(id, dto.into()).await?;
        info!("Restaurant {} updated by user {}", id, principal.user_id);
        Ok(())
    }

    pub async fn delete(&self, principal: &Principal, id: i32) -> Result<(), ServiceError> {
        warn!("Restaurant with id: {} DELETE action invoked", id);

        let restaurant = self.load(id).await?;
        self.authorize(principal, ResourceOperation::Delete, &restaurant)?;

        self.store.delete_restaurant(id).await?;
        Ok(())
    }

    /// Lookup that maps absence to NOT_FOUND
    pub(crate) async fn load(&self, id: i32) -> Result<Restaurant, ServiceError> {
        self.store
            .find_restaurant(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(RESTAURANT_NOT_FOUND))
    }

    pub(crate) fn authorize(
        &self,
        principal: &Principal,
        operation: ResourceOperation,
        restaurant: &Restaurant,
    ) -> Result<(), ServiceError> {
        authorize_resource(principal, operation, restaurant).map_err(|e| {
            warn!(
                "User {} refused {:?} on restaurant {}",
                principal.user_id, operation, restaurant.id
            );
            ServiceError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use crate::database::MemoryStore;

    fn principal(user_id: i32, role: Role) -> Principal {
        Principal {
            user_id,
            email: format!("user{}@example.com", user_id),
            role,
            nationality: None,
            date_of_birth: None,
        }
    }

    fn create_dto(name: &str, category: &str) -> CreateRestaurantDto {
        CreateRestaurantDto {
            name: name.to_string(),
            category: category.to_string(),
            city: "Kraków".to_string(),
            street: "Długa 5".to_string(),
            ..Default::default()
        }
    }

    fn service() -> RestaurantService {
        RestaurantService::new(Arc::new(MemoryStore::new()))
    }

    fn page_params(number: &str, size: &str) -> RestaurantQueryParams {
        RestaurantQueryParams {
            page_number: Some(number.to_string()),
            page_size: Some(size.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_the_restaurant() {
        let service = service();
        let owner = principal(1, Role::User);
        let id = service.create(&owner, create_dto("KFC", "Fast Food")).await.unwrap();

        let dto = service.get_by_id(id).await.unwrap();
        assert_eq!(dto.name, "KFC");
        assert_eq!(dto.city, "Kraków");
    }

    #[tokio::test]
    async fn listing_reports_filtered_total() {
        let service = service();
        let owner = principal(1, Role::User);
        for i in 0..7 {
            service.create(&owner, create_dto(&format!("Pizza {}", i), "Italian")).await.unwrap();
        }
        service.create(&owner, create_dto("KFC", "Fast Food")).await.unwrap();

        let mut params = page_params("2", "5");
        params.search_phrase = Some("pizza".to_string());
        let page = service.get_all(&params).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_items_count, 7);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.item_from, 6);
    }

    #[tokio::test]
    async fn invalid_listing_query_is_a_validation_error() {
        let err = service().get_all(&page_params("0", "7")).await.unwrap_err();
        match err {
            ServiceError::Validation(errors) => {
                assert!(errors.has_field("pageNumber"));
                assert!(errors.has_field("pageSize"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_delete() {
        let service = service();
        let owner = principal(1, Role::User);
        let id = service.create(&owner, create_dto("KFC", "Fast Food")).await.unwrap();

        let stranger = principal(2, Role::User);
        assert!(matches!(service.delete(&stranger, id).await, Err(ServiceError::Forbidden)));
        assert!(service.get_by_id(id).await.is_ok());

        let admin = principal(3, Role::Admin);
        service.delete(&admin, id).await.unwrap();
        assert!(matches!(service.get_by_id(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn missing_restaurant_is_not_found_before_forbidden() {
        let stranger = principal(2, Role::User);
        let err = service()
            .update(
                &stranger,
                999,
                UpdateRestaurantDto {
                    name: "New".to_string(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(msg) if msg == RESTAURANT_NOT_FOUND));
    }

    #[tokio::test]
    async fn update_touches_only_allowed_fields() {
        let service = service();
        let owner = principal(1, Role::User);
        let id = service.create(&owner, create_dto("KFC", "Fast Food")).await.unwrap();

        service
            .update(
                &owner,
                id,
                UpdateRestaurantDto {
                    name: "KFC Express".to_string(),
                    description: Some("Open late".to_string()),
                    has_delivery: true,
                },
            )
            .await
            .unwrap();

        let dto = service.get_by_id(id).await.unwrap();
        assert_eq!(dto.name, "KFC Express");
        assert_eq!(dto.category, "Fast Food");
        assert!(dto.has_delivery);
    }
}
