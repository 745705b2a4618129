use std::collections::BTreeMap;

use chrono::{Months, NaiveDate, Utc};
use tracing::{debug, info};

use super::{AuthorizationError, Principal};
use crate::database::{DatabaseError, Store};

/// Closed set of requirements a named policy can combine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// Principal has created at least `minimum` restaurants
    CreatedMultipleRestaurants { minimum: u64 },
    /// Principal is at least `years` old on the evaluation date
    MinimumAge { years: u32 },
    /// Principal's nationality claim is one of `allowed` (exact match)
    HasNationality { allowed: Vec<String> },
}

impl Requirement {
    pub async fn evaluate(&self, principal: &Principal, store: &dyn Store, today: NaiveDate) -> Result<bool, DatabaseError> {
        match self {
            Requirement::CreatedMultipleRestaurants { minimum } => {
                let created = store.count_created_by(principal.user_id).await?;
                Ok(created >= *minimum)
            }
            Requirement::MinimumAge { years } => Ok(principal
                .date_of_birth
                .and_then(|dob| dob.checked_add_months(Months::new(years.saturating_mul(12))))
                .is_some_and(|birthday| birthday <= today)),
            Requirement::HasNationality { allowed } => Ok(principal
                .nationality
                .as_deref()
                .is_some_and(|n| allowed.iter().any(|a| a == n))),
        }
    }
}

/// Named policies, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, Vec<Requirement>>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, name: impl Into<String>, requirements: Vec<Requirement>) -> Self {
        self.policies.insert(name.into(), requirements);
        self
    }

    /// `HasNationality`, `AtLeast20` and `CreatedAtLeast2Restaurants`
    pub fn standard() -> Self {
        Self::new()
            .with_policy(
                "HasNationality",
                vec![Requirement::HasNationality {
                    allowed: vec!["German".to_string(), "Polish".to_string()],
                }],
            )
            .with_policy("AtLeast20", vec![Requirement::MinimumAge { years: 20 }])
            .with_policy(
                "CreatedAtLeast2Restaurants",
                vec![Requirement::CreatedMultipleRestaurants { minimum: 2 }],
            )
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.policies.contains_key(name)
    }

    /// Every requirement of the policy must hold.
    pub async fn authorize(&self, name: &str, principal: &Principal, store: &dyn Store) -> Result<(), AuthorizationError> {
        self.authorize_on(name, principal, store, Utc::now().date_naive()).await
    }

    pub async fn authorize_on(
        &self,
        name: &str,
        principal: &Principal,
        store: &dyn Store,
        today: NaiveDate,
    ) -> Result<(), AuthorizationError> {
        let requirements = self
            .policies
            .get(name)
            .ok_or_else(|| AuthorizationError::UnknownPolicy(name.to_string()))?;

        for requirement in requirements {
            if !requirement.evaluate(principal, store, today).await? {
                debug!("Requirement {:?} failed for user {}", requirement, principal.user_id);
                info!("Policy {} denied for user {}", name, principal.user_id);
                return Err(AuthorizationError::Forbidden);
            }
        }
        Ok(())
    }
}
