use chrono::NaiveDate;

use super::role::Role;

#[derive(Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub role: Role,
}

// Hand-written so the hash never reaches a log line.
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("date_of_birth", &self.date_of_birth)
            .field("nationality", &self.nationality)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub role: Role,
}
