// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers can rely on
// `Extension<Principal>` being present. Ownership and policy checks happen in
// the services.

pub mod account;
pub mod dish;
pub mod restaurant;
