pub mod app;
pub mod auth;
pub mod authorization;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod services;
pub mod validation;

pub use app::{app, AppState};
