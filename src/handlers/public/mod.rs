// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Anonymous reads of restaurants and dishes, token acquisition, and the
// weather demo.

pub mod account;
pub mod dish;
pub mod restaurant;
pub mod weather;
