// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer JWT, Principal in request extensions)

pub mod protected; // Tier 2: JWT authentication required
pub mod public;    // Tier 1: No authentication required
