// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (operator JWT required)
pub mod public;    // Tier 1: token acquisition and verification (/api/v1/auth/*)
pub mod protected; // Tier 2: moderation operations (/api/v1/moderate/*)
