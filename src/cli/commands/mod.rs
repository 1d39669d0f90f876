pub mod auth;
pub mod jokes;
pub mod types;
