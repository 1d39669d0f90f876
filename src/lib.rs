pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod upstream;

#[cfg(test)]
pub mod testing;

pub use routes::app;
pub use state::AppState;
