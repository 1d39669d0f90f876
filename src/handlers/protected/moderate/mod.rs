pub mod delete;
pub mod pending;
pub mod types;
pub mod update;

// Re-export handler functions for use in routing
pub use delete::delete as joke_delete;
pub use pending::get as pending_get;
pub use types::get as types_get;
pub use types::post as types_post;
pub use update::put as joke_put;
