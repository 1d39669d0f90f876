pub mod moderation_service;

pub use moderation_service::{ModerationError, ModerationService, Rollback};
