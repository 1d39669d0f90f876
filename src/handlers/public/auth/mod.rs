// handlers/public/auth/mod.rs - Operator token endpoints

pub mod login;  // POST /api/v1/auth/login - exchange operator credentials for a JWT
pub mod verify; // POST /api/v1/auth/verify - check a JWT and return its claims

pub use login::login_post;
pub use verify::verify_post;
