pub mod validation;

pub use validation::{IdQuery, PendingQuery, Validate, ValidatedJson};
