pub mod controller;
pub mod field;
pub mod scheduler;
pub mod validators;

pub use controller::{LoginForm, LoginHandler, SubmitOutcome};
pub use field::{FieldAction, FieldId, FieldState};
