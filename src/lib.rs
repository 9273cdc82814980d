pub mod app;
pub mod config;
pub mod form;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use app::App;
pub use config::{FormConfig, ValidityMode};
pub use form::{FieldAction, FieldId, FieldState, LoginForm, LoginHandler, SubmitOutcome};
