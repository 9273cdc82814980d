pub mod input;
pub mod password_input;
pub mod text_input;

pub use input::{Input, KeyResult};
pub use password_input::PasswordInput;
pub use text_input::TextInput;
