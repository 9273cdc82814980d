use crate::form::FieldId;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// The value was edited.
    Changed,
    /// Consumed without editing, e.g. cursor movement.
    Handled,
    NotHandled,
    Submit,
}

/// Editable field buffer behind one of the form's labeled inputs.
pub trait Input {
    fn id(&self) -> FieldId;
    fn label(&self) -> &str {
        self.id().label()
    }

    fn value(&self) -> &str;
    fn set_value(&mut self, value: String);

    /// Cursor position in chars.
    fn cursor_pos(&self) -> usize;

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyResult;

    fn render_content(&self) -> Span;

    /// Cursor position in display columns within `render_content`.
    fn cursor_offset_in_content(&self) -> usize;
}
