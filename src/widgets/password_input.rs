use crate::form::FieldId;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::Span;
use crate::widgets::input::{Input, KeyResult};
use crate::widgets::text_input::TextInput;

const MASK: char = '*';

/// Text input that renders one mask char per typed char.
pub struct PasswordInput {
    inner: TextInput,
}

impl PasswordInput {
    pub fn new(id: FieldId) -> Self {
        Self {
            inner: TextInput::new(id),
        }
    }

    fn masked(&self) -> String {
        std::iter::repeat_n(MASK, self.inner.value().chars().count()).collect()
    }
}

impl Input for PasswordInput {
    fn id(&self) -> FieldId {
        self.inner.id()
    }

    fn value(&self) -> &str {
        self.inner.value()
    }

    fn set_value(&mut self, value: String) {
        self.inner.set_value(value);
    }

    fn cursor_pos(&self) -> usize {
        self.inner.cursor_pos()
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyResult {
        // Word motions would leak word boundaries of the hidden value.
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(code, KeyCode::Left | KeyCode::Right)
        {
            return KeyResult::NotHandled;
        }
        self.inner.handle_key(code, modifiers)
    }

    fn render_content(&self) -> Span {
        Span::new(self.masked())
    }

    fn cursor_offset_in_content(&self) -> usize {
        self.inner.cursor_pos()
    }
}

#[cfg(test)]
mod tests {
    use super::PasswordInput;
    use crate::form::FieldId;
    use crate::terminal::{KeyCode, KeyModifiers};
    use crate::widgets::input::Input;

    #[test]
    fn renders_mask_but_keeps_raw_value() {
        let mut input = PasswordInput::new(FieldId::Password);
        for ch in "sécret".chars() {
            input.handle_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
        assert_eq!(input.value(), "sécret");
        assert_eq!(input.render_content().text, "******");
        assert_eq!(input.cursor_offset_in_content(), 6);
    }
}
