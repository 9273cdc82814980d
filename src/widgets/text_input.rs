use crate::form::FieldId;
use crate::terminal::{KeyCode, KeyModifiers};
use crate::ui::span::Span;
use crate::widgets::input::{Input, KeyResult};
use unicode_width::UnicodeWidthChar;

pub struct TextInput {
    id: FieldId,
    value: String,
    cursor_pos: usize,
}

impl TextInput {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            value: String::new(),
            cursor_pos: 0,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value.into());
        self
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    fn insert_char(&mut self, ch: char) {
        let byte_pos = self.byte_index(self.cursor_pos);
        self.value.insert(byte_pos, ch);
        self.cursor_pos += 1;
    }

    fn backspace(&mut self) -> bool {
        if self.cursor_pos == 0 {
            return false;
        }
        let byte_pos = self.byte_index(self.cursor_pos - 1);
        self.value.remove(byte_pos);
        self.cursor_pos -= 1;
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor_pos >= self.char_count() {
            return false;
        }
        let byte_pos = self.byte_index(self.cursor_pos);
        self.value.remove(byte_pos);
        true
    }

    fn is_separator(ch: char) -> bool {
        ch.is_whitespace() || matches!(ch, '.' | '/' | ',' | '-' | '@')
    }

    fn word_start_before(&self, from: usize) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = from;
        while pos > 0 && Self::is_separator(chars[pos - 1]) {
            pos -= 1;
        }
        while pos > 0 && !Self::is_separator(chars[pos - 1]) {
            pos -= 1;
        }
        pos
    }

    fn word_end_after(&self, from: usize) -> usize {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = from;
        while pos < chars.len() && Self::is_separator(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && !Self::is_separator(chars[pos]) {
            pos += 1;
        }
        pos
    }

    fn delete_word_left(&mut self) -> bool {
        let start = self.word_start_before(self.cursor_pos);
        if start == self.cursor_pos {
            return false;
        }
        let from = self.byte_index(start);
        let to = self.byte_index(self.cursor_pos);
        self.value.replace_range(from..to, "");
        self.cursor_pos = start;
        true
    }

    fn move_to(&mut self, pos: usize) -> KeyResult {
        self.cursor_pos = pos.min(self.char_count());
        KeyResult::Handled
    }

    fn edited(changed: bool) -> KeyResult {
        if changed {
            KeyResult::Changed
        } else {
            KeyResult::Handled
        }
    }
}

impl Input for TextInput {
    fn id(&self) -> FieldId {
        self.id
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: String) {
        self.cursor_pos = value.chars().count();
        self.value = value;
    }

    fn cursor_pos(&self) -> usize {
        self.cursor_pos
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyResult {
        // AltGr arrives as Ctrl+Alt; treat it as plain text entry.
        let ctrl = modifiers.contains(KeyModifiers::CONTROL)
            && !modifiers.contains(KeyModifiers::ALT);
        match code {
            KeyCode::Char('w') if ctrl => Self::edited(self.delete_word_left()),
            KeyCode::Char(_) if ctrl => KeyResult::NotHandled,
            KeyCode::Char(ch) => {
                self.insert_char(ch);
                KeyResult::Changed
            }
            KeyCode::Backspace if ctrl => Self::edited(self.delete_word_left()),
            KeyCode::Backspace => Self::edited(self.backspace()),
            KeyCode::Delete => Self::edited(self.delete()),
            KeyCode::Left if ctrl => self.move_to(self.word_start_before(self.cursor_pos)),
            KeyCode::Left => self.move_to(self.cursor_pos.saturating_sub(1)),
            KeyCode::Right if ctrl => self.move_to(self.word_end_after(self.cursor_pos)),
            KeyCode::Right => self.move_to(self.cursor_pos + 1),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.char_count()),
            KeyCode::Enter => KeyResult::Submit,
            _ => KeyResult::NotHandled,
        }
    }

    fn render_content(&self) -> Span {
        Span::new(self.value.clone())
    }

    fn cursor_offset_in_content(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor_pos)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }
}
