use crate::app::{App, FocusTarget};
use crate::form::FieldId;
use crate::terminal::{CursorPos, TerminalSize};
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::Style;
use crate::ui::theme::Theme;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CARD_WIDTH: usize = 44;
const MIN_CARD_WIDTH: usize = 24;
const LABEL_WIDTH: usize = 10;
const BUTTON_TEXT: &str = "[ Login ]";
const HINT: &str = "Tab/Shift+Tab move · Enter submit · Esc quit";

#[derive(Debug, Default, Clone)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
}

pub struct Renderer {
    theme: Theme,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default_theme())
    }
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn render(&self, app: &App, terminal_size: TerminalSize) -> RenderFrame {
        let inner = (terminal_size.width as usize)
            .saturating_sub(2)
            .clamp(MIN_CARD_WIDTH, CARD_WIDTH);
        let mut frame = RenderFrame::default();

        frame.lines.push(self.border('╭', '╮', inner));
        for id in FieldId::ALL {
            let row = frame.lines.len() as u16;
            let (line, cursor_col) = self.field_line(app, id, inner);
            frame.lines.push(line);
            if app.focus() == FocusTarget::Field(id) {
                frame.cursor = Some(CursorPos {
                    col: cursor_col as u16,
                    row,
                });
            }
        }
        frame.lines.push(self.boxed(vec![Span::new(" ".repeat(inner))]));
        frame.lines.push(self.button_line(app, inner));
        frame.lines.push(self.border('╰', '╯', inner));
        frame
            .lines
            .push(vec![Span::styled(HINT.to_string(), self.theme.hint)]);

        frame
    }

    fn border(&self, left: char, right: char, inner: usize) -> SpanLine {
        let text = format!("{left}{}{right}", "─".repeat(inner));
        vec![Span::styled(text, self.theme.border)]
    }

    fn boxed(&self, mut content: SpanLine) -> SpanLine {
        let mut line = vec![Span::styled("│", self.theme.border)];
        line.append(&mut content);
        line.push(Span::styled("│", self.theme.border));
        line
    }

    /// Returns the line and the absolute cursor column within it.
    fn field_line(&self, app: &App, id: FieldId, inner: usize) -> (SpanLine, usize) {
        let input = app.input(id);
        let state = app.form().field(id);
        let focused = app.focus() == FocusTarget::Field(id);

        let mut label_style = self.theme.label;
        if focused {
            label_style = label_style.patch(self.theme.focused);
        }
        let mut value_style = Style::new();
        if !state.is_valid {
            label_style = label_style.patch(self.theme.invalid);
            value_style = value_style.patch(self.theme.invalid);
        }

        let value_width = inner.saturating_sub(LABEL_WIDTH + 1);
        let content = input.render_content();
        let (visible, cursor) =
            visible_window(&content.text, input.cursor_offset_in_content(), value_width);
        let padding = value_width.saturating_sub(visible.width());

        let line = self.boxed(vec![
            Span::styled(pad_to(&format!(" {}", input.label()), LABEL_WIDTH), label_style),
            Span::styled(visible, value_style),
            Span::new(" ".repeat(padding + 1)),
        ]);
        (line, 1 + LABEL_WIDTH + cursor)
    }

    fn button_line(&self, app: &App, inner: usize) -> SpanLine {
        let style = if !app.form().submit_enabled() {
            self.theme.button_disabled
        } else if app.focus() == FocusTarget::Button {
            self.theme.button_focused
        } else {
            self.theme.button
        };
        let width = BUTTON_TEXT.width();
        let left = inner.saturating_sub(width) / 2;
        let right = inner.saturating_sub(width + left);
        self.boxed(vec![
            Span::new(" ".repeat(left)),
            Span::styled(BUTTON_TEXT, style),
            Span::new(" ".repeat(right)),
        ])
    }
}

fn pad_to(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(text.width())));
    out
}

/// Slice of `text` at most `width` columns wide that keeps the cursor
/// visible, plus the cursor column inside that slice.
fn visible_window(text: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    if text.width() < width {
        return (text.to_string(), cursor.min(text.width()));
    }

    // Leave one column for the cursor at the end of the value.
    let budget = width - 1;
    let mut skipped = 0usize;
    let mut start = 0usize;
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    while cursor.saturating_sub(skipped) > budget && start < chars.len() {
        skipped += chars[start].1.width().unwrap_or(0);
        start += 1;
    }

    let mut out = String::new();
    let mut used = 0usize;
    for &(_, ch) in &chars[start..] {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    (out, cursor.saturating_sub(skipped))
}

#[cfg(test)]
mod tests {
    use super::{Renderer, visible_window};
    use crate::app::App;
    use crate::config::FormConfig;
    use crate::form::FieldId;
    use crate::runtime::command::Command;
    use crate::terminal::{KeyCode, KeyEvent, TerminalSize};
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;
    use std::time::Instant;

    const SIZE: TerminalSize = TerminalSize {
        width: 80,
        height: 24,
    };

    fn type_str(app: &mut App, text: &str, now: Instant) {
        for ch in text.chars() {
            app.handle_command(Command::InputKey(KeyEvent::plain(KeyCode::Char(ch))), now);
        }
    }

    #[test]
    fn draws_card_with_labels_and_button() {
        let app = App::new(&FormConfig::default(), |_: &str, _: &str| {});
        let frame = Renderer::default().render(&app, SIZE);
        let text: Vec<String> = frame.lines.iter().map(|l| line_text(l)).collect();

        assert!(text[0].starts_with('╭'));
        assert!(text[1].contains("E-Mail"));
        assert!(text[2].contains("Password"));
        assert!(text[4].contains("[ Login ]"));
        assert!(text[5].starts_with('╰'));
        assert_eq!(text[1].chars().count(), text[0].chars().count());
        assert_eq!(text[4].chars().count(), text[0].chars().count());
    }

    #[test]
    fn password_is_masked_and_cursor_follows_focus() {
        let now = Instant::now();
        let mut app = App::new(&FormConfig::default(), |_: &str, _: &str| {});
        app.handle_command(Command::NextFocus, now);
        type_str(&mut app, "hunter22", now);

        let frame = Renderer::default().render(&app, SIZE);
        let password_line = line_text(&frame.lines[2]);
        assert!(password_line.contains("********"));
        assert!(!password_line.contains("hunter22"));

        let cursor = frame.cursor.expect("focused field shows a cursor");
        assert_eq!(cursor.row, 2);
        assert_eq!(cursor.col, 1 + 10 + 8);
    }

    #[test]
    fn invalid_fields_use_invalid_style() {
        let now = Instant::now();
        let mut app = App::new(&FormConfig::default(), |_: &str, _: &str| {});
        type_str(&mut app, "a@b.com", now);

        let theme = Theme::default_theme();
        let frame = Renderer::default().render(&app, SIZE);
        let email_value = &frame.lines[1][2];
        let password_value = &frame.lines[2][2];
        assert_eq!(email_value.text, "a@b.com");
        assert_ne!(email_value.style.color, theme.invalid.color);
        assert_eq!(password_value.style.color, theme.invalid.color);
        assert!(!app.form().field(FieldId::Password).is_valid);
    }

    #[test]
    fn long_values_scroll_to_keep_cursor_visible() {
        let (visible, cursor) = visible_window("abcdefghij", 10, 5);
        assert_eq!(visible, "ghij");
        assert_eq!(cursor, 4);

        let (visible, cursor) = visible_window("abcdefghij", 0, 5);
        assert_eq!(visible, "abcd");
        assert_eq!(cursor, 0);

        let (visible, cursor) = visible_window("abc", 3, 5);
        assert_eq!(visible, "abc");
        assert_eq!(cursor, 3);
    }
}
