use crate::terminal::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize,
};
use crate::ui::renderer::RenderFrame;
use crate::ui::span::Span;
use crate::ui::style::Color;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate,
    EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write};
use std::time::Duration;

pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
        })
    }

    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnterAlternateScreen, Hide)?;
        Ok(())
    }

    /// Restores the terminal; every step runs even if an earlier one fails.
    pub fn exit(&mut self) -> io::Result<()> {
        let screen = execute!(self.stdout, LeaveAlternateScreen, Show);
        let raw = terminal::disable_raw_mode();
        let flush = self.stdout.flush();
        screen.and(raw).and(flush)
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(TerminalEvent::Key(map_key_event(key)))
            }
            CrosstermEvent::Resize(width, height) => {
                Ok(TerminalEvent::Resize(TerminalSize { width, height }))
            }
            _ => Ok(TerminalEvent::Tick),
        }
    }

    pub fn render(&mut self, frame: &RenderFrame) -> io::Result<()> {
        queue!(self.stdout, BeginSynchronizedUpdate, Hide)?;
        queue!(self.stdout, MoveTo(0, 0), Clear(ClearType::All))?;

        for (row, line) in frame.lines.iter().enumerate() {
            if row >= self.size.height as usize {
                break;
            }
            queue!(self.stdout, MoveTo(0, row as u16))?;
            for span in line {
                self.queue_span(span)?;
            }
        }

        if let Some(CursorPos { col, row }) = frame.cursor {
            queue!(self.stdout, MoveTo(col, row), Show)?;
        }

        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn queue_span(&mut self, span: &Span) -> io::Result<()> {
        let style = span.style;
        let has_style = style.color.is_some() || style.background.is_some() || style.bold || style.dim;

        if let Some(fg) = style.color {
            queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
        }
        if let Some(bg) = style.background {
            queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
        }
        if style.bold {
            queue!(self.stdout, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.stdout, SetAttribute(Attribute::Dim))?;
        }

        queue!(self.stdout, Print(&span.text))?;

        if has_style {
            queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        _ => KeyCode::Other,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::{map_key_event, map_key_modifiers};
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
    use crossterm::event::{
        KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent,
        KeyModifiers as CrosstermKeyModifiers,
    };

    fn map(code: CrosstermKeyCode, modifiers: CrosstermKeyModifiers) -> KeyEvent {
        map_key_event(CrosstermKeyEvent::new(code, modifiers))
    }

    #[test]
    fn maps_ctrl_c() {
        assert_eq!(
            map(CrosstermKeyCode::Char('c'), CrosstermKeyModifiers::CONTROL),
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            }
        );
    }

    #[test]
    fn maps_shift_backtab() {
        assert_eq!(
            map(CrosstermKeyCode::BackTab, CrosstermKeyModifiers::SHIFT),
            KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
            }
        );
    }

    #[test]
    fn maps_ctrl_alt_char_with_both_modifiers() {
        let event = map(
            CrosstermKeyCode::Char('@'),
            CrosstermKeyModifiers::CONTROL | CrosstermKeyModifiers::ALT,
        );
        assert_eq!(event.code, KeyCode::Char('@'));
        assert!(event.modifiers.contains(KeyModifiers::CONTROL));
        assert!(event.modifiers.contains(KeyModifiers::ALT));
        assert!(!event.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn unsupported_keys_and_modifiers_collapse() {
        assert_eq!(
            map(CrosstermKeyCode::F(5), CrosstermKeyModifiers::NONE).code,
            KeyCode::Other
        );
        assert_eq!(
            map_key_modifiers(CrosstermKeyModifiers::SUPER),
            KeyModifiers::NONE
        );
    }
}
