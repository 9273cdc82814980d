use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Style,
    pub label: Style,
    pub focused: Style,
    pub invalid: Style,
    pub button: Style,
    pub button_focused: Style,
    pub button_disabled: Style,
    pub hint: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            border: Style::new().color(Color::DarkGrey),
            label: Style::new(),
            focused: Style::new().bold(),
            invalid: Style::new().color(Color::Red).background(Color::Black),
            button: Style::new().color(Color::White).background(Color::Blue),
            button_focused: Style::new()
                .color(Color::Black)
                .background(Color::Cyan)
                .bold(),
            button_disabled: Style::new().color(Color::DarkGrey).dim(),
            hint: Style::new().color(Color::DarkGrey),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
