use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;

/// Base styles the table falls back to when its own options leave a style at the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text_primary: Style::default(),
            text_muted: Style::default().fg(Color::DarkGray),
            accent: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}
