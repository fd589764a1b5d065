use dengue_core::RiskStyle;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

pub(crate) struct Theme {
    border: Color,
    focus: Color,
    title: Color,
    text: Color,
    dim: Color,
    error: Color,
    high_risk: Color,
    low_risk: Color,
    pub(crate) rain: Color,
    pub(crate) temperature: Color,
}

impl Theme {
    pub(crate) fn dark() -> Self {
        Self {
            border: Color::DarkGray,
            focus: Color::Cyan,
            title: Color::Blue,
            text: Color::White,
            dim: Color::Gray,
            error: Color::Red,
            high_risk: Color::Red,
            low_risk: Color::Green,
            rain: Color::LightBlue,
            temperature: Color::LightRed,
        }
    }

    pub(crate) fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(Span::styled(title, Style::default().fg(self.title).add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
    }

    /// Summary card; the border carries the risk color.
    pub(crate) fn risk_block<'a>(&self, title: &'a str, style: RiskStyle) -> Block<'a> {
        let color = self.risk_color(style);
        Block::default()
            .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
    }

    pub(crate) fn risk_color(&self, style: RiskStyle) -> Color {
        match style {
            RiskStyle::High => self.high_risk,
            RiskStyle::Low => self.low_risk,
        }
    }

    pub(crate) fn field_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub(crate) fn button_style(&self, focused: bool, enabled: bool) -> Style {
        if !enabled {
            return Style::default().fg(self.border);
        }
        let style = Style::default().fg(self.text).add_modifier(Modifier::BOLD);
        if focused { style.fg(Color::Black).bg(self.focus) } else { style }
    }

    pub(crate) fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub(crate) fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub(crate) fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }
}
