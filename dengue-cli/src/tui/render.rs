use dengue_core::{Horizon, PanelView};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};

use super::app::{AppState, Focus};
use super::chart::draw_chart;
use super::theme::Theme;

pub(crate) fn draw_ui(frame: &mut Frame, app: &AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_form(frame, chunks[0], app, &theme);
    draw_status(frame, chunks[1], app, &theme);

    let view = app.panel.view();
    if view.results_visible {
        draw_results(frame, chunks[2], app, &theme);
    } else {
        let hint = Paragraph::new(Line::styled(
            "Type a neighborhood, pick a horizon and press Enter.",
            theme.dim_style(),
        ))
        .block(theme.block("Results"));
        frame.render_widget(hint, chunks[2]);
    }

    let help = Paragraph::new(Line::styled(
        "Tab focus  ←/→ horizon  Enter analyze  Esc quit",
        theme.dim_style(),
    ));
    frame.render_widget(help, chunks[3]);
}

fn draw_form(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let view = app.panel.view();

    let cursor = if app.focus == Focus::Neighborhood { "▏" } else { "" };
    let neighborhood = Line::from(vec![
        Span::styled("Neighborhood: ", theme.dim_style()),
        Span::styled(
            format!("{}{cursor}", app.neighborhood),
            theme.field_style(app.focus == Focus::Neighborhood),
        ),
    ]);

    let mut horizon = vec![Span::styled("Horizon:      ", theme.dim_style())];
    for option in Horizon::all() {
        let mark = if *option == app.horizon { "(•)" } else { "( )" };
        let unit = if option.days() == 1 { "day" } else { "days" };
        horizon.push(Span::styled(
            format!("{mark} {} {unit}  ", option.days()),
            theme.field_style(app.focus == Focus::Horizon && *option == app.horizon),
        ));
    }

    let button = Line::from(Span::styled(
        "[ Analyze ]",
        theme.button_style(app.focus == Focus::Submit, view.submit_enabled),
    ));

    let form = Paragraph::new(vec![neighborhood, Line::from(horizon), button])
        .block(theme.block("Dengue risk forecast"));
    frame.render_widget(form, area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let view = app.panel.view();

    let line = if view.loading_visible {
        Line::styled("Analyzing...", theme.text_style().add_modifier(Modifier::ITALIC))
    } else if let Some(error) = &view.error {
        Line::styled(error.as_str(), theme.error_style())
    } else if let Some(notice) = &app.notice {
        Line::styled(notice.as_str(), theme.error_style())
    } else if let Some(at) = view.last_update {
        Line::styled(format!("Updated at {}", at.format("%H:%M:%S")), theme.dim_style())
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_results(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let view = app.panel.view();
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(3)])
        .split(body[0]);

    draw_summary(frame, left[0], view, theme);
    draw_forecast_list(frame, left[1], view, theme);

    match app.panel.chart() {
        Some(chart) if !chart.is_empty() => draw_chart(frame, body[1], chart, theme),
        _ => {
            let empty = Paragraph::new(Line::styled("No forecast days returned.", theme.dim_style()))
                .block(theme.block("Rain chance & max temperature"));
            frame.render_widget(empty, body[1]);
        }
    }
}

fn draw_summary(frame: &mut Frame, area: Rect, view: &PanelView, theme: &Theme) {
    let Some(summary) = &view.summary else {
        return;
    };

    let mut lines = vec![
        Line::styled(summary.neighborhood.as_str(), theme.text_style().add_modifier(Modifier::BOLD)),
        Line::styled(summary.probability.as_str(), theme.text_style()),
        Line::from(Span::styled(
            summary.tier.as_str(),
            theme.text_style().fg(theme.risk_color(summary.style)).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(period) = &summary.period {
        lines.push(Line::styled(format!("Period: {period}"), theme.dim_style()));
    }

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(theme.risk_block("Dengue risk", summary.style));
    frame.render_widget(card, area);
}

fn draw_forecast_list(frame: &mut Frame, area: Rect, view: &PanelView, theme: &Theme) {
    let items = view
        .forecast
        .iter()
        .map(|entry| {
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(format!("{}  ", entry.date), theme.text_style().add_modifier(Modifier::BOLD)),
                    Span::styled(entry.summary.as_str(), theme.text_style()),
                ]),
                Line::styled(format!("       Temp: {}", entry.temperature()), theme.dim_style()),
                Line::styled(format!("       Rain: {}", entry.rain()), theme.dim_style()),
            ]))
        })
        .collect::<Vec<_>>();

    frame.render_widget(List::new(items).block(theme.block("Weather forecast")), area);
}
