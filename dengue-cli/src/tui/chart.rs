//! Draws a [`ComboChart`]: rain bars against the left axis, the temperature
//! line against the right axis, dates underneath.

use dengue_core::{Axis, ComboChart};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};

use super::theme::Theme;

/// Vertical plot units; the band below zero holds the date labels.
const PLOT_TOP: f64 = 100.0;
const LABEL_BAND: f64 = 12.0;
const BAR_FILL: f64 = 0.6;
const BAR_STROKES: usize = 12;

pub(crate) fn draw_chart(frame: &mut Frame, area: Rect, chart: &ComboChart, theme: &Theme) {
    let block = theme.block("Rain chance & max temperature");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(inner);

    let legend = Line::from(vec![
        Span::styled("█ ", Style::default().fg(theme.rain)),
        Span::styled(chart.bars.label, theme.text_style()),
        Span::raw("   "),
        Span::styled("● ", Style::default().fg(theme.temperature)),
        Span::styled(chart.line.label, theme.text_style()),
    ]);
    frame.render_widget(Paragraph::new(legend), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Min(10), Constraint::Length(7)])
        .split(rows[1]);

    frame.render_widget(axis_labels(&chart.bars.axis, cols[0].height, Alignment::Right, theme), cols[0]);
    frame.render_widget(axis_labels(&chart.line.axis, cols[2].height, Alignment::Left, theme), cols[2]);

    let n = chart.len() as f64;
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, n.max(1.0)])
        .y_bounds([-LABEL_BAND, PLOT_TOP])
        .paint(|ctx| {
            for (i, value) in chart.bars.values.iter().enumerate() {
                let height = chart.bars.axis.fraction(*value) * PLOT_TOP;
                let left = i as f64 + (1.0 - BAR_FILL) / 2.0;
                for k in 0..=BAR_STROKES {
                    let x = left + BAR_FILL * k as f64 / BAR_STROKES as f64;
                    ctx.draw(&CanvasLine::new(x, 0.0, x, height, theme.rain));
                }
            }

            ctx.layer();

            let points: Vec<(f64, f64)> = chart
                .line
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64 + 0.5, chart.line.axis.fraction(*v) * PLOT_TOP))
                .collect();
            for pair in points.windows(2) {
                let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                ctx.draw(&CanvasLine::new(x1, y1, x2, y2, theme.temperature));
            }
            ctx.draw(&Points { coords: &points, color: theme.temperature });

            for (i, label) in chart.categories.iter().enumerate() {
                ctx.print(i as f64 + 0.3, -LABEL_BAND / 2.0, label.clone());
            }
        });
    frame.render_widget(canvas, cols[1]);
}

/// Max at the top, min at the bottom of the plot band, midpoint between.
fn axis_labels<'a>(axis: &Axis, height: u16, alignment: Alignment, theme: &Theme) -> Paragraph<'a> {
    let plot_rows = height.saturating_sub(1).max(1) as usize;
    let mid = (axis.range.min + axis.range.max) / 2.0;

    let mut lines = vec![Line::raw(""); plot_rows];
    lines[0] = Line::raw(format!("{:.0}", axis.range.max));
    if plot_rows > 2 {
        lines[plot_rows / 2] = Line::raw(format!("{mid:.0}"));
    }
    if plot_rows > 1 {
        lines[plot_rows - 1] = Line::raw(format!("{:.0}", axis.range.min));
    }
    lines.push(Line::styled(axis.title, theme.dim_style()));

    Paragraph::new(lines).alignment(alignment).style(theme.dim_style())
}
