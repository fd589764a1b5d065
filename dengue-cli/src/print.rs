//! Plain-text rendering of the panel for `dengue show`.

use dengue_core::{Axis, ComboChart, ForecastPanel, PanelView, RiskStyle};
use std::io::{self, Write};

const BAR_WIDTH: usize = 20;
const LINE_WIDTH: usize = 20;

/// Results go to `out`; the error region goes to `err`.
pub(crate) fn print_panel(
    out: &mut impl Write,
    err: &mut impl Write,
    panel: &ForecastPanel,
) -> io::Result<()> {
    let view = panel.view();

    if let Some(error) = &view.error {
        writeln!(err, "{error}")?;
        return Ok(());
    }
    if !view.results_visible {
        return Ok(());
    }

    print_summary(out, view)?;
    print_forecast(out, view)?;
    if let Some(chart) = panel.chart().filter(|c| !c.is_empty()) {
        print_chart(out, chart)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, view: &PanelView) -> io::Result<()> {
    let Some(summary) = &view.summary else {
        return Ok(());
    };

    let badge = match summary.style {
        RiskStyle::High => "[HIGH RISK]",
        RiskStyle::Low => "[low risk]",
    };
    write!(out, "{}  {badge}", summary.neighborhood)?;
    if let Some(period) = &summary.period {
        write!(out, "  ({period})")?;
    }
    writeln!(out)?;
    writeln!(out, "{}", summary.probability)?;
    writeln!(out, "Risk level: {}", summary.tier)?;
    Ok(())
}

fn print_forecast(out: &mut impl Write, view: &PanelView) -> io::Result<()> {
    if view.forecast.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Weather forecast")?;
    for entry in &view.forecast {
        writeln!(
            out,
            "  {}  {:<24} Temp: {:<18} Rain: {}",
            entry.date,
            entry.summary,
            entry.temperature(),
            entry.rain()
        )?;
    }
    Ok(())
}

/// One row per day: the rain bar on the left axis, the temperature marker on
/// the right axis.
fn print_chart(out: &mut impl Write, chart: &ComboChart) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "  {:<5}  {:<w$}        {}",
        "",
        axis_caption(&chart.bars.axis),
        axis_caption(&chart.line.axis),
        w = BAR_WIDTH
    )?;

    for (i, label) in chart.categories.iter().enumerate() {
        let rain = chart.bars.values[i];
        let temp = chart.line.values[i];
        writeln!(
            out,
            "  {label:<5}  {} {:>4}%  {} {:.1}",
            bar(&chart.bars.axis, rain),
            rain.round() as i64,
            marker(&chart.line.axis, temp),
            temp
        )?;
    }
    Ok(())
}

fn axis_caption(axis: &Axis) -> String {
    format!("{} {:.0}..{:.0}", axis.title, axis.range.min, axis.range.max)
}

fn bar(axis: &Axis, value: f64) -> String {
    let filled = (axis.fraction(value) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn marker(axis: &Axis, value: f64) -> String {
    let slot = (axis.fraction(value) * (LINE_WIDTH - 1) as f64).round();
    let slot = slot.clamp(0.0, (LINE_WIDTH - 1) as f64) as usize;
    (0..LINE_WIDTH).map(|i| if i == slot { '●' } else { '─' }).collect()
}
