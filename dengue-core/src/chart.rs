//! Bar + line combination chart over the daily forecast.
//!
//! Front ends draw a [`ComboChart`]; they never build one. The panel owns the
//! single live instance and disposes it before building the next.

use crate::{format, model::DailyForecast};

/// Suggested span for the temperature axis, in °C.
pub const SUGGESTED_TEMPERATURE_RANGE: (f64, f64) = (15.0, 35.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    /// Clamped ranges never move; suggested ones widen to fit the data.
    pub clamped: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub title: &'static str,
    pub side: AxisSide,
    pub range: AxisRange,
}

impl Axis {
    pub fn fixed(title: &'static str, side: AxisSide, min: f64, max: f64) -> Self {
        Self { title, side, range: AxisRange { min, max, clamped: true } }
    }

    /// Starts at `min..max` and grows to include every finite value.
    pub fn suggested(
        title: &'static str,
        side: AxisSide,
        min: f64,
        max: f64,
        values: &[f64],
    ) -> Self {
        let (lo, hi) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((min, max), |(lo, hi), v| (lo.min(v), hi.max(v)));

        Self { title, side, range: AxisRange { min: lo, max: hi, clamped: false } }
    }

    /// Position of `value` on this axis as a 0..=1 fraction.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.range.max - self.range.min;
        if span <= 0.0 {
            return 0.0;
        }
        let f = (value - self.range.min) / span;
        if self.range.clamped { f.clamp(0.0, 1.0) } else { f }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: &'static str,
    pub kind: SeriesKind,
    pub values: Vec<f64>,
    pub axis: Axis,
}

#[derive(Debug, PartialEq)]
pub struct ComboChart {
    generation: u64,
    pub categories: Vec<String>,
    pub bars: Series,
    pub line: Series,
}

impl ComboChart {
    /// Rain probability as bars on a 0-100 left axis, max temperature as a
    /// line on the right axis.
    pub(crate) fn build(generation: u64, days: &[DailyForecast]) -> Self {
        let categories = days.iter().map(|d| format::day_month(&d.data)).collect();
        let rain: Vec<f64> = days.iter().map(|d| d.probabilidade_chuva_pct).collect();
        let max_temp: Vec<f64> = days.iter().map(|d| d.maxima_c).collect();

        let (suggested_min, suggested_max) = SUGGESTED_TEMPERATURE_RANGE;
        let temperature_axis =
            Axis::suggested("Max °C", AxisSide::Right, suggested_min, suggested_max, &max_temp);

        tracing::debug!(generation, points = days.len(), "chart built");

        Self {
            generation,
            categories,
            bars: Series {
                label: "Rain chance (%)",
                kind: SeriesKind::Bar,
                values: rain,
                axis: Axis::fixed("Rain %", AxisSide::Left, 0.0, 100.0),
            },
            line: Series {
                label: "Max temperature (°C)",
                kind: SeriesKind::Line,
                values: max_temp,
                axis: temperature_axis,
            },
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Releases this instance. Consumes it so a disposed chart cannot be drawn.
    pub fn dispose(self) {
        tracing::debug!(generation = self.generation, "chart disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, rain: f64, max: f64) -> DailyForecast {
        DailyForecast {
            data: date.into(),
            resumo_tempo: "nublado".into(),
            minima_c: 18.0,
            maxima_c: max,
            probabilidade_chuva_pct: rain,
        }
    }

    #[test]
    fn series_follow_record_order() {
        let days = [day("2024-11-06", 80.0, 28.0), day("2024-11-07", 10.0, 31.5)];
        let chart = ComboChart::build(1, &days);

        assert_eq!(chart.categories, vec!["06/11", "07/11"]);
        assert_eq!(chart.bars.values, vec![80.0, 10.0]);
        assert_eq!(chart.line.values, vec![28.0, 31.5]);
        assert_eq!(chart.bars.kind, SeriesKind::Bar);
        assert_eq!(chart.line.kind, SeriesKind::Line);
        assert_eq!(chart.bars.axis.side, AxisSide::Left);
        assert_eq!(chart.line.axis.side, AxisSide::Right);
    }

    #[test]
    fn rain_axis_is_clamped_to_percent() {
        let chart = ComboChart::build(1, &[day("2024-11-06", 100.0, 20.0)]);
        let axis = &chart.bars.axis;

        assert_eq!(axis.range, AxisRange { min: 0.0, max: 100.0, clamped: true });
        assert_eq!(axis.fraction(150.0), 1.0);
        assert_eq!(axis.fraction(50.0), 0.5);
    }

    #[test]
    fn temperature_axis_widens_past_suggestion() {
        let chart = ComboChart::build(1, &[day("2024-11-06", 0.0, 38.2), day("2024-11-07", 0.0, 12.0)]);
        let range = chart.line.axis.range;

        assert!(!range.clamped);
        assert_eq!(range.min, 12.0);
        assert_eq!(range.max, 38.2);
    }

    #[test]
    fn temperature_axis_keeps_suggestion_when_data_fits() {
        let chart = ComboChart::build(1, &[day("2024-11-06", 0.0, 25.0)]);
        assert_eq!(chart.line.axis.range.min, 15.0);
        assert_eq!(chart.line.axis.range.max, 35.0);
    }
}
