//! Display strings for the summary card and the forecast list.

use crate::model::Probability;

/// `YYYY-MM-DD` -> `DD/MM`.
///
/// Plain string surgery: no calendar check, no timezone. Missing parts come
/// out empty rather than failing.
pub fn day_month(date: &str) -> String {
    let mut parts = date.split('-');
    let _year = parts.next();
    let month = parts.next().unwrap_or_default();
    let day = parts.next().unwrap_or_default();
    format!("{day}/{month}")
}

/// One decimal place, ties rounded away from zero (`27.25` -> `27.3`).
pub fn one_decimal(value: f64) -> String {
    // + 0.0 folds -0.0 into 0.0
    let rounded = (value * 10.0).round() / 10.0 + 0.0;
    format!("{rounded:.1}")
}

/// Whole-number percentage, `80.5` -> `81`.
pub fn whole_percent(value: f64) -> String {
    format!("{}", value.round() as i64)
}

pub fn probability_label(probability: &Probability) -> String {
    format!("Probability: {probability}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorders_iso_date() {
        assert_eq!(day_month("2024-11-06"), "06/11");
        assert_eq!(day_month("2025-01-31"), "31/01");
    }

    #[test]
    fn date_is_not_validated() {
        assert_eq!(day_month("2024-13-45"), "45/13");
        assert_eq!(day_month("garbage"), "/");
    }

    #[test]
    fn temperatures_have_one_decimal() {
        assert_eq!(one_decimal(28.0), "28.0");
        assert_eq!(one_decimal(27.25), "27.3");
        assert_eq!(one_decimal(19.04), "19.0");
        assert_eq!(one_decimal(-0.04), "0.0");
        assert_eq!(one_decimal(-3.25), "-3.3");
    }

    #[test]
    fn rain_is_whole_percent() {
        assert_eq!(whole_percent(80.0), "80");
        assert_eq!(whole_percent(12.5), "13");
        assert_eq!(whole_percent(0.0), "0");
    }

    #[test]
    fn probability_is_prefixed() {
        let p = Probability::Text("73.10%".into());
        assert_eq!(probability_label(&p), "Probability: 73.10%");
    }
}
