use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Forecast horizon in days. The prediction service only has models for these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Horizon {
    #[default]
    OneDay,
    ThreeDays,
    FiveDays,
}

impl Horizon {
    pub fn days(&self) -> u8 {
        match self {
            Horizon::OneDay => 1,
            Horizon::ThreeDays => 3,
            Horizon::FiveDays => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::OneDay => "1",
            Horizon::ThreeDays => "3",
            Horizon::FiveDays => "5",
        }
    }

    pub const fn all() -> &'static [Horizon] {
        &[Horizon::OneDay, Horizon::ThreeDays, Horizon::FiveDays]
    }

    /// Next choice in the radio group, wrapping around.
    pub fn next(&self) -> Horizon {
        match self {
            Horizon::OneDay => Horizon::ThreeDays,
            Horizon::ThreeDays => Horizon::FiveDays,
            Horizon::FiveDays => Horizon::OneDay,
        }
    }

    pub fn prev(&self) -> Horizon {
        match self {
            Horizon::OneDay => Horizon::FiveDays,
            Horizon::ThreeDays => Horizon::OneDay,
            Horizon::FiveDays => Horizon::ThreeDays,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Horizon::OneDay),
            "3" => Ok(Horizon::ThreeDays),
            "5" => Ok(Horizon::FiveDays),
            _ => Err(anyhow::anyhow!(
                "Invalid forecast horizon '{value}'. Supported horizons: 1, 3, 5."
            )),
        }
    }
}

/// What the user submitted from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskQuery {
    pub neighborhood: String,
    pub horizon: Horizon,
}

impl RiskQuery {
    pub fn new(neighborhood: impl Into<String>, horizon: Horizon) -> Self {
        Self { neighborhood: neighborhood.into(), horizon }
    }
}

/// Risk probability as sent by the service: usually preformatted text like
/// `"73.10%"`, sometimes a bare number. Shown verbatim either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Probability {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Probability::Text(text) => f.write_str(text),
            Probability::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    /// ISO date, `YYYY-MM-DD`.
    pub data: String,
    pub resumo_tempo: String,
    pub minima_c: f64,
    pub maxima_c: f64,
    pub probabilidade_chuva_pct: f64,
}

/// Body of a successful `/prever_risco` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub bairro_pesquisado: String,
    pub probabilidade_risco_dengue: Probability,
    pub nivel_risco_calculado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodo_analise: Option<String>,
    pub previsao_meteorologica_diaria: Vec<DailyForecast>,
}

impl RiskReport {
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_label(&self.nivel_risco_calculado)
    }
}

/// Binary risk classification driving the card style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    High,
    Low,
}

impl RiskTier {
    pub const HIGH_LABEL: &'static str = "ALTO";

    /// Only the exact label `ALTO` is high; anything else, empty included, is low.
    pub fn from_label(label: &str) -> Self {
        if label == Self::HIGH_LABEL { RiskTier::High } else { RiskTier::Low }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_as_str_roundtrip() {
        for horizon in Horizon::all() {
            let parsed: Horizon = horizon.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*horizon, parsed);
        }
    }

    #[test]
    fn unknown_horizon_error() {
        let err = "2".parse::<Horizon>().unwrap_err();
        assert!(err.to_string().contains("Invalid forecast horizon"));
    }

    #[test]
    fn horizon_cycles_through_radio_group() {
        assert_eq!(Horizon::OneDay.next(), Horizon::ThreeDays);
        assert_eq!(Horizon::FiveDays.next(), Horizon::OneDay);
        assert_eq!(Horizon::OneDay.prev(), Horizon::FiveDays);
    }

    #[test]
    fn only_exact_alto_is_high() {
        assert_eq!(RiskTier::from_label("ALTO"), RiskTier::High);
        for label in ["BAIXO", "MÉDIO", "", "alto", "ALTO "] {
            assert_eq!(RiskTier::from_label(label), RiskTier::Low, "label {label:?}");
        }
    }

    #[test]
    fn decodes_service_payload() {
        let body = r#"{
            "bairro_pesquisado": "VILA REGINA I",
            "periodo_analise": "3 dia(s)",
            "probabilidade_risco_dengue": "73.10%",
            "nivel_risco_calculado": "ALTO",
            "previsao_meteorologica_diaria": [
                {"data": "2024-11-06", "resumo_tempo": "chuva leve", "minima_c": 19.5,
                 "maxima_c": 28, "probabilidade_chuva_pct": 80.0}
            ]
        }"#;

        let report: RiskReport = serde_json::from_str(body).expect("payload should decode");
        assert_eq!(report.tier(), RiskTier::High);
        assert_eq!(report.probabilidade_risco_dengue.to_string(), "73.10%");
        assert_eq!(report.periodo_analise.as_deref(), Some("3 dia(s)"));
        assert_eq!(report.previsao_meteorologica_diaria[0].maxima_c, 28.0);
    }

    #[test]
    fn numeric_probability_is_kept_verbatim() {
        let p: Probability = serde_json::from_str("0.731").unwrap();
        assert_eq!(p.to_string(), "0.731");
    }

    #[test]
    fn missing_field_fails_to_decode() {
        let body = r#"{"bairro_pesquisado": "CENTRO", "nivel_risco_calculado": "BAIXO"}"#;
        assert!(serde_json::from_str::<RiskReport>(body).is_err());
    }
}
