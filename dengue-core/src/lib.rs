//! Core library for the `dengue` risk forecast panel.
//!
//! This crate defines:
//! - The risk report model and the forecast horizon choice
//! - The HTTP client for the `/prever_risco` prediction endpoint
//! - The panel controller driving one submit → render-or-error cycle
//! - Display formatting and the bar/line chart model
//! - Configuration handling
//!
//! It is used by `dengue-cli`, but front ends only depend on [`ForecastPanel`]
//! and its [`PanelView`], so other binaries can drive it too.

pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod panel;

pub use chart::{Axis, AxisRange, AxisSide, ComboChart, Series, SeriesKind};
pub use client::{ClientConfig, HttpRiskClient, RiskClient};
pub use config::Config;
pub use error::FetchError;
pub use model::{DailyForecast, Horizon, Probability, RiskQuery, RiskReport, RiskTier};
pub use panel::{ForecastEntry, ForecastPanel, PanelPhase, PanelView, RiskStyle, Summary, Ticket};
