//! Forecast panel controller.
//!
//! Owns one submit cycle at a time: `begin` puts the panel into its busy
//! state, `finish` renders the outcome and always clears the busy state.
//! Front ends only read [`PanelView`] and the current [`ComboChart`].

use chrono::{DateTime, Local};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    chart::ComboChart,
    client::RiskClient,
    error::FetchError,
    format,
    model::{RiskQuery, RiskReport, RiskTier},
};

/// Style of the summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskStyle {
    High,
    Low,
}

impl From<RiskTier> for RiskStyle {
    fn from(tier: RiskTier) -> Self {
        match tier {
            RiskTier::High => RiskStyle::High,
            RiskTier::Low => RiskStyle::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub neighborhood: String,
    pub probability: String,
    pub tier: String,
    pub style: RiskStyle,
    pub period: Option<String>,
}

/// One rendered day of the forecast list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEntry {
    pub date: String,
    pub summary: String,
    pub min_c: String,
    pub max_c: String,
    pub rain_pct: String,
}

impl ForecastEntry {
    pub fn temperature(&self) -> String {
        format!("{}°C / {}°C", self.min_c, self.max_c)
    }

    pub fn rain(&self) -> String {
        format!("{}%", self.rain_pct)
    }
}

/// Everything a front end needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub loading_visible: bool,
    pub submit_enabled: bool,
    /// Text of the error region; `None` means hidden.
    pub error: Option<String>,
    pub results_visible: bool,
    pub summary: Option<Summary>,
    pub forecast: Vec<ForecastEntry>,
    pub last_update: Option<DateTime<Local>>,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            loading_visible: false,
            submit_enabled: true,
            error: None,
            results_visible: false,
            summary: None,
            forecast: Vec::new(),
            last_update: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    #[default]
    Idle,
    Loading,
    Error,
    Success,
}

/// Tag of one submission. Only the latest ticket may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ForecastPanel {
    view: PanelView,
    phase: PanelPhase,
    chart: Option<ComboChart>,
    charts_built: u64,
    charts_disposed: u64,
    latest: u64,
}

impl ForecastPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn chart(&self) -> Option<&ComboChart> {
        self.chart.as_ref()
    }

    pub fn charts_built(&self) -> u64 {
        self.charts_built
    }

    pub fn charts_disposed(&self) -> u64 {
        self.charts_disposed
    }

    pub fn is_loading(&self) -> bool {
        self.phase == PanelPhase::Loading
    }

    /// Enter the busy state and hand out the ticket for this submission.
    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.phase = PanelPhase::Loading;

        self.view.loading_visible = true;
        self.view.error = None;
        self.view.results_visible = false;
        self.view.submit_enabled = false;

        tracing::debug!(ticket = self.latest, "submission started");
        Ticket(self.latest)
    }

    /// Render the outcome of `ticket`. Returns `false` when the ticket is stale
    /// and the outcome was dropped.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<RiskReport, FetchError>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(ticket = ticket.0, latest = self.latest, "discarding stale response");
            return false;
        }

        match outcome {
            Ok(report) => {
                tracing::info!(
                    neighborhood = %report.bairro_pesquisado,
                    tier = %report.nivel_risco_calculado,
                    days = report.previsao_meteorologica_diaria.len(),
                    "risk forecast rendered"
                );
                self.render_summary(&report);
                self.render_forecast(&report);
                self.render_chart(&report);
                self.view.last_update = Some(Local::now());
                self.phase = PanelPhase::Success;
            }
            Err(err) => {
                tracing::warn!(error = %err, "risk forecast failed");
                self.show_error(&err);
                self.phase = PanelPhase::Error;
            }
        }

        self.view.loading_visible = false;
        self.view.submit_enabled = true;
        true
    }

    /// Full submit cycle. The fetch runs on its own task so a panic in the
    /// client still ends in the error state with the busy state cleared.
    /// Dropping the returned future before it completes does the same.
    pub async fn submit(&mut self, client: Arc<dyn RiskClient>, query: RiskQuery) {
        let ticket = self.begin();
        let pending = PendingSubmit { panel: self, ticket, armed: true };
        let outcome = spawn_fetch(client, query).await;
        pending.complete(outcome);
    }

    fn render_summary(&mut self, report: &RiskReport) {
        self.view.results_visible = true;
        self.view.summary = Some(Summary {
            neighborhood: report.bairro_pesquisado.clone(),
            probability: format::probability_label(&report.probabilidade_risco_dengue),
            tier: report.nivel_risco_calculado.clone(),
            style: report.tier().into(),
            period: report.periodo_analise.clone(),
        });
    }

    fn render_forecast(&mut self, report: &RiskReport) {
        self.view.forecast.clear();
        self.view.forecast.extend(report.previsao_meteorologica_diaria.iter().map(|day| {
            ForecastEntry {
                date: format::day_month(&day.data),
                summary: day.resumo_tempo.clone(),
                min_c: format::one_decimal(day.minima_c),
                max_c: format::one_decimal(day.maxima_c),
                rain_pct: format::whole_percent(day.probabilidade_chuva_pct),
            }
        }));
    }

    fn render_chart(&mut self, report: &RiskReport) {
        if let Some(old) = self.chart.take() {
            old.dispose();
            self.charts_disposed += 1;
        }

        self.charts_built += 1;
        self.chart = Some(ComboChart::build(self.charts_built, &report.previsao_meteorologica_diaria));
    }

    fn show_error(&mut self, err: &FetchError) {
        self.view.error = Some(format!("Error: {err}"));
    }
}

/// Submission in flight inside [`ForecastPanel::submit`]. Finishes the
/// ticket as cancelled if it is dropped before `complete`.
struct PendingSubmit<'a> {
    panel: &'a mut ForecastPanel,
    ticket: Ticket,
    armed: bool,
}

impl PendingSubmit<'_> {
    fn complete(mut self, outcome: Result<RiskReport, FetchError>) {
        self.armed = false;
        self.panel.finish(self.ticket, outcome);
    }
}

impl Drop for PendingSubmit<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.panel.finish(self.ticket, Err(FetchError::Unexpected("request cancelled".into())));
        }
    }
}

/// Aborts the fetch task when the awaiting future goes away.
struct AbortOnDrop(JoinHandle<Result<RiskReport, FetchError>>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run one fetch on a tokio task, folding a panic or cancellation into
/// [`FetchError::Unexpected`].
pub async fn spawn_fetch(
    client: Arc<dyn RiskClient>,
    query: RiskQuery,
) -> Result<RiskReport, FetchError> {
    let mut task = AbortOnDrop(tokio::spawn(async move { client.fetch(&query).await }));
    (&mut task.0).await?
}
