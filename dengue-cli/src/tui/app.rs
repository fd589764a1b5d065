use dengue_core::{FetchError, ForecastPanel, Horizon, RiskQuery, RiskReport, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Neighborhood,
    Horizon,
    Submit,
}

impl Focus {
    pub(crate) fn next(self) -> Self {
        match self {
            Focus::Neighborhood => Focus::Horizon,
            Focus::Horizon => Focus::Submit,
            Focus::Submit => Focus::Neighborhood,
        }
    }

    pub(crate) fn prev(self) -> Self {
        match self {
            Focus::Neighborhood => Focus::Submit,
            Focus::Horizon => Focus::Neighborhood,
            Focus::Submit => Focus::Horizon,
        }
    }
}

/// Result of one background fetch, tagged with the ticket it was issued for.
#[derive(Debug)]
pub(crate) struct FetchDone {
    pub(crate) ticket: Ticket,
    pub(crate) outcome: Result<RiskReport, FetchError>,
}

pub(crate) struct AppState {
    pub(crate) neighborhood: String,
    pub(crate) horizon: Horizon,
    pub(crate) focus: Focus,
    pub(crate) panel: ForecastPanel,
    /// Form-level hint, e.g. a missing neighborhood.
    pub(crate) notice: Option<String>,
}

impl AppState {
    pub(crate) fn new(horizon: Horizon) -> Self {
        Self {
            neighborhood: String::new(),
            horizon,
            focus: Focus::Neighborhood,
            panel: ForecastPanel::new(),
            notice: None,
        }
    }

    /// Starts a submission if the form allows it.
    ///
    /// A disabled submit control (request in flight) and an empty
    /// neighborhood both refuse.
    pub(crate) fn try_submit(&mut self) -> Option<(Ticket, RiskQuery)> {
        if !self.panel.view().submit_enabled {
            return None;
        }
        if self.neighborhood.trim().is_empty() {
            self.notice = Some("Enter a neighborhood first.".to_string());
            self.focus = Focus::Neighborhood;
            return None;
        }

        self.notice = None;
        let ticket = self.panel.begin();
        tracing::info!(
            ticket = ticket.seq(),
            neighborhood = %self.neighborhood,
            horizon = %self.horizon,
            "submitting"
        );
        Some((ticket, RiskQuery::new(self.neighborhood.clone(), self.horizon)))
    }

    pub(crate) fn handle_done(&mut self, done: FetchDone) {
        self.panel.finish(done.ticket, done.outcome);
    }

    pub(crate) fn type_char(&mut self, c: char) {
        self.neighborhood.push(c);
        self.notice = None;
    }

    pub(crate) fn backspace(&mut self) {
        self.neighborhood.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_neighborhood_is_refused() {
        let mut app = AppState::new(Horizon::OneDay);
        app.neighborhood = "   ".into();
        app.focus = Focus::Submit;

        assert!(app.try_submit().is_none());
        assert!(app.notice.is_some());
        assert_eq!(app.focus, Focus::Neighborhood);
        assert!(!app.panel.is_loading());
    }

    #[test]
    fn submit_is_ignored_while_loading() {
        let mut app = AppState::new(Horizon::ThreeDays);
        "VILA REGINA I".chars().for_each(|c| app.type_char(c));

        let (ticket, query) = app.try_submit().expect("first submit starts");
        assert_eq!(query, RiskQuery::new("VILA REGINA I", Horizon::ThreeDays));
        assert!(app.try_submit().is_none());

        app.handle_done(FetchDone {
            ticket,
            outcome: Err(FetchError::Transport("connection refused".into())),
        });
        assert!(app.panel.view().submit_enabled);
        assert!(app.try_submit().is_some());
    }

    #[test]
    fn focus_cycles() {
        assert_eq!(Focus::Neighborhood.next().next().next(), Focus::Neighborhood);
        assert_eq!(Focus::Neighborhood.prev(), Focus::Submit);
    }
}
