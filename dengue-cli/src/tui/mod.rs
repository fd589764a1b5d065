mod app;
mod chart;
mod input;
mod render;
mod terminal;
mod theme;

use crossterm::event::{self, Event};
use dengue_core::{Horizon, RiskClient};
use ratatui::{Terminal, backend::Backend};
use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;

use app::{AppState, FetchDone};
use input::handle_key_event;
use render::draw_ui;
use terminal::{restore_terminal, setup_terminal};

/// Run the interactive panel until the user quits.
pub(crate) fn run(client: Arc<dyn RiskClient>, horizon: Horizon) -> anyhow::Result<()> {
    let (done_tx, mut done_rx) = mpsc::channel::<FetchDone>(16);
    let mut app = AppState::new(horizon);

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &client, &done_tx, &mut done_rx);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    client: &Arc<dyn RiskClient>,
    done_tx: &mpsc::Sender<FetchDone>,
    done_rx: &mut mpsc::Receiver<FetchDone>,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(done) = done_rx.try_recv() {
            app.handle_done(done);
        }

        terminal.draw(|frame| draw_ui(frame, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(key, app, client, done_tx) {
                    break;
                }
            }
        }
    }
    Ok(())
}
