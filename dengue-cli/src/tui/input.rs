use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dengue_core::{Horizon, RiskClient, panel::spawn_fetch};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::app::{AppState, FetchDone, Focus};

/// Returns `true` when the user asked to quit.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    client: &Arc<dyn RiskClient>,
    done_tx: &mpsc::Sender<FetchDone>,
) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        KeyCode::Enter => submit(app, client, done_tx),
        KeyCode::Char(_) if is_shortcut(key.modifiers) => {}
        _ => match app.focus {
            Focus::Neighborhood => match key.code {
                KeyCode::Char(c) => app.type_char(c),
                KeyCode::Backspace => app.backspace(),
                _ => {}
            },
            Focus::Horizon => match key.code {
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') => {
                    app.horizon = app.horizon.prev()
                }
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l') => {
                    app.horizon = app.horizon.next()
                }
                KeyCode::Char(c) => {
                    if let Ok(h) = c.to_string().parse::<Horizon>() {
                        app.horizon = h;
                    }
                }
                _ => {}
            },
            Focus::Submit => {
                if key.code == KeyCode::Char(' ') {
                    submit(app, client, done_tx);
                }
            }
        },
    }
    false
}

/// Chords like Ctrl-U or Alt-B are not text; Shift is.
fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

fn submit(app: &mut AppState, client: &Arc<dyn RiskClient>, done_tx: &mpsc::Sender<FetchDone>) {
    let Some((ticket, query)) = app.try_submit() else {
        return;
    };

    let client = Arc::clone(client);
    let done_tx = done_tx.clone();
    tokio::spawn(async move {
        let outcome = spawn_fetch(client, query).await;
        if done_tx.send(FetchDone { ticket, outcome }).await.is_err() {
            tracing::debug!(ticket = ticket.seq(), "panel closed before response arrived");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dengue_core::{FetchError, PanelPhase, RiskQuery, RiskReport};

    #[derive(Debug)]
    struct Unreachable;

    #[async_trait]
    impl RiskClient for Unreachable {
        async fn fetch(&self, _query: &RiskQuery) -> Result<RiskReport, FetchError> {
            Err(FetchError::Transport("connection refused".into()))
        }
    }

    fn fixture() -> (AppState, Arc<dyn RiskClient>, mpsc::Sender<FetchDone>, mpsc::Receiver<FetchDone>) {
        let (tx, rx) = mpsc::channel(4);
        (AppState::new(Horizon::OneDay), Arc::new(Unreachable), tx, rx)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, client: &Arc<dyn RiskClient>, tx: &mpsc::Sender<FetchDone>, text: &str) {
        for c in text.chars() {
            let modifiers = if c.is_uppercase() { KeyModifiers::SHIFT } else { KeyModifiers::NONE };
            assert!(!handle_key_event(KeyEvent::new(KeyCode::Char(c), modifiers), app, client, tx));
        }
    }

    #[test]
    fn typing_fills_neighborhood() {
        let (mut app, client, tx, _rx) = fixture();

        type_text(&mut app, &client, &tx, "Vila Regina I");
        handle_key_event(press(KeyCode::Backspace), &mut app, &client, &tx);

        assert_eq!(app.neighborhood, "Vila Regina ");
    }

    #[test]
    fn control_and_alt_chords_are_not_typed() {
        let (mut app, client, tx, _rx) = fixture();
        type_text(&mut app, &client, &tx, "centro");

        for modifiers in [KeyModifiers::CONTROL, KeyModifiers::ALT] {
            let quit = handle_key_event(KeyEvent::new(KeyCode::Char('u'), modifiers), &mut app, &client, &tx);
            assert!(!quit);
        }

        assert_eq!(app.neighborhood, "centro");
    }

    #[test]
    fn esc_and_ctrl_c_quit() {
        let (mut app, client, tx, _rx) = fixture();

        assert!(handle_key_event(press(KeyCode::Esc), &mut app, &client, &tx));
        assert!(handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &client,
            &tx
        ));
        assert!(!handle_key_event(press(KeyCode::Char('c')), &mut app, &client, &tx));
    }

    #[test]
    fn horizon_digits_and_arrows() {
        let (mut app, client, tx, _rx) = fixture();
        handle_key_event(press(KeyCode::Tab), &mut app, &client, &tx);
        assert_eq!(app.focus, Focus::Horizon);

        handle_key_event(press(KeyCode::Char('5')), &mut app, &client, &tx);
        assert_eq!(app.horizon, Horizon::FiveDays);

        handle_key_event(press(KeyCode::Char('2')), &mut app, &client, &tx);
        assert_eq!(app.horizon, Horizon::FiveDays);

        handle_key_event(press(KeyCode::Right), &mut app, &client, &tx);
        assert_eq!(app.horizon, Horizon::OneDay);

        handle_key_event(press(KeyCode::Left), &mut app, &client, &tx);
        assert_eq!(app.horizon, Horizon::FiveDays);
        assert!(app.neighborhood.is_empty());
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, client, tx, _rx) = fixture();
        let mut key = press(KeyCode::Esc);
        key.kind = KeyEventKind::Release;

        assert!(!handle_key_event(key, &mut app, &client, &tx));
    }

    #[tokio::test]
    async fn space_on_button_submits_and_result_comes_back() {
        let (mut app, client, tx, mut rx) = fixture();
        type_text(&mut app, &client, &tx, "CENTRO");
        handle_key_event(press(KeyCode::BackTab), &mut app, &client, &tx);
        assert_eq!(app.focus, Focus::Submit);

        handle_key_event(press(KeyCode::Char(' ')), &mut app, &client, &tx);
        assert!(app.panel.is_loading());
        assert!(!app.panel.view().submit_enabled);

        let done = rx.recv().await.expect("fetch result is delivered");
        app.handle_done(done);

        assert_eq!(app.panel.phase(), PanelPhase::Error);
        assert_eq!(app.panel.view().error.as_deref(), Some("Error: connection refused"));
        assert!(app.panel.view().submit_enabled);
    }

    #[tokio::test]
    async fn enter_with_empty_form_does_not_submit() {
        let (mut app, client, tx, mut rx) = fixture();

        handle_key_event(press(KeyCode::Enter), &mut app, &client, &tx);

        assert!(!app.panel.is_loading());
        assert!(app.notice.is_some());
        assert!(rx.try_recv().is_err());
    }
}
