use crossterm::ExecutableCommand;
use crossterm::cursor::Show;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::panic;

pub(crate) type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode and the alternate screen. If any step fails, the steps that
/// already ran are undone before the error is returned.
pub(crate) fn setup_terminal() -> anyhow::Result<Tui> {
    enable_raw_mode()?;
    let terminal = enter_screen().inspect_err(|_| reset_terminal());
    if terminal.is_ok() {
        install_panic_hook();
    }
    terminal
}

fn enter_screen() -> anyhow::Result<Tui> {
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

pub(crate) fn restore_terminal(terminal: &mut Tui) -> anyhow::Result<()> {
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Best-effort restore for paths that have no `Tui` at hand. Errors are
/// ignored, the terminal may already be half torn down.
fn reset_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = stdout.execute(LeaveAlternateScreen);
    let _ = stdout.execute(Show);
}

/// A panic inside the event loop would otherwise print its message into the
/// alternate screen and leave the shell in raw mode.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        reset_terminal();
        previous(info);
    }));
}
