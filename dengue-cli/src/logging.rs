use std::{io, path::Path};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// One-shot commands: human output goes to stdout, logs to stderr.
pub(crate) fn init_stderr(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false))
        .init();
}

/// The terminal UI owns the screen, so logs go to a daily file.
pub(crate) fn init_file(
    log_dir: &Path,
    log_to_stderr: bool,
) -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "dengue.log");
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(false);

    let registry = tracing_subscriber::registry().with(env_filter("info")).with(file_layer);

    if log_to_stderr {
        let stderr_layer =
            tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(false);
        registry.with(stderr_layer).init();
    } else {
        registry.init();
    }

    Ok(file_guard)
}

/// `RUST_LOG` wins; otherwise our own crates log at `level` and
/// dependencies (reqwest, hyper, rustls) only at warn.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: &str) -> String {
    format!("warn,dengue_core={level},dengue={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        let directives = default_directives("info");
        assert_eq!(directives, "warn,dengue_core=info,dengue=info");
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
