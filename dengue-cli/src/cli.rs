use anyhow::Context;
use clap::{Parser, Subcommand};
use dengue_core::{
    Config, ForecastPanel, Horizon, HttpRiskClient, RiskClient, RiskQuery,
    client::{ClientConfig, DEFAULT_ENDPOINT},
};
use inquire::{CustomType, Select, Text};
use std::{io, process::ExitCode, sync::Arc};

use crate::{logging, print, tui};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dengue", version, about = "Dengue risk forecast panel")]
pub struct Cli {
    /// Prediction service base URL; overrides the configured one.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Also write logs to stderr.
    #[arg(long, global = true, default_value_t = false)]
    pub log_to_stderr: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the service endpoint, default horizon and timeout.
    Configure,

    /// Analyze one neighborhood and print the result.
    Show {
        /// Neighborhood name, e.g. "VILA REGINA I".
        bairro: String,

        /// Forecast horizon in days: 1, 3 or 5. Defaults to the configured one.
        #[arg(long)]
        dias: Option<Horizon>,

        /// Print the service response as JSON instead of the panel.
        #[arg(long)]
        json: bool,
    },

    /// Open the interactive forecast panel.
    Tui {
        /// Horizon preselected in the form.
        #[arg(long)]
        dias: Option<Horizon>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                logging::init_stderr(self.log_to_stderr);
                configure(config_or_default(Config::load()))?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { bairro, dias, json } => {
                logging::init_stderr(self.log_to_stderr);
                let config = Config::load()?;

                if bairro.trim().is_empty() {
                    anyhow::bail!("Neighborhood must not be empty.");
                }

                let horizon = match dias {
                    Some(h) => h,
                    None => config.default_horizon()?,
                };
                let client = build_client(&config, self.endpoint.as_deref())?;
                let query = RiskQuery::new(bairro, horizon);

                if json {
                    let report = client.fetch(&query).await?;
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    return Ok(ExitCode::SUCCESS);
                }

                let mut panel = ForecastPanel::new();
                panel.submit(client, query).await;
                print::print_panel(&mut io::stdout().lock(), &mut io::stderr().lock(), &panel)?;

                Ok(if panel.view().error.is_some() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
            }
            Command::Tui { dias } => {
                let _guard = logging::init_file(&Config::log_dir()?, self.log_to_stderr)?;
                let config = Config::load()?;

                let horizon = match dias {
                    Some(h) => h,
                    None => config.default_horizon()?,
                };
                let client = build_client(&config, self.endpoint.as_deref())?;
                tui::run(client, horizon)?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// `configure` must work even when the stored file is broken, since it is
/// how the file gets rewritten.
fn config_or_default(loaded: anyhow::Result<Config>) -> Config {
    loaded.unwrap_or_else(|err| {
        tracing::warn!(error = %format!("{err:#}"), "ignoring unreadable config, starting from defaults");
        Config::default()
    })
}

fn build_client(config: &Config, endpoint: Option<&str>) -> anyhow::Result<Arc<dyn RiskClient>> {
    let client_config = config.client_config(endpoint);
    let client = HttpRiskClient::new(&client_config)
        .with_context(|| format!("Cannot use endpoint {}", client_config.endpoint))?;
    Ok(Arc::new(client))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let current = config.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let endpoint = Text::new("Prediction service endpoint:").with_default(&current).prompt()?;
    HttpRiskClient::new(&ClientConfig { endpoint: endpoint.clone(), timeout: None })?;

    let horizons = Horizon::all().to_vec();
    let current_horizon = config.default_horizon().unwrap_or_default();
    let cursor = horizons.iter().position(|h| *h == current_horizon).unwrap_or(0);
    let horizon = Select::new("Default forecast horizon (days):", horizons)
        .with_starting_cursor(cursor)
        .prompt()?;

    let timeout = CustomType::<u64>::new("Request timeout in seconds (0 = no limit):")
        .with_default(config.timeout_secs.unwrap_or(0))
        .prompt()?;

    config.endpoint = Some(endpoint);
    config.set_default_horizon(horizon);
    config.timeout_secs = (timeout > 0).then_some(timeout);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let broken = Config::from_toml("endpoint = [not toml");
        assert!(broken.is_err());

        assert_eq!(config_or_default(broken), Config::default());
    }

    #[test]
    fn readable_config_is_kept() {
        let cfg = Config { endpoint: Some("http://risk.local:8080".into()), ..Default::default() };
        assert_eq!(config_or_default(Ok(cfg.clone())), cfg);
    }

    #[test]
    fn show_accepts_horizon_flag() {
        let cli = Cli::try_parse_from(["dengue", "show", "VILA REGINA I", "--dias", "3"]).unwrap();
        match cli.command {
            Command::Show { bairro, dias, json } => {
                assert_eq!(bairro, "VILA REGINA I");
                assert_eq!(dias, Some(Horizon::ThreeDays));
                assert!(!json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_rejects_unsupported_horizon() {
        assert!(Cli::try_parse_from(["dengue", "show", "CENTRO", "--dias", "2"]).is_err());
    }
}
