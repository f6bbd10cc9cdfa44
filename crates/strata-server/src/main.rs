use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use strata_console::{CapabilityState, ConsoleServer, HttpApi};
use strata_core::StrataConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Strata admin console")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the console web UI.
    Serve {
        #[command(flatten)]
        common: CommonArgs,

        /// Host to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,

        /// Hide links to the legacy consoles
        #[arg(long, default_value_t = false)]
        hide_legacy_links: bool,
    },

    /// Probe the data system once and print what it supports.
    Probe {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Path to strata.yaml (defaults to $STRATA_CONFIG, then built-in defaults)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Base URL of the data system router (overrides console.base_url)
    #[arg(long)]
    base_url: Option<String>,
}

impl CommonArgs {
    fn load(&self) -> anyhow::Result<StrataConfig> {
        let mut config = StrataConfig::load(self.config.as_deref())?;
        if let Some(base_url) = &self.base_url {
            config.console.base_url = Some(base_url.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve {
            common,
            host,
            port,
            hide_legacy_links,
        } => {
            let mut config = common.load()?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if hide_legacy_links {
                config.console.hide_legacy_links = true;
            }
            init_logging(&config);

            ConsoleServer::new(config).run_until(shutdown_signal()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Probe { common } => {
            let config = common.load()?;
            init_logging(&config);

            let api = HttpApi::new(&config.console)?;
            let capability = strata_console::probe::probe(&api).await;
            println!("{}: {}", api.base_url(), capability);

            Ok(if capability == CapabilityState::Broken {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn init_logging(config: &StrataConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from([
            "strata",
            "serve",
            "--port",
            "9100",
            "--base-url",
            "http://router:8888",
            "--hide-legacy-links",
        ])
        .unwrap();

        match cli.cmd {
            Command::Serve {
                common,
                port,
                hide_legacy_links,
                ..
            } => {
                assert_eq!(port, Some(9100));
                assert!(hide_legacy_links);
                assert_eq!(common.base_url.as_deref(), Some("http://router:8888"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_probe_with_config() {
        let cli = Cli::try_parse_from(["strata", "probe", "-c", "strata.yaml"]).unwrap();
        match cli.cmd {
            Command::Probe { common } => {
                assert_eq!(common.config, Some(PathBuf::from("strata.yaml")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
