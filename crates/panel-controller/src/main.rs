//! bridge-panel: terminal front end for the bridge control panel.
//!
//! Drives the same [`PanelController`] a graphical page would, against the
//! control server's HTTP API.
//!
//! # Usage
//!
//! ```text
//! bridge-panel [OPTIONS] [COMMAND]
//!
//! Commands:
//!   watch    Show the panel and keep it in sync until Ctrl+C (default)
//!   status   Print the bridge status once
//!   servers  List the discoverable game servers
//!   start    Start the bridge: --port <P> (--server <HOST:PORT> | --pick <N>)
//!   stop     Stop the bridge
//!   refresh  Rescan for servers and list them
//!   config   Print the effective configuration (--write saves it)
//!
//! Options:
//!   --config <PATH>     Config file [default: platform config dir]
//!   --api-url <URL>     Control server root URL
//!   --poll-ms <MS>      Status poll period
//!   --timeout-ms <MS>   Per-request timeout
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                | Overrides           |
//! |-------------------------|---------------------|
//! | `BRIDGE_PANEL_CONFIG`   | `--config`          |
//! | `BRIDGE_PANEL_API_URL`  | `[api] base_url`    |
//! | `BRIDGE_PANEL_POLL_MS`  | `[poll] interval_ms`|
//!
//! CLI flags win over environment variables, which win over the config file.
//!
//! # Exit codes
//!
//! `0` success, `1` the action failed (refused, unreachable, not applicable),
//! `2` the input was rejected before anything was sent.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use bridge_panel::application::catalog_refresher::RefreshOutcome;
use bridge_panel::application::controller::{PanelController, PanelSettings};
use bridge_panel::application::lifecycle::OperationOutcome;
use bridge_panel::application::status_poller::PollOutcome;
use bridge_panel::infrastructure::api::HttpBridgeApi;
use bridge_panel::infrastructure::notify::ConsoleNotifier;
use bridge_panel::infrastructure::render::{render_catalog, render_panel, render_status};
use bridge_panel::infrastructure::storage::config::{
    config_file_path, load_config_from, save_config_to, PanelConfig,
};
use bridge_panel_core::DiscoveryMode;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Control panel for a remotely managed game-server bridge.
#[derive(Debug, Parser)]
#[command(name = "bridge-panel", about = "Start, stop and monitor the bridge", version)]
struct Cli {
    /// Configuration file.  Defaults to the platform config directory.
    #[arg(long, global = true, env = "BRIDGE_PANEL_CONFIG")]
    config: Option<PathBuf>,

    /// Root URL of the control server, e.g. `http://localhost:8081`.
    #[arg(long, global = true, env = "BRIDGE_PANEL_API_URL")]
    api_url: Option<String>,

    /// Status poll period in milliseconds.
    #[arg(long, global = true, env = "BRIDGE_PANEL_POLL_MS")]
    poll_ms: Option<u64>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the panel and keep it in sync until Ctrl+C.
    Watch,
    /// Print the bridge status once.
    Status,
    /// List the discoverable game servers.
    Servers,
    /// Start the bridge.
    Start(StartArgs),
    /// Stop the bridge.
    Stop,
    /// Ask the control server to rescan for game servers, then list them.
    Refresh,
    /// Print the effective configuration.
    Config {
        /// Write the effective configuration to the config file.
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Args)]
struct StartArgs {
    /// Local port for the bridge to listen on (1-65535).
    #[arg(long)]
    port: String,

    /// Game server as `host:port`.
    #[arg(long, conflicts_with = "pick", required_unless_present = "pick")]
    server: Option<String>,

    /// Game server by its number in `bridge-panel servers`.
    #[arg(long)]
    pick: Option<usize>,
}

impl Cli {
    fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(|| config_file_path().ok())
    }

    /// Loads the config file (if any) and applies the CLI/env overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the merged configuration is invalid.  Validation runs after the
    /// overrides, so a flag can replace a bad value from the file.
    fn effective_config(&self) -> anyhow::Result<PanelConfig> {
        let file = match self.config_path() {
            Some(path) => load_config_from(&path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => PanelConfig::default(),
        };
        let config = self.apply_overrides(file);
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    fn apply_overrides(&self, mut config: PanelConfig) -> PanelConfig {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        if let Some(ms) = self.poll_ms {
            config.poll.interval_ms = ms;
        }
        if let Some(ms) = self.timeout_ms {
            config.api.timeout_ms = ms;
        }
        config
    }
}

fn panel_settings(config: &PanelConfig) -> PanelSettings {
    PanelSettings {
        poll_interval: config.poll_interval(),
        initial_mode: DiscoveryMode::from_checkbox(config.panel.discovery_default),
        initial_port: String::new(),
    }
}

fn operation_exit(outcome: &OperationOutcome) -> ExitCode {
    match outcome {
        OperationOutcome::Completed => ExitCode::SUCCESS,
        OperationOutcome::Invalid(_) => ExitCode::from(2),
        OperationOutcome::Refused(_)
        | OperationOutcome::Transport(_)
        | OperationOutcome::Ignored => ExitCode::FAILURE,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.effective_config()?;

    // Logs go to stderr so stdout carries only the panel output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.panel.log_level)),
        )
        .init();

    let config_path = cli.config_path();
    let command = cli.command.unwrap_or(Command::Watch);
    if let Command::Config { write } = command {
        return show_config(&config, config_path, write);
    }

    let api = HttpBridgeApi::new(&config.api.base_url, config.request_timeout())
        .context("failed to create control API client")?;
    info!(api = %api.base_url(), "bridge-panel starting");
    let notifier = Arc::new(ConsoleNotifier);
    let controller = PanelController::new(Arc::new(api), notifier, panel_settings(&config));

    match command {
        Command::Watch => watch(&controller).await,
        Command::Status => status(&controller).await,
        Command::Servers => servers(&controller).await,
        Command::Start(args) => start(&controller, args).await,
        Command::Stop => stop(&controller).await,
        Command::Refresh => refresh(&controller).await,
        Command::Config { .. } => Ok(ExitCode::SUCCESS),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

async fn watch(controller: &PanelController) -> anyhow::Result<ExitCode> {
    let load = controller.initialize().await;
    if load.status == PollOutcome::Failed {
        warn!("control server not reachable yet; will keep polling");
    }

    let mut shown = render_panel(&controller.snapshot());
    println!("{shown}\n");
    let poller = controller.spawn_poller();

    let mut redraw = tokio::time::interval(Duration::from_millis(200));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                if let Err(e) = result {
                    warn!(error = %e, "failed to listen for Ctrl+C");
                }
                info!("received Ctrl+C, shutting down");
                break;
            }
            _ = redraw.tick() => {
                let current = render_panel(&controller.snapshot());
                if current != shown {
                    println!("{current}\n");
                    shown = current;
                }
            }
        }
    }

    poller.join().await;
    Ok(ExitCode::SUCCESS)
}

async fn status(controller: &PanelController) -> anyhow::Result<ExitCode> {
    if controller.poller().tick().await == PollOutcome::Failed {
        bail!("could not fetch bridge status");
    }
    println!("{}", render_status(&controller.snapshot()));
    Ok(ExitCode::SUCCESS)
}

async fn servers(controller: &PanelController) -> anyhow::Result<ExitCode> {
    controller
        .catalog()
        .load()
        .await
        .context("could not fetch the server list")?;
    println!("{}", render_catalog(controller.snapshot().catalog()));
    Ok(ExitCode::SUCCESS)
}

async fn start(controller: &PanelController, args: StartArgs) -> anyhow::Result<ExitCode> {
    if controller.poller().tick().await == PollOutcome::Failed {
        bail!("could not fetch bridge status");
    }
    if controller.snapshot().running() {
        eprintln!("error: the bridge is already running");
        return Ok(ExitCode::FAILURE);
    }

    controller.enter_port(&args.port)?;
    match (args.server, args.pick) {
        (Some(server), _) => {
            controller.set_discovery(false)?;
            controller.enter_manual_server(&server)?;
        }
        (None, Some(index)) => {
            controller.set_discovery(true)?;
            controller
                .catalog()
                .load()
                .await
                .context("could not fetch the server list")?;
            controller
                .select_server(index)
                .with_context(|| format!("no server numbered {index}; see `bridge-panel servers`"))?;
        }
        (None, None) => bail!("either --server or --pick is required"),
    }

    let outcome = controller.start().await;
    if outcome.is_completed() {
        println!("{}", render_status(&controller.snapshot()));
    }
    Ok(operation_exit(&outcome))
}

async fn stop(controller: &PanelController) -> anyhow::Result<ExitCode> {
    if controller.poller().tick().await == PollOutcome::Failed {
        bail!("could not fetch bridge status");
    }
    let outcome = controller.stop().await;
    match &outcome {
        OperationOutcome::Ignored => eprintln!("error: the bridge is not running"),
        OperationOutcome::Completed => println!("{}", render_status(&controller.snapshot())),
        _ => {}
    }
    Ok(operation_exit(&outcome))
}

async fn refresh(controller: &PanelController) -> anyhow::Result<ExitCode> {
    match controller.refresh().await {
        RefreshOutcome::Refreshed(_) => {
            println!("{}", render_catalog(controller.snapshot().catalog()));
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn show_config(
    config: &PanelConfig,
    path: Option<PathBuf>,
    write: bool,
) -> anyhow::Result<ExitCode> {
    let text = toml::to_string_pretty(config).context("failed to serialize config")?;
    if write {
        let path = path.context("no config path: pass --config")?;
        save_config_to(&path, config)
            .with_context(|| format!("failed to write config to {}", path.display()))?;
        println!("# written to {}", path.display());
    } else if let Some(path) = path {
        println!("# {}", path.display());
    }
    print!("{text}");
    Ok(ExitCode::SUCCESS)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
