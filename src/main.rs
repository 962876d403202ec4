//! boardtop - CLI entry point
//!
//! Runs the dashboard on the current terminal, or manages the configuration
//! file through the `config` subcommand.

use boardtop::config::{default, loader::ConfigLoader, schema, xdg, Config, ConfigError};
use boardtop::screen::{restore_terminal, CrosstermConsole, TerminalScreen};
use boardtop::tui::views;
use boardtop::{logging, Controller, DataSource, RunFlag, Snapshot, SystemSource};
use clap::{Parser, Subcommand};
use ratatui::backend::CrosstermBackend;
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

/// Multi-page terminal status dashboard
#[derive(Parser)]
#[command(name = "boardtop")]
#[command(version, about = "Multi-page terminal status dashboard")]
struct Cli {
    /// Redraw interval, e.g. "250ms" or "1s" (overrides the config file)
    #[arg(long)]
    interval: Option<String>,

    /// 1-based page shown at startup (overrides the config file)
    #[arg(long)]
    page: Option<usize>,

    /// Configuration file instead of the XDG default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Replay a JSON status snapshot instead of probing the local system
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands for the boardtop CLI
#[derive(Subcommand)]
enum Commands {
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { ref action }) => run_config_command(action, &cli),
        None => run_dashboard(&cli),
    }
}

fn run_config_command(action: &ConfigAction, cli: &Cli) -> ExitCode {
    if let Err(e) = config_command(action, cli) {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn config_command(action: &ConfigAction, cli: &Cli) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init { force } => {
            let path = match &cli.config {
                Some(path) => {
                    default::write_template(path, *force)?;
                    path.clone()
                }
                None => default::create_default_config(*force)?,
            };
            println!("Created configuration at {}", path.display());
        }
        ConfigAction::Path => {
            let path = cli.config.clone().unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
        }
        ConfigAction::Validate => {
            let config = ConfigLoader::load(cli.config.as_deref())?;
            println!("Configuration is valid");
            println!("{config:#?}");
        }
    }
    Ok(())
}

/// Merges flags over the loaded configuration.
fn resolve_settings(cli: &Cli, config: &Config) -> Result<(std::time::Duration, usize), String> {
    let interval = match &cli.interval {
        Some(value) => schema::parse_interval("--interval", value),
        None => config.dashboard.interval(),
    }
    .map_err(|e| e.to_string())?;
    let page = cli.page.unwrap_or(config.dashboard.start_page);
    Ok((interval, page))
}

fn run_dashboard(cli: &Cli) -> ExitCode {
    let config = match ConfigLoader::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (interval, page) = match resolve_settings(cli, &config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The dashboard still works without a log file
    let log_path = config.logging.file_path();
    if let Err(e) = logging::init(config.logging.level, &log_path) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let data: Rc<dyn DataSource> = match &cli.snapshot {
        Some(path) => match Snapshot::from_json_file(path) {
            Ok(snapshot) => Rc::new(snapshot),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Rc::new(SystemSource::probe()),
    };

    // Signal listeners need a runtime; the loop itself blocks this thread
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let _guard = rt.enter();

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    let flag = RunFlag::new();
    let screen = match TerminalScreen::new(
        CrosstermBackend::new(stdout()),
        CrosstermConsole::new(flag.clone()),
    ) {
        Ok(screen) => screen,
        Err(e) => {
            eprintln!("Error: terminal setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = Controller::builder(screen, data)
        .interval(interval)
        .pages(views::default_pages())
        .init_page(page)
        .run_flag(flag)
        .span(tracing::info_span!("dashboard"))
        .build();

    if let Err(e) = result {
        tracing::error!("dashboard failed: {}", e);
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
