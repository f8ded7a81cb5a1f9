//! OS Proxy Command Line Tool
//!
//! This binary is the command-line interface for OS Proxy.

use clap::{Parser, Subcommand};
use log::{info, warn};

// Import our library
use os_proxy::{ProxyController, ProxyRequest, WatchSession, APP_NAME, VERSION};
use os_proxy::common::{init_logger, ProxyError, Result};
use os_proxy::config::{Overrides, Settings, DEFAULT_CONFIG_FILE, LOG_LEVEL_STR};
use os_proxy::platform;

use std::path::{Path, PathBuf};
use tokio::sync::broadcast::error::RecvError;

/// OS Proxy: read, mutate, and watch the system proxy configuration
#[derive(Parser, Debug)]
#[clap(author, version = VERSION, about, long_about = None)]
struct Args {
    /// Network device to configure (e.g. "Wi-Fi")
    #[clap(long)]
    device: Option<String>,

    /// Log level
    #[clap(long)]
    log_level: Option<String>,

    /// Load configuration from a file
    #[clap(long)]
    config_file: Option<String>,

    /// Load configuration from environment variables
    #[clap(long)]
    from_env: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current proxy configuration as JSON
    Get,
    /// Write a new proxy hostname and port
    Set {
        /// Proxy hostname to store
        hostname: String,
        /// Proxy port to store
        port: u16,
        /// Desired on/off state after the write; the platform turns the
        /// proxy on by default
        #[clap(long)]
        enabled: Option<bool>,
    },
    /// Turn the configured proxy on
    Enable,
    /// Turn the configured proxy off
    Disable,
    /// Flip the proxy between on and off
    Toggle,
    /// Wipe the stored proxy configuration
    Clear,
    /// Stream configuration change events until interrupted
    Watch {
        /// Paths to watch instead of the platform's preferences store
        paths: Vec<PathBuf>,
    },
}

/// Resolve settings from defaults, file, environment, and command line.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::default();

    // Load from configuration file if specified, or from the default
    // file when one is present.
    if let Some(config_file) = &args.config_file {
        if Path::new(config_file).exists() {
            info!("Loading configuration from file: {}", config_file);
            settings = settings.merge(Overrides::from_file(config_file)?);
        } else {
            warn!("Configuration file not found: {}", config_file);
        }
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
        settings = settings.merge(Overrides::from_file(DEFAULT_CONFIG_FILE)?);
    }

    // Load from environment variables if specified
    if args.from_env {
        info!("Loading configuration from environment variables");
        settings = settings.merge(Overrides::from_env()?);
    }

    // Command line arguments win over every other source
    settings = settings.merge(Overrides {
        device: args.device.clone(),
        log_level: args.log_level.clone(),
        ..Overrides::default()
    });

    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    init_logger(args.log_level.as_deref().unwrap_or(LOG_LEVEL_STR));

    info!("Starting {} v{}", APP_NAME, VERSION);

    let settings = load_settings(&args)?;

    match args.command {
        Command::Get => {
            let controller = ProxyController::from_settings(&settings)?;
            let proxy = controller.get(settings.device.as_deref()).await?;
            let json = serde_json::to_string_pretty(&proxy)
                .map_err(|e| ProxyError::Parse(e.to_string()))?;
            println!("{}", json);
        }
        Command::Set {
            hostname,
            port,
            enabled,
        } => {
            let controller = ProxyController::from_settings(&settings)?;
            controller
                .set(ProxyRequest {
                    device: settings.device.clone(),
                    hostname: Some(hostname),
                    port: Some(port),
                    enabled,
                })
                .await?;
            info!("Proxy configuration written");
        }
        Command::Enable => {
            let controller = ProxyController::from_settings(&settings)?;
            controller.enable().await?;
            info!("Proxy enabled");
        }
        Command::Disable => {
            let controller = ProxyController::from_settings(&settings)?;
            controller.disable().await?;
            info!("Proxy disabled");
        }
        Command::Toggle => {
            let controller = ProxyController::from_settings(&settings)?;
            controller.toggle().await?;
            info!("Proxy toggled");
        }
        Command::Clear => {
            let controller = ProxyController::from_settings(&settings)?;
            controller.clear().await?;
            info!("Proxy configuration cleared");
        }
        Command::Watch { paths } => {
            watch(&settings, paths).await?;
        }
    }

    Ok(())
}

/// Watch the configuration database and print change events.
async fn watch(settings: &Settings, paths: Vec<PathBuf>) -> Result<()> {
    let commands = platform::detect()?;
    let session = WatchSession::new(commands.preferences_path);

    // Explicit paths win over configured ones; with neither, fall back
    // to the platform's preferences store.
    let paths = if !paths.is_empty() {
        Some(paths)
    } else if !settings.watch_paths.is_empty() {
        Some(settings.watch_paths.clone())
    } else {
        None
    };

    let mut events = session.subscribe();
    session.watch(paths.as_deref())?;

    for path in session.watched_paths() {
        println!("watching {}", path.display());
    }
    info!("Press Ctrl+C to stop");

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => println!("changed {}", event.path.display()),
                Err(RecvError::Lagged(missed)) => {
                    warn!("Dropped {} change events", missed);
                }
                Err(RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}
