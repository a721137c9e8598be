// Fleetctl - Remote power and session control for managed daemons
// Main entry point

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

use fleetctl::client::HttpTransport;
use fleetctl::config::{default_config_path, load_config, save_config, Config};
use fleetctl::daemon::{Daemon, DaemonOp, ShutdownOptions};
use fleetctl::dispatch::{Dispatcher, OpContext};
use fleetctl::notify::ConsoleSink;
use fleetctl::session::{CredentialStore, Route, RouteTracker, SessionStore};

#[derive(Parser, Debug)]
#[command(name = "fleetctl")]
#[command(about = "Remote power and session control for managed daemons", version)]
struct Args {
    /// Config file (default: ~/.fleetctl/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session credential, overrides `session_token` from the config
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a boot packet
    Boot(ActionArgs),
    /// Log the current user out
    Logout(ActionArgs),
    /// Reboot the machine
    Reboot(ActionArgs),
    /// Shut the machine down
    Shutdown(ActionArgs),
    /// Restart the daemon process
    Restart(TargetArgs),
    /// List configured daemons
    List,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(ClapArgs, Debug)]
struct TargetArgs {
    /// Hardware address of a target (repeatable)
    #[arg(long = "mac")]
    macs: Vec<String>,

    /// User shown for --mac targets not in the config
    #[arg(long)]
    user: Option<String>,

    /// Hostname shown for --mac targets not in the config
    #[arg(long)]
    hostname: Option<String>,

    /// IP address for --mac targets not in the config
    #[arg(long)]
    ip: Option<String>,

    /// Configured daemon, by hostname or MAC (repeatable)
    #[arg(long = "host")]
    hosts: Vec<String>,

    /// Every configured daemon
    #[arg(long, conflicts_with_all = ["macs", "hosts"])]
    all: bool,
}

#[derive(ClapArgs, Debug)]
struct ActionArgs {
    #[command(flatten)]
    targets: TargetArgs,

    /// JSON object forwarded to the daemon, e.g. '{"delay": 30}'
    #[arg(long, value_parser = parse_options)]
    options: Option<ShutdownOptions>,
}

fn parse_options(text: &str) -> std::result::Result<ShutdownOptions, String> {
    ShutdownOptions::from_json(text).map_err(|e| format!("options must be a JSON object: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    match args.command {
        Command::Init { force } => run_init(args.config.as_deref(), force),
        Command::List => {
            let config = load_config(args.config.as_deref())?;
            run_list(&config);
            Ok(())
        }
        Command::Boot(action) => run_action(DaemonOp::Boot, &args.config, args.session, action).await,
        Command::Logout(action) => {
            run_action(DaemonOp::Logout, &args.config, args.session, action).await
        }
        Command::Reboot(action) => {
            run_action(DaemonOp::Reboot, &args.config, args.session, action).await
        }
        Command::Shutdown(action) => {
            run_action(DaemonOp::Shutdown, &args.config, args.session, action).await
        }
        Command::Restart(targets) => {
            let action = ActionArgs {
                targets,
                options: None,
            };
            run_action(DaemonOp::Restart, &args.config, args.session, action).await
        }
    }
}

fn init_tracing() {
    // Default: WARN level, can be overridden with RUST_LOG env var
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();

    // Bridge log crate → tracing (for dependencies using log crate)
    tracing_log::LogTracer::init().ok();
}

/// Dispatch `op` to every selected daemon and wait for all outcomes
async fn run_action(
    op: DaemonOp,
    config_path: &Option<PathBuf>,
    session: Option<String>,
    action: ActionArgs,
) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let daemons = resolve_targets(&config, &action.targets)?;

    let credentials = Arc::new(SessionStore::new());
    if let Some(token) = session.or_else(|| config.session_token.clone()) {
        credentials.set(&config.session_cookie, token);
    }

    let transport = HttpTransport::new(config.api_root())?
        .with_session(credentials.clone(), config.session_cookie.clone());
    let dispatcher = Dispatcher::new(Arc::new(transport)).with_settings(config.dispatch_settings());

    let console = Arc::new(ConsoleSink::new());
    let router = Arc::new(RouteTracker::new());
    let total = daemons.len();

    for daemon in daemons {
        let ctx = OpContext::new(daemon, console.clone(), router.clone(), credentials.clone());
        dispatcher.dispatch(op, ctx, action.options.clone());
    }

    dispatcher.drain().await;

    if router.current() == Route::Login {
        eprintln!("Log in again and pass the new credential with --session.");
    }

    let failed = dispatcher.failed();
    if failed > 0 {
        bail!("{} of {} {} command(s) failed", failed, total, op);
    }
    Ok(())
}

fn resolve_targets(config: &Config, targets: &TargetArgs) -> Result<Vec<Daemon>> {
    if targets.all {
        if config.daemons.is_empty() {
            bail!("No daemons configured. Add [[daemons]] entries to the config file.");
        }
        return Ok(config.daemons.clone());
    }

    let mut daemons = Vec::new();

    for key in &targets.hosts {
        let daemon = config
            .find_daemon(key)
            .with_context(|| format!("No configured daemon matches '{}'", key))?;
        daemons.push(daemon.clone());
    }

    for mac in &targets.macs {
        let daemon = match config.daemons.iter().find(|d| d.mac.eq_ignore_ascii_case(mac)) {
            Some(known) => known.clone(),
            None => ad_hoc_daemon(mac, targets),
        };
        daemons.push(daemon);
    }

    if daemons.is_empty() {
        bail!("No targets given (use --mac, --host or --all)");
    }
    Ok(daemons)
}

fn ad_hoc_daemon(mac: &str, targets: &TargetArgs) -> Daemon {
    let mut daemon = Daemon::new(mac);
    daemon.user = targets.user.clone();
    daemon.hostname = targets.hostname.clone();
    daemon.ip = targets.ip.clone();
    daemon
}

fn run_list(config: &Config) {
    println!("API: {}", config.api_root());
    if config.daemons.is_empty() {
        println!("No daemons configured.");
        return;
    }
    for daemon in &config.daemons {
        match &daemon.ip {
            Some(ip) => println!("  {}  {}", daemon, ip),
            None => println!("  {}", daemon),
        }
    }
}

fn run_init(path: Option<&Path>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };

    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    save_config(&Config::default(), &path)?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}
