//! miniapp-protect
//!
//! Runs the connect-and-protect flow headless, outside the chat client.
//!
//! ```text
//! config.toml ─▶ AppConfig ─▶ FlowSettings
//!                                  │
//! MINIAPP_WALLET_PRIVATE_KEY ─┐    ▼
//! --rpc-url ──────────────────┴▶ Environment ─▶ ConnectAndProtect::run ─▶ View
//!                                                    │
//!                                  HttpProtector ◀───┘
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use miniapp_protect::config::{check_config, load_config, AppConfig, ObservabilityConfig};
use miniapp_protect::flow::{ConnectAndProtect, FlowSettings, FlowState};
use miniapp_protect::host::Environment;
use miniapp_protect::observability::logging;
use miniapp_protect::protection::HttpProtector;
use miniapp_protect::wallet::local::PRIVATE_KEY_ENV_VAR;
use miniapp_protect::wallet::{build_deep_link, LinkOpener, LocalWallet, RpcWallet, UnavailableNegotiator};

#[derive(Parser)]
#[command(name = "miniapp-protect")]
#[command(about = "Connect a wallet and protect a data record", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-RPC wallet endpoint (overrides `wallet.rpc_url`).
    #[arg(long)]
    rpc_url: Option<String>,

    /// Protection gateway (overrides `protection.endpoint`).
    #[arg(long)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect a wallet and protect the configured record
    Run,
    /// Print the wallet deep link for a session URI
    DeepLink { uri: String },
    /// Validate the configuration and print it
    CheckConfig,
}

/// Prints deep links for the user to open on their device.
struct TerminalOpener;

impl LinkOpener for TerminalOpener {
    fn open(&self, url: &Url) {
        println!("Open this link in your wallet app:\n  {}", url);
    }

    fn navigate(&self, url: &Url) {
        println!("Continue in your wallet app:\n  {}", url);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging first so configuration errors are reported through it.
    let log_handle = logging::init_logging(&ObservabilityConfig::default().log_level);
    tracing::info!("miniapp-protect v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(path) => load_config(path).inspect_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to load configuration");
        })?,
        None => AppConfig::default(),
    };
    if let Some(rpc_url) = cli.rpc_url {
        config.wallet.rpc_url = Some(rpc_url);
    }
    if let Some(endpoint) = cli.endpoint {
        config.protection.endpoint = endpoint;
    }
    check_config(&config).inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    if let Some(handle) = &log_handle {
        logging::set_log_level(handle, &config.observability.log_level);
    }

    match cli.command {
        Commands::Run => run(config).await,
        Commands::DeepLink { uri } => {
            let base = Url::parse(&config.deep_link.base_url)?;
            println!("{}", build_deep_link(&base, &uri));
            Ok(())
        }
        Commands::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut env = Environment::new();
    if let Some(rpc_url) = &config.wallet.rpc_url {
        let wallet = RpcWallet::new(rpc_url, Duration::from_secs(config.wallet.rpc_timeout_secs))?;
        env = env.with_injected_wallet(Arc::new(wallet));
    } else if std::env::var_os(PRIVATE_KEY_ENV_VAR).is_some() {
        let wallet = LocalWallet::from_env(config.wallet_connect.chain_id)?;
        env = env.with_injected_wallet(Arc::new(wallet));
    }

    tracing::info!(
        injected_wallet = env.has_injected_wallet(),
        endpoint = %config.protection.endpoint,
        chain_id = config.wallet_connect.chain_id,
        "Configuration loaded"
    );

    let settings = FlowSettings::from_config(&config)?;
    let protector = HttpProtector::new(&config.protection)?;

    let mut component = ConnectAndProtect::new(
        env,
        Arc::new(UnavailableNegotiator),
        Arc::new(protector),
        Arc::new(TerminalOpener),
        settings,
    );
    component.mount();

    let state = component.run().await;
    print!("{}", component.view());

    match state {
        FlowState::Failed { error, .. } => Err(error.into()),
        _ => Ok(()),
    }
}
