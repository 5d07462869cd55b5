use super::args::*;
use seedbed_core::client::fake::FakeStore;
use seedbed_core::client::postgrest::PostgrestClient;
use seedbed_core::client::StoreClient;
use seedbed_core::config::{StoreConfig, ENV_KEY, ENV_URL};
use seedbed_core::errors::ConfigError;
use std::sync::Arc;

pub mod check;
pub mod ping;
pub mod setup;

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const REMOTE_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Setup(args) => setup::run(args).await,
        Command::Check(args) => check::run(args).await,
        Command::Ping(args) => ping::run(args).await,
        Command::Init(args) => cmd_init(args).await,
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(exit_codes::OK)
        }
    }
}

/// Resolves `--store` into a client. Credential validation happens here,
/// before any remote call, so a placeholder URL or missing key never makes
/// it onto the wire.
pub(crate) fn build_store(args: &StoreArgs) -> Result<Arc<dyn StoreClient>, ConfigError> {
    match args.store.as_str() {
        "postgrest" => {
            let cfg = store_config(args)?;
            Ok(Arc::new(PostgrestClient::new(&cfg)))
        }
        "fake" => Ok(Arc::new(FakeStore::new())),
        other => Err(ConfigError(format!("unknown store backend: {other}"))),
    }
}

pub(crate) fn store_config(args: &StoreArgs) -> Result<StoreConfig, ConfigError> {
    let url = args
        .url
        .as_deref()
        .ok_or_else(|| ConfigError(format!("missing endpoint: set {ENV_URL} or pass --url")))?;
    let key = args
        .key
        .as_deref()
        .ok_or_else(|| ConfigError(format!("missing access key: set {ENV_KEY} or pass --key")))?;
    StoreConfig::new(url, key)
}

async fn cmd_init(args: InitArgs) -> anyhow::Result<i32> {
    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if args.out.exists() && !args.force {
        eprintln!("note: {} already exists (skipped)", args.out.display());
        return Ok(exit_codes::OK);
    }

    std::fs::write(&args.out, crate::templates::ENV_TEMPLATE)?;
    eprintln!("created {}", args.out.display());
    eprintln!("next steps:");
    eprintln!("  1. fill in {} with your project credentials", args.out.display());
    eprintln!("  2. export them: set -a && source {}", args.out.display());
    eprintln!("  3. run: seedbed ping");

    Ok(exit_codes::OK)
}
