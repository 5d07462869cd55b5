use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seedbed",
    version,
    about = "One-shot bootstrap for Supabase/PostgREST projects: create the tables, seed the data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision the managed tables and insert their seed batches
    Setup(SetupArgs),
    /// Inspect the managed tables and show a sample of what is in them
    Check(CheckArgs),
    /// Verify credentials and connectivity without writing anything
    Ping(PingArgs),
    /// Write a starter .env file with the expected variables
    Init(InitArgs),
    Version,
}

#[derive(clap::Args, Clone)]
pub struct StoreArgs {
    /// Project endpoint, e.g. https://xyzcompany.supabase.co
    #[arg(long, env = "SUPABASE_URL")]
    pub url: Option<String>,

    /// Access key for the data API (anon or service role)
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Store backend
    /// - postgrest: live Supabase/PostgREST endpoint
    /// - fake: in-memory store (tests/dev, needs no credentials)
    #[arg(long, default_value = "postgrest")]
    pub store: String,
}

#[derive(Parser, Clone)]
pub struct SetupArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// rows to fetch per table when sampling
    #[arg(long, default_value_t = 1)]
    pub sample: usize,
}

#[derive(Parser, Clone)]
pub struct PingArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser, Clone)]
pub struct InitArgs {
    /// where to write the env template
    #[arg(long, default_value = ".env")]
    pub out: PathBuf,

    /// overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
