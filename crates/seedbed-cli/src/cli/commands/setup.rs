use super::exit_codes;
use crate::catalog;
use crate::cli::args::SetupArgs;
use seedbed_core::engine::runner::Runner;
use seedbed_core::report::console;

pub async fn run(args: SetupArgs) -> anyhow::Result<i32> {
    let store = match super::build_store(&args.store) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("config error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    eprintln!("Starting setup against the {} store...", store.backend_name());

    let plans = catalog::default_plans();
    let report = Runner::new(store).run(&plans).await;
    console::print_summary(&report);

    // completion decides this exit code, not per-table success
    Ok(exit_codes::OK)
}
