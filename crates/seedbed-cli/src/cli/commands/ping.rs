use super::exit_codes;
use crate::catalog;
use crate::cli::args::PingArgs;

pub async fn run(args: PingArgs) -> anyhow::Result<i32> {
    if args.store.store == "postgrest" {
        let cfg = match super::store_config(&args.store) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("config error: {e}");
                return Ok(exit_codes::CONFIG_ERROR);
            }
        };
        eprintln!("endpoint: {}", cfg.url);
        eprintln!("key: {}", cfg.masked_key());
    }

    let store = match super::build_store(&args.store) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("config error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    // One cheap read against the first managed table settles both
    // connectivity and credentials.
    let table = catalog::TABLE_NAMES[0];
    match store.probe_head(table).await {
        Ok(Some(rows)) => {
            eprintln!("✅ connected; {table} has {rows} row(s)");
            Ok(exit_codes::OK)
        }
        Ok(None) => {
            eprintln!("✅ connected");
            Ok(exit_codes::OK)
        }
        Err(e) => {
            eprintln!("❌ connection test failed: {e}");
            if e.is_undefined_table() {
                eprintln!("note: the endpoint answered but {table} is missing; run: seedbed setup");
            }
            Ok(exit_codes::REMOTE_FAILED)
        }
    }
}
