use super::exit_codes;
use crate::catalog;
use crate::cli::args::CheckArgs;

pub async fn run(args: CheckArgs) -> anyhow::Result<i32> {
    let store = match super::build_store(&args.store) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("config error: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    eprintln!("Checking {} managed table(s)...", catalog::TABLE_NAMES.len());

    let mut failed = false;
    for table in catalog::TABLE_NAMES {
        match store.fetch_sample(table, args.sample.max(1)).await {
            Ok(rows) if rows.is_empty() => {
                eprintln!("✅ {table}: exists but is empty");
            }
            Ok(rows) => {
                let columns = rows[0].keys().cloned().collect::<Vec<_>>().join(", ");
                eprintln!("✅ {table}: exists with columns: {columns}");
            }
            Err(e) => {
                eprintln!("❌ {table}: {e}");
                failed = true;
            }
        }
    }

    if failed {
        eprintln!("note: missing tables can be created with: seedbed setup");
        Ok(exit_codes::REMOTE_FAILED)
    } else {
        Ok(exit_codes::OK)
    }
}
