use super::RunReport;

/// Prints the run report to stderr, one line per table plus totals.
pub fn print_summary(report: &RunReport) {
    let mut ready = 0;
    let mut failed = 0;

    eprintln!("\nProcessed {} table(s)...", report.len());

    for entry in report.entries() {
        let table_missing = entry.outcome.is_failed() && entry.inserted == 0;
        let icon = if entry.error.is_some() || table_missing {
            "❌"
        } else if entry.outcome.is_failed() {
            // rows landed anyway, the first insert created the table
            "⚠️ "
        } else {
            "✅"
        };
        eprintln!("{} {}", icon, entry.line());

        if table_missing {
            if let Some(ddl) = &entry.ddl_hint {
                eprintln!("    create it manually in the SQL editor:");
                for line in ddl.lines() {
                    eprintln!("    {line}");
                }
            }
        }

        if entry.error.is_some() || table_missing {
            failed += 1;
        } else {
            ready += 1;
        }
    }

    eprintln!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!(
        "Summary: {} ready, {} failed, {} row(s) inserted",
        ready,
        failed,
        report.rows_inserted()
    );
}
