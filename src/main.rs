use anyhow::{bail, Result};
use postalseed::{emit, parse, stats::group_thousands};
use std::{env, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Placeholder defaults for local runs; pass explicit paths otherwise.
const DEFAULT_INPUT: &str = "MY.txt";
const DEFAULT_OUTPUT: &str = "V14__seed_malaysia_postal_codes.sql";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) resolve paths ────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string()));
    let output = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()));
    info!(input = %input.display(), output = %output.display(), "startup");

    if !input.exists() {
        bail!("input file not found: {}", input.display());
    }

    // ─── 3) read + validate the GeoNames file ────────────────────────
    let extraction = parse::process_file(&input)?;
    extraction.stats.report();

    // ─── 4) emit the SQL migration ───────────────────────────────────
    let batches = emit::write_migration(&extraction.records, &output)?;

    println!("\nSQL migration generated: {}", output.display());
    println!(
        "Contains {} postal code inserts in {} batches",
        group_thousands(extraction.records.len() as u64),
        batches
    );
    println!("\nNext steps:");
    println!("  1. Review the generated SQL file");
    println!("  2. Run the migration: ./mvnw flyway:migrate");
    println!("  3. Verify: SELECT COUNT(*) FROM postal_code_reference WHERE country_code = 'MY';");

    info!("all done");
    Ok(())
}
