// src/emit/mod.rs

use anyhow::{bail, Context, Result};
use chrono::Utc;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::parse::AcceptedRecord;
use crate::stats::group_thousands;

/// Rows per INSERT statement; bounds statement size for the migration tool.
pub const BATCH_SIZE: usize = 500;

const TABLE_COLUMNS: &str =
    "(id, postal_code, city, province_code, country_code, status, created_at, created_by, updated_at)";

/// Temporary plpgsql helper: a 26-char, time-ordered id for each seed row.
/// Dropped again in the footer.
const ULID_HELPER: &str = r#"-- Create temporary ULID generation function
CREATE OR REPLACE FUNCTION temp_generate_ulid() RETURNS CHAR(26) AS $$
DECLARE
    timestamp_part BIGINT;
    random_part TEXT;
    ulid TEXT;
BEGIN
    timestamp_part := EXTRACT(EPOCH FROM NOW()) * 1000;
    random_part := UPPER(SUBSTR(MD5(RANDOM()::TEXT), 1, 16));
    ulid := LPAD(TO_HEX(timestamp_part), 10, '0') || random_part;
    RETURN SUBSTR(ulid, 1, 26);
END;
$$ LANGUAGE plpgsql;
"#;

/// Serialize the accepted records as a standalone migration at `out_path`.
/// Returns the number of INSERT batches written.
///
/// The artifact is staged as `<out_path>.tmp` and renamed into place only
/// after a clean flush, so an aborted run never leaves a complete-looking
/// migration behind. Refuses to produce a migration with no rows.
pub fn write_migration(records: &[AcceptedRecord], out_path: &Path) -> Result<usize> {
    if records.is_empty() {
        bail!("no accepted records to emit; refusing to generate an empty migration");
    }

    let migration_name = out_path
        .file_name()
        .and_then(|n| n.to_str())
        .context("output path has no file name")?
        .to_string();
    let tmp_path = out_path.with_file_name(format!("{}.tmp", migration_name));

    let file = File::create(&tmp_path)
        .with_context(|| format!("creating temporary file {}", tmp_path.display()))?;
    let mut w = BufWriter::new(file);

    write_header(&mut w, &migration_name)?;
    let batches = write_inserts(&mut w, records)?;
    write_footer(&mut w, records.len())?;

    w.flush().context("flushing migration output")?;
    fs::rename(&tmp_path, out_path).with_context(|| {
        format!(
            "renaming {} to {}",
            tmp_path.display(),
            out_path.display()
        )
    })?;

    info!(
        records = records.len(),
        batches,
        path = %out_path.display(),
        "migration written"
    );
    Ok(batches)
}

fn write_header<W: Write>(w: &mut W, migration_name: &str) -> Result<()> {
    writeln!(w, "-- {}", migration_name)?;
    writeln!(w, "-- Seed Malaysian postal codes from GeoNames data")?;
    writeln!(
        w,
        "-- Generated automatically from MY.txt at {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(w)?;
    w.write_all(ULID_HELPER.as_bytes())?;
    writeln!(w)?;
    writeln!(w, "-- Insert Malaysian postal codes")?;
    Ok(())
}

fn write_inserts<W: Write>(w: &mut W, records: &[AcceptedRecord]) -> Result<usize> {
    let total_batches = records.len().div_ceil(BATCH_SIZE);

    for (batch_num, batch) in records.chunks(BATCH_SIZE).enumerate() {
        writeln!(w)?;
        writeln!(
            w,
            "-- Batch {}/{} ({} records)",
            batch_num + 1,
            total_batches,
            batch.len()
        )?;
        writeln!(w, "INSERT INTO postal_code_reference {}", TABLE_COLUMNS)?;
        writeln!(w, "VALUES")?;

        for (i, rec) in batch.iter().enumerate() {
            let city_sql = match &rec.city {
                Some(city) => format!("'{}'", escape_sql(city)),
                None => "NULL".to_string(),
            };
            let terminator = if i + 1 == batch.len() { ";" } else { "," };
            writeln!(
                w,
                "  (temp_generate_ulid(), '{}', {}, '{}', '{}', 'active', NOW(), 'system', NOW()){}",
                rec.postal_code, city_sql, rec.province_code, rec.country_code, terminator
            )?;
        }
    }

    Ok(total_batches)
}

fn write_footer<W: Write>(w: &mut W, record_count: usize) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "-- Drop temporary function")?;
    writeln!(w, "DROP FUNCTION IF EXISTS temp_generate_ulid();")?;
    writeln!(w)?;
    writeln!(w, "-- Add indexes for performance (if not already exist)")?;
    writeln!(w, "CREATE INDEX IF NOT EXISTS ix_postal_code_my_lookup")?;
    writeln!(w, "ON postal_code_reference (country_code, postal_code)")?;
    writeln!(w, "WHERE country_code = 'MY' AND status = 'active';")?;
    writeln!(w)?;
    writeln!(w, "-- Verification queries")?;
    writeln!(
        w,
        "-- SELECT COUNT(*) FROM postal_code_reference WHERE country_code = 'MY';"
    )?;
    writeln!(
        w,
        "-- SELECT province_code, COUNT(*) FROM postal_code_reference WHERE country_code = 'MY' GROUP BY province_code ORDER BY province_code;"
    )?;
    writeln!(w)?;
    writeln!(
        w,
        "-- Migration complete: {} Malaysian postal codes added",
        group_thousands(record_count as u64)
    )?;
    Ok(())
}

/// Double any single quote so the value survives as a SQL string literal.
fn escape_sql(text: &str) -> String {
    text.replace('\'', "''")
}
