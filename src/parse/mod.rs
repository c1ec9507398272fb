// src/parse/mod.rs

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs::File, io::BufReader, path::Path};
use tracing::warn;

use crate::states::{map_state_code, COUNTRY_CODE};
use crate::stats::RunStats;

pub mod normalize;

use normalize::clean_city;

/// Minimum column count of a well-formed GeoNames admin row. Only columns
/// 0–4 are consumed; the rest must be present.
const MIN_COLUMNS: usize = 13;

/// Postal codes are exactly five ASCII digits. `[0-9]` rather than `\d`,
/// which matches non-ASCII digits in the regex crate.
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("postal code pattern should parse"));

/// One row that survived every validation rule, ready for the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRecord {
    pub postal_code: String,
    /// `None` means the source had no usable city text; serializes as NULL.
    pub city: Option<String>,
    pub province_code: &'static str,
    pub country_code: String,
}

/// Everything one run produced: accepted rows in source order plus counters.
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<AcceptedRecord>,
    pub stats: RunStats,
}

/// Read `path` top to bottom and validate every row. Rejections are logged
/// with their row number and counted, but never stop the run; only an
/// unopenable input is fatal.
pub fn process_file(path: impl AsRef<Path>) -> Result<Extraction> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening input file {}", path.display()))?;

    // GeoNames dumps are plain tab-separated text: no header row, no quoting,
    // and the occasional short line, hence flexible mode.
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b'\t')
        .quoting(false)
        .from_reader(BufReader::new(file));

    let mut out = Extraction::default();

    for (idx, result) in rdr.records().enumerate() {
        let row_num = idx + 1;
        out.stats.total_records += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(row = row_num, error = %e, "unreadable row");
                out.stats.invalid_records += 1;
                continue;
            }
        };

        if record.len() < MIN_COLUMNS {
            warn!(
                row = row_num,
                columns = record.len(),
                "insufficient columns"
            );
            out.stats.invalid_records += 1;
            continue;
        }

        let country_code = record[0].trim();
        let postal_code = record[1].trim();
        let city = record[2].trim();
        let state_name = record[3].trim();
        let state_code = record[4].trim();

        if country_code != COUNTRY_CODE {
            warn!(row = row_num, country = country_code, "not a Malaysia row");
            out.stats.invalid_records += 1;
            continue;
        }

        if !POSTAL_CODE_RE.is_match(postal_code) {
            warn!(row = row_num, postal_code, "invalid postal code format");
            out.stats.invalid_records += 1;
            continue;
        }

        let province_code = match map_state_code(state_code) {
            Some(code) => code,
            None => {
                warn!(row = row_num, state_code, state_name, "unmapped state code");
                out.stats
                    .unmapped_states
                    .insert((state_code.to_string(), state_name.to_string()));
                out.stats.invalid_records += 1;
                continue;
            }
        };

        out.records.push(AcceptedRecord {
            postal_code: postal_code.to_string(),
            city: clean_city(city),
            province_code,
            country_code: country_code.to_string(),
        });
        out.stats.valid_records += 1;
        out.stats
            .states_found
            .insert((province_code.to_string(), state_name.to_string()));
    }

    Ok(out)
}
