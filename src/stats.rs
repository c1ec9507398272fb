// src/stats.rs

use std::collections::BTreeSet;

/// Counters and discovery sets accumulated across one processing run.
/// BTreeSets so the report listings come out sorted without extra work.
#[derive(Debug, Default)]
pub struct RunStats {
    pub total_records: u64,
    pub valid_records: u64,
    pub invalid_records: u64,
    /// `(iso_code, state_name)` pairs seen among accepted rows.
    pub states_found: BTreeSet<(String, String)>,
    /// `(short_code, state_name)` pairs that missed the mapping table.
    pub unmapped_states: BTreeSet<(String, String)>,
}

impl RunStats {
    /// Valid/total as a percentage. `None` when no rows were read at all.
    pub fn success_rate(&self) -> Option<f64> {
        if self.total_records == 0 {
            None
        } else {
            Some(self.valid_records as f64 / self.total_records as f64 * 100.0)
        }
    }

    /// Operator summary, printed once after the input is fully consumed.
    pub fn report(&self) {
        println!();
        println!("{:=<50}", "");
        println!("PROCESSING STATISTICS");
        println!("{:=<50}", "");
        println!(
            "Total records processed: {}",
            group_thousands(self.total_records)
        );
        println!("Valid records: {}", group_thousands(self.valid_records));
        println!("Invalid records: {}", group_thousands(self.invalid_records));
        match self.success_rate() {
            Some(rate) => println!("Success rate: {:.1}%", rate),
            None => println!("Success rate: n/a (no records processed)"),
        }

        println!("\nStates found ({}):", self.states_found.len());
        for (code, name) in &self.states_found {
            println!("  - {}:{}", code, name);
        }

        if !self.unmapped_states.is_empty() {
            println!("\nUnmapped state codes ({}):", self.unmapped_states.len());
            for (code, name) in &self.unmapped_states {
                println!("  - {}:{}", code, name);
            }
        }

        println!(
            "\nReady to generate SQL with {} postal codes",
            group_thousands(self.valid_records)
        );
    }
}

/// Render 1234567 as "1,234,567" for the operator report.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_handles_zero_total() {
        let stats = RunStats::default();
        assert_eq!(stats.success_rate(), None);
    }

    #[test]
    fn success_rate_is_valid_over_total() {
        let stats = RunStats {
            total_records: 4,
            valid_records: 3,
            invalid_records: 1,
            ..Default::default()
        };
        assert_eq!(stats.success_rate(), Some(75.0));
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(57_543), "57,543");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
