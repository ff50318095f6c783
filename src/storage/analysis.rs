//! Aggregate statistics over the record set.

use serde::Serialize;

use crate::domain::Record;

/// Marks at or above this count as a pass.
pub const PASS_MARK: u32 = 40;

/// Aggregate statistics over the full record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    /// Sum of all marks.
    pub total: u32,
    /// Mean marks.
    pub average: f64,
    /// Highest marks on file.
    pub highest: u32,
    /// Lowest marks on file.
    pub lowest: u32,
    /// Every record sharing the highest marks.
    pub top: Vec<Record>,
    /// Number of records with marks strictly below the average.
    pub below_average: usize,
    /// Number of records with marks at or above [`PASS_MARK`].
    pub pass_count: usize,
    /// Number of records with marks below [`PASS_MARK`].
    pub fail_count: usize,
}

impl Stats {
    /// Computes statistics over the given records.
    ///
    /// Returns `None` for an empty set — there is no meaningful average to
    /// report, and callers are expected to surface "no data" rather than
    /// zeros.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records(records: &[Record]) -> Option<Self> {
        let highest = records.iter().map(|record| record.marks).max()?;
        let lowest = records.iter().map(|record| record.marks).min()?;

        let total: u32 = records.iter().map(|record| record.marks).sum();
        let average = f64::from(total) / records.len() as f64;

        let top = records
            .iter()
            .filter(|record| record.marks == highest)
            .cloned()
            .collect();
        let below_average = records
            .iter()
            .filter(|record| f64::from(record.marks) < average)
            .count();
        let pass_count = records
            .iter()
            .filter(|record| record.marks >= PASS_MARK)
            .count();

        Some(Self {
            total,
            average,
            highest,
            lowest,
            top,
            below_average,
            pass_count,
            fail_count: records.len() - pass_count,
        })
    }
}
