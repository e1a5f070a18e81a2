//! # aggregate
//!
//! Folds parsed records into per-drug totals and writes the sorted summary.
//!
//! Output format:
//! ```text
//! drug_name,num_prescriber,total_cost
//! CHLORPROMAZINE,2,3000
//! BENZTROPINE MESYLATE,1,1500
//! AMBIEN,2,300
//! ```

use crate::error::PrescriptionError;
use crate::record::Record;

use std::collections::{HashMap, HashSet};
use std::io::Write;

use rust_decimal::{Decimal, RoundingStrategy};

const HEADER: [&str; 3] = ["drug_name", "num_prescriber", "total_cost"];

/// Running totals for one drug.
#[derive(Debug, Default)]
struct DrugTotals {
    total_cost: Decimal,
    prescribers: HashSet<String>,
}

/// One row of the summary report.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportRow {
    pub drug_name: String,
    pub num_prescriber: usize,
    /// Whole currency units, rounded half away from zero.
    pub total_cost: Decimal,
}

/// Aggregation state for a whole run.
#[derive(Debug, Default)]
pub struct Aggregator {
    drugs: HashMap<String, DrugTotals>,
    line_count: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one record's cost and prescriber to its drug. `line` is only used for error
    /// reporting. State is left untouched when the running total would overflow.
    pub fn accumulate(&mut self, record: Record, line: usize) -> Result<(), PrescriptionError> {
        let prescriber = record.prescriber_name();

        let current = self.drugs.get(&record.drug_name).map_or(Decimal::ZERO, |t| t.total_cost);
        let Some(total_cost) = current.checked_add(record.drug_cost) else {
            return Err(PrescriptionError::CostOverflow { line, drug: record.drug_name });
        };

        let totals = self.drugs.entry(record.drug_name).or_default();
        totals.total_cost = total_cost;
        totals.prescribers.insert(prescriber);

        self.line_count += 1;
        Ok(())
    }

    /// Number of records accumulated so far.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of distinct drugs seen so far.
    pub fn drug_count(&self) -> usize {
        self.drugs.len()
    }

    /// Builds the report rows sorted by total cost, then drug name, both descending.
    pub fn report(&self) -> Vec<ReportRow> {
        let mut rows: Vec<ReportRow> = self
            .drugs
            .iter()
            .map(|(drug, totals)| ReportRow {
                drug_name: drug.clone(),
                num_prescriber: totals.prescribers.len(),
                total_cost: round_to_units(totals.total_cost),
            })
            .collect();

        rows.sort_by(|a, b| {
            b.total_cost
                .cmp(&a.total_cost)
                .then_with(|| b.drug_name.cmp(&a.drug_name))
        });

        rows
    }

    /// Writes the header and every report row as CSV to out.
    pub fn write_report(&self, out: impl Write) -> Result<(), PrescriptionError> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        wtr.write_record(HEADER)?;
        for row in self.report() {
            let num_prescriber = row.num_prescriber.to_string();
            let total_cost = row.total_cost.to_string();
            wtr.write_record([row.drug_name.as_str(), num_prescriber.as_str(), total_cost.as_str()])?;
        }
        wtr.flush()?;

        Ok(())
    }
}

/// Rounds to a whole number with no trailing fractional digits, so it prints as an integer.
fn round_to_units(cost: Decimal) -> Decimal {
    cost.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
