//! # record
//!
//! Turns one raw line of the prescription file into a [`Record`].
//!
//! Expected row layout:
//! ```text
//! id,prescriber_last_name,prescriber_first_name,drug_name,drug_cost
//! 1000000001,Smith,James,AMBIEN,100
//! 457467862,"ADAIR,",ROBERT,AVODART,4729.76
//! ```
//!
//! Fields holding a literal comma are wrapped in `"`. Commas inside a quoted span are
//! dropped and the quote characters themselves are stripped, so `"ADAIR,"` becomes `ADAIR`.

use crate::error::PrescriptionError;

use std::str::FromStr;

use rust_decimal::Decimal;

const NUM_FIELDS: usize = 5;

/// One prescription fill event.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub id: u64,
    pub prescriber_last_name: String,
    pub prescriber_first_name: String,
    pub drug_name: String,
    pub drug_cost: Decimal,
}

impl Record {
    /// Prescriber name as "first last". Not normalized, so "James Smith" and "Smith James"
    /// count as two people.
    pub fn prescriber_name(&self) -> String {
        format!("{} {}", self.prescriber_first_name, self.prescriber_last_name)
    }
}

/// Removes the commas that sit inside quoted spans and strips the quotes.
/// An unterminated quote runs to the end of the line.
pub fn desanitize(line: &str) -> String {
    let mut cleaned = String::with_capacity(line.len());
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if in_quotes => {}
            _ => cleaned.push(c),
        }
    }

    cleaned
}

/// Parses one raw data line. `line` is the 1-based line number in the input file and is
/// only used for error reporting.
pub fn parse(raw: &[u8], line: usize) -> Result<Record, PrescriptionError> {
    let text = std::str::from_utf8(raw).map_err(|_| PrescriptionError::Encoding { line })?;
    let text = text.trim_end_matches(['\n', '\r']);

    let cleaned = if text.contains('"') {
        desanitize(text)
    } else {
        text.to_string()
    };

    let fields: Vec<&str> = cleaned.split(',').collect();
    if fields.len() != NUM_FIELDS {
        return Err(PrescriptionError::Format { line, row: cleaned.clone() });
    }

    let id: u64 = fields[0].parse().map_err(|_| PrescriptionError::InvalidId {
        line,
        value: fields[0].to_string(),
    })?;

    let drug_cost = Decimal::from_str(fields[4]).map_err(|_| PrescriptionError::InvalidCost {
        line,
        value: fields[4].to_string(),
    })?;

    Ok(Record {
        id,
        prescriber_last_name: fields[1].to_string(),
        prescriber_first_name: fields[2].to_string(),
        drug_name: fields[3].to_string(),
        drug_cost,
    })
}
