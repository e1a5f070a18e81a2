//! # input
//!
//! Opens the prescription file and feeds each data line through the parser into the
//! aggregator.
//!
//! The first line is a header and is skipped unread. Paths ending in `.gz` are
//! decompressed on the fly.

use crate::aggregate::Aggregator;
use crate::error::PrescriptionError;
use crate::record;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use indicatif::ProgressBar;
use log::debug;

/// Spinner ticks after this many records.
const INCR: usize = 10_000;

const BUFF_SIZE: usize = 1024 * 64; // 64 KiB

/// Opens path for buffered reading.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(
        || format!("could not read file '{}'", path.display()))?;

    let is_gz = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));
    if is_gz {
        debug!("Reading {} as gzip", path.display());
        Ok(Box::new(BufReader::with_capacity(BUFF_SIZE, GzDecoder::new(file))))
    }
    else {
        Ok(Box::new(BufReader::with_capacity(BUFF_SIZE, file)))
    }
}

/// Skips the header line, then parses and accumulates every remaining line.
/// Blank lines are skipped. Stops at the first bad row.
pub fn read_records<R: BufRead>(mut reader: R,
                                agg: &mut Aggregator,
                                ) -> Result<(), PrescriptionError> {
    let mut buf: Vec<u8> = Vec::new();

    if reader.read_until(b'\n', &mut buf)? == 0 {
        log::warn!("Input is empty, no header line found");
        return Ok(());
    }

    let progress = ProgressBar::new_spinner();
    let mut line_no: usize = 1;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        if buf.iter().all(|b| *b == b'\n' || *b == b'\r') {
            debug!("Skipping blank line {}", line_no);
            continue;
        }

        let rec = record::parse(&buf, line_no)?;
        log::trace!("line {}: id {} drug {}", line_no, rec.id, rec.drug_name);
        agg.accumulate(rec, line_no)?;

        let count = agg.line_count();
        if count % INCR == 0 {
            progress.set_message(format!("{} records", count));
            progress.tick();
        }
    }

    progress.finish_and_clear();

    Ok(())
}
