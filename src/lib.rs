use std::{io::Write, path::Path};

use crate::{config::BatchConfig, diff::Report};

pub mod config;
pub mod diff;
pub mod error;
pub mod netpbm;
pub mod utils;


pub mod prelude {
    pub use crate::{
        diff::{Mismatch, Report, compare},
        netpbm::{Channel, Format, NetpbmImage, decode, decode_reader},
    };
}

/// Decode both images, compare them and write the human readable report to `out`.
pub fn run<A, B, W>(first: A, second: B, out: &mut W) -> error::Result<Report>
where
    A: AsRef<Path> + Sync,
    B: AsRef<Path> + Sync,
    W: Write,
{
    let (a, b) = netpbm::decode_pair(first, second)?;
    let report = diff::compare(&a, &b);
    report.write_to(out)?;
    Ok(report)
}

/// Run every comparison of a manifest in order, printing each name before its report.
///
/// The first decode failure aborts the batch.
pub fn run_batch<W: Write>(config: &BatchConfig, out: &mut W) -> error::Result<Vec<Report>> {
    let mut reports = Vec::with_capacity(config.comparisons.len());
    for comparison in &config.comparisons {
        writeln!(out, "{}", comparison.name)?;
        let report = run(&comparison.generated, &comparison.reference, out)?;

        if let Some(expected) = comparison.expected_mismatches {
            if report.mismatch_count() != Some(expected) {
                log::warn!(
                    "{}: expected {} differing samples, got {}",
                    comparison.name,
                    expected,
                    match report.mismatch_count() {
                        Some(count) => count.to_string(),
                        None => String::from("incomparable images"),
                    }
                );
            }
        }
        reports.push(report);
    }
    Ok(reports)
}
