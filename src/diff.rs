use std::{fmt, io::Write};

use itertools::izip;

use crate::{
    netpbm::{Channel, NetpbmImage},
    utils::iterator::GridIterator,
};

/// One differing sample position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub row: usize,
    pub col: usize,
    /// `None` for grayscale images
    pub channel: Option<Channel>,
    pub value_a: i64,
    pub value_b: i64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel {
            Some(channel) => write!(
                f,
                "Mismatch at row {}, col {}, channel {}: {} vs {}",
                self.row, self.col, channel, self.value_a, self.value_b
            ),
            None => write!(
                f,
                "Mismatch at row {}, col {}: {} vs {}",
                self.row, self.col, self.value_a, self.value_b
            ),
        }
    }
}

/// Outcome of comparing two decoded images
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Width or height differ, no sample was compared
    DimensionMismatch {
        a: (usize, usize),
        b: (usize, usize),
    },
    /// Same dimensions but grayscale vs RGB, no sample was compared
    ChannelMismatch { a: usize, b: usize },
    /// Every differing sample, in row, column, channel order
    Samples { mismatches: Vec<Mismatch> },
}

impl Report {
    /// Number of differing samples, `None` when the images were not comparable.
    pub fn mismatch_count(&self) -> Option<usize> {
        match self {
            Report::Samples { mismatches } => Some(mismatches.len()),
            _ => None,
        }
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Report::Samples { mismatches } => mismatches,
            _ => &[],
        }
    }

    pub fn is_match(&self) -> bool {
        self.mismatch_count() == Some(0)
    }

    /// Write the report line by line: each mismatch then the summary, or the single
    /// early-exit line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::DimensionMismatch { a, b } => {
                write!(f, "Dimension mismatch: {}x{} vs {}x{}", a.0, a.1, b.0, b.1)
            }
            Report::ChannelMismatch { a, b } => {
                write!(f, "Channel mismatch: {} vs {} (P2=1, P3=3)", a, b)
            }
            Report::Samples { mismatches } => {
                for mismatch in mismatches {
                    writeln!(f, "{}", mismatch)?;
                }
                match mismatches.len() {
                    0 => write!(f, "All pixels match exactly."),
                    count => write!(f, "Total differing samples: {}", count),
                }
            }
        }
    }
}

/// Compare two images sample by sample.
///
/// Dimensions are checked before channel counts; either mismatch ends the comparison
/// without looking at any sample. Otherwise every unequal sample yields one [`Mismatch`].
pub fn compare(a: &NetpbmImage, b: &NetpbmImage) -> Report {
    if a.dimensions() != b.dimensions() {
        return Report::DimensionMismatch {
            a: a.dimensions(),
            b: b.dimensions(),
        };
    }
    if a.channel_count() != b.channel_count() {
        return Report::ChannelMismatch {
            a: a.channel_count(),
            b: b.channel_count(),
        };
    }

    let format = a.format();
    let mut mismatches = Vec::new();
    for ((x, y, _), pixel_a, pixel_b) in izip!(
        GridIterator::new(a.width(), a.height()),
        a.pixels(),
        b.pixels()
    ) {
        for (offset, (&value_a, &value_b)) in pixel_a.iter().zip(pixel_b).enumerate() {
            if value_a != value_b {
                mismatches.push(Mismatch {
                    row: y,
                    col: x,
                    channel: format.channel(offset),
                    value_a,
                    value_b,
                });
            }
        }
    }

    log::debug!("compared {} samples, {} differ", a.samples().len(), mismatches.len());

    Report::Samples { mismatches }
}
