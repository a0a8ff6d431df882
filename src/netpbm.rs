use std::fmt;

pub mod decoder;
pub mod tokens;

pub use decoder::{decode, decode_pair, decode_reader};

/// Sample layout of an ASCII Netpbm file, derived from its magic token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `P2`, one sample per pixel
    Grayscale,
    /// `P3`, three interleaved samples per pixel
    Rgb,
}

impl Format {
    pub fn from_magic(magic: &str) -> Option<Format> {
        match magic {
            "P2" => Some(Format::Grayscale),
            "P3" => Some(Format::Rgb),
            _ => None,
        }
    }

    pub fn magic(&self) -> &'static str {
        match self {
            Format::Grayscale => "P2",
            Format::Rgb => "P3",
        }
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        match self {
            Format::Grayscale => 1,
            Format::Rgb => 3,
        }
    }

    /// Label of the sample at `offset` within a pixel. Grayscale samples carry none.
    #[inline]
    pub fn channel(&self, offset: usize) -> Option<Channel> {
        match self {
            Format::Grayscale => None,
            Format::Rgb => Channel::ALL.get(offset).copied(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.magic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Channel::R => "R",
            Channel::G => "G",
            Channel::B => "B",
        };
        f.write_str(letter)
    }
}

/// Decoded ASCII Netpbm image.
///
/// Samples are stored row-major, RGB interleaved per pixel. Values are kept exactly as read,
/// `max_value` is never used to clamp or validate them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetpbmImage {
    format: Format,
    width: usize,
    height: usize,
    max_value: u64,
    samples: Vec<i64>,
}

impl NetpbmImage {
    /// # Panics
    /// This function will panic if `samples` does not hold exactly
    /// `width * height * channels` values.
    pub fn new(
        format: Format,
        width: usize,
        height: usize,
        max_value: u64,
        samples: Vec<i64>,
    ) -> Self {
        assert_eq!(
            samples.len(),
            width * height * format.channel_count(),
            "sample count doesn't match dimensions"
        );
        Self {
            format,
            width,
            height,
            max_value,
            samples,
        }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn max_value(&self) -> u64 {
        self.max_value
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.format.channel_count()
    }

    pub fn samples(&self) -> &[i64] {
        &self.samples
    }

    /// Samples grouped per pixel, in row-major order.
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, i64> {
        self.samples.chunks_exact(self.channel_count())
    }
}
