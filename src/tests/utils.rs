use std::{collections::BTreeSet, fmt::Write, path::PathBuf};

use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::netpbm::{Format, NetpbmImage};

pub const TEST_IMAGE_SIZE: usize = 40;

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_image(format: Format, width: usize, height: usize, rng: &mut StdRng) -> NetpbmImage {
    let samples = (0..width * height * format.channel_count())
        .map(|_| rng.random_range(0..=255i64))
        .collect();
    NetpbmImage::new(format, width, height, 255, samples)
}

/// Bump `count` random samples by one. Returns the copy and the sample indices that changed.
pub fn perturb(image: &NetpbmImage, count: usize, rng: &mut StdRng) -> (NetpbmImage, BTreeSet<usize>) {
    let mut samples = image.samples().to_vec();
    let mut changed = BTreeSet::new();
    for _ in 0..count {
        let idx = rng.random_range(0..samples.len());
        if changed.insert(idx) {
            samples[idx] += 1;
        }
    }
    let copy = NetpbmImage::new(
        image.format(),
        image.width(),
        image.height(),
        image.max_value(),
        samples,
    );
    (copy, changed)
}

/// Render an image back to ASCII Netpbm text, one pixel row per line.
pub fn to_ascii(image: &NetpbmImage) -> String {
    let mut text = format!(
        "{}\n{} {} {}\n",
        image.format().magic(),
        image.width(),
        image.height(),
        image.max_value()
    );
    let row_len = image.width() * image.channel_count();
    for row in image.samples().chunks(row_len) {
        writeln!(text, "{}", row.iter().join(" ")).unwrap();
    }
    text
}
