//! Global histogram equalization of a luma plane.
//!
//! The remap runs in two phases: the histogram, cumulative sums, and remap
//! table are built in full from the input, and only then is the output
//! plane written. A degenerate histogram therefore fails before any output
//! sample is touched.

use lumafx_common::error::{LumafxError, LumafxResult};
use lumafx_frame_model::plane::{Plane, PlaneSize};

/// Number of 8-bit intensity levels.
pub const LEVELS: usize = 256;

/// Per-level sample counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; LEVELS],
}

impl Histogram {
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut counts = [0u64; LEVELS];
        for &v in samples {
            counts[v as usize] += 1;
        }
        Self { counts }
    }

    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Lowest level with a non-zero count.
    pub fn min_level(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest level with a non-zero count.
    pub fn max_level(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }

    pub fn mean(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(level, &c)| level as u64 * c)
            .sum();
        Some(weighted as f64 / total as f64)
    }

    /// Number of levels that occur at least once.
    pub fn distinct_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn cumulative(&self) -> CumulativeSums {
        let mut sums = [0u64; LEVELS];
        let mut running = 0u64;
        for (sum, &count) in sums.iter_mut().zip(self.counts.iter()) {
            running += count;
            *sum = running;
        }
        CumulativeSums { sums }
    }
}

/// Running totals: `at(i)` is the number of samples with level `<= i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeSums {
    sums: [u64; LEVELS],
}

impl CumulativeSums {
    pub fn at(&self, level: u8) -> u64 {
        self.sums[level as usize]
    }

    pub fn total(&self) -> u64 {
        self.sums[LEVELS - 1]
    }
}

/// Level-to-level lookup table produced by equalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    table: [u8; LEVELS],
}

impl RemapTable {
    /// Scale cumulative sums by `256 / total` and floor.
    ///
    /// The top populated level scales to exactly 256, which is clamped to
    /// 255. A zero total is rejected instead of dividing by zero.
    pub fn from_cumulative(cumulative: &CumulativeSums) -> LumafxResult<Self> {
        let total = cumulative.total();
        if total == 0 {
            return Err(LumafxError::DegenerateHistogram);
        }
        let k = LEVELS as f64 / total as f64;

        let mut table = [0u8; LEVELS];
        for (level, out) in table.iter_mut().enumerate() {
            let scaled = (cumulative.sums[level] as f64 * k).floor();
            *out = scaled.min(255.0) as u8;
        }
        Ok(Self { table })
    }

    #[inline]
    pub fn map(&self, level: u8) -> u8 {
        self.table[level as usize]
    }

    pub fn as_array(&self) -> &[u8; LEVELS] {
        &self.table
    }
}

/// Histogram equalizer. Stateless; every table is rebuilt per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistogramEqualizer;

impl HistogramEqualizer {
    pub fn new() -> Self {
        Self
    }

    /// Build the remap table for one plane of samples.
    pub fn remap_table(&self, input: &[u8]) -> LumafxResult<RemapTable> {
        RemapTable::from_cumulative(&Histogram::from_samples(input).cumulative())
    }

    /// Equalize `input` into `output`, both exactly one plane of `size`.
    pub fn equalize(&self, size: PlaneSize, input: &[u8], output: &mut [u8]) -> LumafxResult<()> {
        size.check_len("input", input.len())?;
        size.check_len("output", output.len())?;
        let table = self.remap_table(input)?;
        for (out, &v) in output.iter_mut().zip(input) {
            *out = table.map(v);
        }
        Ok(())
    }

    pub fn equalize_plane(&self, input: &Plane) -> LumafxResult<Plane> {
        let mut output = Plane::new(input.size());
        self.equalize(input.size(), input.as_slice(), output.as_mut_slice())?;
        Ok(output)
    }
}
