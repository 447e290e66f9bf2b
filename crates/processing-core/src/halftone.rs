//! Error-diffusion halftoning of a luma plane.
//!
//! Each pixel gathers a weighted sum of already-computed accumulated error
//! from a fixed 2x3 neighborhood, adds it to the input sample, and is
//! quantized to one of two levels. Pixels are visited strictly in row-major
//! order; the gather reads accumulated error written by earlier pixels, so
//! reordering or parallelizing rows changes the output.

use lumafx_common::config::HalftoneConfig;
use lumafx_common::error::{LumafxError, LumafxResult};
use lumafx_frame_model::plane::{Plane, PlaneSize};

/// Gather weights, row-major. Entry `[i][j]` samples accumulated error at
/// `(row - i + 1, col - j + 1)`, clamped to the plane edges.
const KERNEL: [[f32; 3]; 2] = [[0.0, 0.2, 0.0], [0.6, 0.1, 0.1]];

/// Per-call working buffers, one contiguous `rows * cols` array each.
#[derive(Debug)]
pub struct ErrorField {
    size: PlaneSize,
    /// Error left behind by each quantized pixel (`eg`).
    accumulated: Vec<f32>,
    /// Error gathered into each pixel before quantization (`ep`).
    propagated: Vec<f32>,
}

impl ErrorField {
    /// Allocate a zeroed field, failing cleanly instead of aborting when
    /// the allocator refuses.
    pub fn try_new(size: PlaneSize) -> LumafxResult<Self> {
        Ok(Self {
            size,
            accumulated: zeroed(size.len(), "accumulated error field")?,
            propagated: zeroed(size.len(), "propagated error field")?,
        })
    }

    pub fn accumulated(&self) -> &[f32] {
        &self.accumulated
    }

    pub fn propagated(&self) -> &[f32] {
        &self.propagated
    }

    /// Weighted sum of accumulated error around `(row, col)`.
    fn gather(&self, row: usize, col: usize) -> f32 {
        let mut sum = 0.0f32;
        for (i, weights) in KERNEL.iter().enumerate() {
            let r = clamp_index(row as isize - i as isize + 1, self.size.rows);
            for (j, weight) in weights.iter().enumerate() {
                let c = clamp_index(col as isize - j as isize + 1, self.size.cols);
                sum += weight * self.accumulated[self.size.index(r, c)];
            }
        }
        sum
    }
}

fn zeroed(len: usize, what: &'static str) -> LumafxResult<Vec<f32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| LumafxError::allocation_failure(what, len))?;
    buf.resize(len, 0.0);
    Ok(buf)
}

/// Nearest-edge clamp; `len` is at least 1.
#[inline]
fn clamp_index(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}

/// Bilevel quantizer with causal error diffusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalftoneDiffuser {
    threshold: u8,
    high_value: u8,
    low_value: u8,
}

impl Default for HalftoneDiffuser {
    fn default() -> Self {
        Self::from_config(&HalftoneConfig::default())
    }
}

impl HalftoneDiffuser {
    pub fn new(threshold: u8, high_value: u8, low_value: u8) -> Self {
        Self {
            threshold,
            high_value,
            low_value,
        }
    }

    pub fn from_config(config: &HalftoneConfig) -> Self {
        Self::new(config.threshold, config.high_value, config.low_value)
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn high_value(&self) -> u8 {
        self.high_value
    }

    pub fn low_value(&self) -> u8 {
        self.low_value
    }

    /// Halftone `input` into `output`. Both must hold exactly one plane of
    /// `size`; nothing is written unless the working field was allocated.
    pub fn diffuse(&self, size: PlaneSize, input: &[u8], output: &mut [u8]) -> LumafxResult<()> {
        size.check_len("input", input.len())?;
        size.check_len("output", output.len())?;
        let mut field = ErrorField::try_new(size)?;
        self.run(&mut field, input, output);
        Ok(())
    }

    /// Owned-plane convenience over [`HalftoneDiffuser::diffuse`].
    pub fn halftone(&self, input: &Plane) -> LumafxResult<Plane> {
        let mut output = Plane::new(input.size());
        self.diffuse(input.size(), input.as_slice(), output.as_mut_slice())?;
        Ok(output)
    }

    fn run(&self, field: &mut ErrorField, input: &[u8], output: &mut [u8]) {
        let size = field.size;
        let threshold = f32::from(self.threshold);

        for row in 0..size.rows {
            for col in 0..size.cols {
                let idx = size.index(row, col);
                let gathered = field.gather(row, col);
                field.propagated[idx] = gathered;

                let t = f32::from(input[idx]) + gathered;
                if t > threshold {
                    field.accumulated[idx] = t - 2.0 * threshold;
                    output[idx] = self.high_value;
                } else {
                    field.accumulated[idx] = t;
                    output[idx] = self.low_value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plane(rows: usize, cols: usize, data: &[u8]) -> Plane {
        Plane::from_vec(PlaneSize::new(rows, cols), data.to_vec()).unwrap()
    }

    #[test]
    fn test_single_pixel_plane() {
        let diffuser = HalftoneDiffuser::default();
        assert_eq!(diffuser.halftone(&plane(1, 1, &[200])).unwrap().as_slice(), &[255]);
        assert_eq!(diffuser.halftone(&plane(1, 1, &[129])).unwrap().as_slice(), &[255]);
        // Equal to the threshold is not above it.
        assert_eq!(diffuser.halftone(&plane(1, 1, &[128])).unwrap().as_slice(), &[0]);
    }

    #[test]
    fn test_two_by_two_clamped_neighbors() {
        let diffuser = HalftoneDiffuser::default();
        let size = PlaneSize::new(2, 2);
        let input = [200u8, 50, 100, 100];
        let mut output = [7u8; 4];
        let mut field = ErrorField::try_new(size).unwrap();
        diffuser.run(&mut field, &input, &mut output);

        assert_eq!(output, [255, 0, 0, 0]);
        // (0,1) picks up 0.1 of the -56 left at (0,0) through the clamped
        // left-hand tap; (1,1) picks up 0.1 of the 100 left at (1,0).
        let ep = field.propagated();
        assert_eq!(ep[0], 0.0);
        assert!((ep[1] - -5.6).abs() < 1e-4);
        assert_eq!(ep[2], 0.0);
        assert!((ep[3] - 10.0).abs() < 1e-4);
        assert_eq!(field.accumulated()[0], -56.0);
    }

    #[test]
    fn test_error_suppresses_right_neighbor() {
        // 130 quantizes high and leaves -126; 0.1 of that pulls the next
        // 130 down to 117.4, which quantizes low.
        let out = HalftoneDiffuser::default()
            .halftone(&plane(1, 2, &[130, 130]))
            .unwrap();
        assert_eq!(out.as_slice(), &[255, 0]);
    }

    #[test]
    fn test_all_zero_vga_plane_is_all_low() {
        let input = Plane::new(PlaneSize::new(480, 640));
        let out = HalftoneDiffuser::default().halftone(&input).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_custom_levels() {
        let diffuser = HalftoneDiffuser::new(50, 200, 10);
        let out = diffuser.halftone(&plane(1, 3, &[60, 0, 255])).unwrap();
        assert!(out.as_slice().iter().all(|&v| v == 200 || v == 10));
        assert_eq!(out.get(0, 0), Some(200));
    }

    #[test]
    fn test_mismatched_output_rejected_without_writes() {
        let diffuser = HalftoneDiffuser::default();
        let input = [255u8; 6];
        let mut output = [9u8; 4];
        let err = diffuser
            .diffuse(PlaneSize::new(2, 3), &input, &mut output)
            .unwrap_err();
        assert!(matches!(err, LumafxError::GeometryMismatch { .. }));
        assert_eq!(output, [9; 4]);
    }

    #[test]
    fn test_oversized_field_reports_allocation_failure() {
        let err = ErrorField::try_new(PlaneSize::new(1, usize::MAX / 2)).unwrap_err();
        match err {
            LumafxError::AllocationFailure { what, elements } => {
                assert_eq!(what, "accumulated error field");
                assert_eq!(elements, usize::MAX / 2);
            }
            other => panic!("expected AllocationFailure, got {other:?}"),
        }
    }

    #[test]
    fn test_clamp_index_edges() {
        assert_eq!(clamp_index(-1, 4), 0);
        assert_eq!(clamp_index(4, 4), 3);
        assert_eq!(clamp_index(2, 4), 2);
        assert_eq!(clamp_index(1, 1), 0);
    }

    proptest! {
        #[test]
        fn prop_output_is_bilevel(
            rows in 1usize..12,
            cols in 1usize..12,
            seed in proptest::collection::vec(any::<u8>(), 144),
            threshold in any::<u8>(),
            high in any::<u8>(),
            low in any::<u8>(),
        ) {
            let size = PlaneSize::new(rows, cols);
            let input: Vec<u8> = seed.into_iter().take(size.len()).collect();
            let mut output = vec![0u8; size.len()];
            HalftoneDiffuser::new(threshold, high, low)
                .diffuse(size, &input, &mut output)
                .unwrap();
            prop_assert!(output.iter().all(|&v| v == high || v == low));
        }

        #[test]
        fn prop_deterministic(data in proptest::collection::vec(any::<u8>(), 35)) {
            let input = Plane::from_vec(PlaneSize::new(5, 7), data).unwrap();
            let diffuser = HalftoneDiffuser::default();
            prop_assert_eq!(
                diffuser.halftone(&input).unwrap(),
                diffuser.halftone(&input).unwrap()
            );
        }
    }
}
