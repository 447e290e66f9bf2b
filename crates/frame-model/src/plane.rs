//! Row-major 8-bit sample planes.

use lumafx_common::error::{LumafxError, LumafxResult};
use serde::{Deserialize, Serialize};

/// Dimensions of a plane in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaneSize {
    pub rows: usize,
    pub cols: usize,
}

impl PlaneSize {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of samples (`rows * cols`).
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of `(row, col)` in a row-major buffer.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Check that a slice holds exactly one plane of this size.
    pub fn check_len(&self, role: &str, len: usize) -> LumafxResult<()> {
        if self.is_empty() {
            return Err(LumafxError::geometry_mismatch(format!(
                "{role} plane has zero dimensions ({}x{})",
                self.cols, self.rows
            )));
        }
        if len != self.len() {
            return Err(LumafxError::geometry_mismatch(format!(
                "{role} plane is {len} samples, expected {} ({}x{})",
                self.len(),
                self.cols,
                self.rows
            )));
        }
        Ok(())
    }
}

/// An owned plane of 8-bit samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    size: PlaneSize,
    data: Vec<u8>,
}

impl Plane {
    /// Create a zero-filled plane.
    pub fn new(size: PlaneSize) -> Self {
        Self::filled(size, 0)
    }

    pub fn filled(size: PlaneSize, value: u8) -> Self {
        Self {
            size,
            data: vec![value; size.len()],
        }
    }

    /// Wrap existing samples, checking the length against `size`.
    pub fn from_vec(size: PlaneSize, data: Vec<u8>) -> LumafxResult<Self> {
        size.check_len("source", data.len())?;
        Ok(Self { size, data })
    }

    pub fn size(&self) -> PlaneSize {
        self.size
    }

    /// Sample at `(row, col)`, or `None` outside the plane.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.size.rows || col >= self.size.cols {
            return None;
        }
        Some(self.data[self.size.index(row, col)])
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
