//! Frame geometry negotiated before the first frame.

use std::fmt;

use lumafx_common::error::{LumafxError, LumafxResult};
use serde::{Deserialize, Serialize};

use crate::plane::PlaneSize;

/// Width and height of an I420 frame in pixels.
///
/// Construction rejects zero dimensions, so every `FrameGeometry` describes
/// at least one luma sample and one sample per chroma plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGeometry")]
pub struct FrameGeometry {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawGeometry {
    width: u32,
    height: u32,
}

impl TryFrom<RawGeometry> for FrameGeometry {
    type Error = LumafxError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl FrameGeometry {
    /// 640x480, the default negotiated format.
    pub const VGA: FrameGeometry = FrameGeometry {
        width: 640,
        height: 480,
    };

    pub fn new(width: u32, height: u32) -> LumafxResult<Self> {
        if width == 0 || height == 0 {
            return Err(LumafxError::geometry_mismatch(format!(
                "frame dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luma plane size: `height` rows of `width` samples.
    pub fn luma_size(&self) -> PlaneSize {
        PlaneSize::new(self.height as usize, self.width as usize)
    }

    /// Size of each chroma plane under 4:2:0 subsampling.
    ///
    /// Odd dimensions round up, so the last chroma column/row covers a
    /// single luma column/row.
    pub fn chroma_size(&self) -> PlaneSize {
        PlaneSize::new(
            (self.height as usize).div_ceil(2),
            (self.width as usize).div_ceil(2),
        )
    }

    pub fn luma_len(&self) -> usize {
        self.luma_size().len()
    }

    pub fn chroma_len(&self) -> usize {
        self.chroma_size().len()
    }

    /// Total bytes of one packed frame (luma + both chroma planes).
    pub fn frame_len(&self) -> usize {
        self.luma_len() + 2 * self.chroma_len()
    }

    /// Check that a packed frame buffer has exactly `frame_len()` bytes.
    pub fn check_frame_len(&self, role: &str, len: usize) -> LumafxResult<()> {
        let expected = self.frame_len();
        if len != expected {
            return Err(LumafxError::geometry_mismatch(format!(
                "{role} frame is {len} bytes, expected {expected} for {self}"
            )));
        }
        Ok(())
    }
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self::VGA
    }
}

impl fmt::Display for FrameGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
