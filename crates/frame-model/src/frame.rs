//! Views over packed I420 frame buffers.

use lumafx_common::error::LumafxResult;

use crate::geometry::FrameGeometry;

/// Read-only view of a packed frame: luma, chroma-a, chroma-b.
#[derive(Debug, Clone, Copy)]
pub struct FrameRef<'a> {
    pub luma: &'a [u8],
    pub chroma_a: &'a [u8],
    pub chroma_b: &'a [u8],
}

impl<'a> FrameRef<'a> {
    /// Split a packed buffer into planes, rejecting a length that does not
    /// match `geometry`.
    pub fn split(geometry: FrameGeometry, data: &'a [u8]) -> LumafxResult<Self> {
        geometry.check_frame_len("input", data.len())?;
        let (luma, chroma) = data.split_at(geometry.luma_len());
        let (chroma_a, chroma_b) = chroma.split_at(geometry.chroma_len());
        Ok(Self {
            luma,
            chroma_a,
            chroma_b,
        })
    }
}

/// Writable view of a packed frame.
#[derive(Debug)]
pub struct FrameMut<'a> {
    pub luma: &'a mut [u8],
    pub chroma_a: &'a mut [u8],
    pub chroma_b: &'a mut [u8],
}

impl<'a> FrameMut<'a> {
    pub fn split(geometry: FrameGeometry, data: &'a mut [u8]) -> LumafxResult<Self> {
        geometry.check_frame_len("output", data.len())?;
        let (luma, chroma) = data.split_at_mut(geometry.luma_len());
        let (chroma_a, chroma_b) = chroma.split_at_mut(geometry.chroma_len());
        Ok(Self {
            luma,
            chroma_a,
            chroma_b,
        })
    }
}
