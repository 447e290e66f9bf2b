//! Per-frame dispatch: one luma path, then the chroma pass.

use lumafx_common::error::LumafxResult;
use lumafx_frame_model::frame::{FrameMut, FrameRef};
use lumafx_frame_model::geometry::FrameGeometry;
use lumafx_frame_model::mode::{LumaPath, ModeSelection};

use crate::chroma::neutralize;
use crate::halftone::HalftoneDiffuser;
use crate::histogram::HistogramEqualizer;

/// Transforms packed I420 frames of a fixed geometry.
#[derive(Debug, Clone)]
pub struct FrameTransformer {
    geometry: FrameGeometry,
    diffuser: HalftoneDiffuser,
    equalizer: HistogramEqualizer,
}

impl FrameTransformer {
    pub fn new(geometry: FrameGeometry, diffuser: HalftoneDiffuser) -> Self {
        Self {
            geometry,
            diffuser,
            equalizer: HistogramEqualizer::new(),
        }
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Transform one frame from `input` into `output`.
    ///
    /// Both buffers are checked against the geometry before dispatch. Every
    /// failure is raised before the first output byte is written, and on
    /// success every output byte has been overwritten.
    pub fn transform(
        &self,
        mode: ModeSelection,
        input: &[u8],
        output: &mut [u8],
    ) -> LumafxResult<LumaPath> {
        let src = FrameRef::split(self.geometry, input)?;
        let dst = FrameMut::split(self.geometry, output)?;
        let luma_size = self.geometry.luma_size();

        let path = mode.luma_path();
        match path {
            LumaPath::Halftone => self.diffuser.diffuse(luma_size, src.luma, dst.luma)?,
            LumaPath::Equalize => self.equalizer.equalize(luma_size, src.luma, dst.luma)?,
            LumaPath::Passthrough => dst.luma.copy_from_slice(src.luma),
        }

        if mode.neutralizes_chroma() {
            neutralize(dst.chroma_a, dst.chroma_b);
        } else {
            dst.chroma_a.copy_from_slice(src.chroma_a);
            dst.chroma_b.copy_from_slice(src.chroma_b);
        }

        Ok(path)
    }
}
