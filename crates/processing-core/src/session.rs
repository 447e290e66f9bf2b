//! Streaming session: negotiated geometry plus runtime-settable modes.
//!
//! A host negotiates the frame geometry once (and may renegotiate between
//! frames), flips mode flags whenever it likes, and pushes frames through
//! one at a time. Each frame sees the mode that was current when its call
//! started.

use lumafx_common::error::{LumafxError, LumafxResult};
use lumafx_frame_model::geometry::FrameGeometry;
use lumafx_frame_model::mode::{LumaPath, ModeSelection};

use crate::halftone::HalftoneDiffuser;
use crate::transformer::FrameTransformer;

/// Frame counters for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames transformed successfully.
    pub frames_processed: u64,

    /// Frames rejected before any output was written.
    pub frames_rejected: u64,
}

impl SessionStats {
    /// Reject rate as a percentage.
    pub fn reject_rate(&self) -> f64 {
        let total = self.frames_processed + self.frames_rejected;
        if total == 0 {
            return 0.0;
        }
        self.frames_rejected as f64 / total as f64 * 100.0
    }
}

/// A frame processing session.
#[derive(Debug)]
pub struct FrameSession {
    diffuser: HalftoneDiffuser,
    transformer: Option<FrameTransformer>,
    mode: ModeSelection,
    stats: SessionStats,
}

impl FrameSession {
    pub fn new(diffuser: HalftoneDiffuser) -> Self {
        Self {
            diffuser,
            transformer: None,
            mode: ModeSelection::default(),
            stats: SessionStats::default(),
        }
    }

    /// Fix the frame geometry for subsequent frames.
    pub fn negotiate(&mut self, geometry: FrameGeometry) {
        tracing::debug!(%geometry, "Negotiated frame geometry");
        self.transformer = Some(FrameTransformer::new(geometry, self.diffuser));
    }

    pub fn geometry(&self) -> Option<FrameGeometry> {
        self.transformer.as_ref().map(FrameTransformer::geometry)
    }

    pub fn set_mode(&mut self, mode: ModeSelection) {
        if mode != self.mode {
            tracing::debug!(
                grayscale = mode.grayscale,
                halftone = mode.halftone,
                histogram_equalize = mode.histogram_equalize,
                "Mode changed"
            );
        }
        self.mode = mode;
    }

    pub fn mode(&self) -> ModeSelection {
        self.mode
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Transform one packed frame under the current mode.
    pub fn process_frame(&mut self, input: &[u8], output: &mut [u8]) -> LumafxResult<LumaPath> {
        let result = match &self.transformer {
            Some(transformer) => transformer.transform(self.mode, input, output),
            None => Err(LumafxError::NotNegotiated),
        };

        match &result {
            Ok(path) => {
                self.stats.frames_processed += 1;
                tracing::trace!(
                    frame = self.stats.frames_processed,
                    ?path,
                    "Frame transformed"
                );
            }
            Err(e) => {
                self.stats.frames_rejected += 1;
                tracing::warn!("Frame rejected: {e}");
            }
        }
        result
    }
}

impl Default for FrameSession {
    fn default() -> Self {
        Self::new(HalftoneDiffuser::default())
    }
}
