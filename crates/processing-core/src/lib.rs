//! LumaFX Processing Core: the pixel transform engine
//!
//! Transforms the luma plane of packed I420 frames:
//! - **Halftone:** Bilevel quantization with causal error diffusion
//! - **Histogram Equalization:** Global cumulative-distribution remap
//! - **Chroma Neutralization:** Mid-gray chroma whenever any mode is active
//!
//! This crate is pure computation: no I/O, no platform dependencies.
//! All inputs are borrowed buffers; all working state lives for one call.

pub mod chroma;
pub mod halftone;
pub mod histogram;
pub mod session;
pub mod transformer;

pub use halftone::HalftoneDiffuser;
pub use histogram::HistogramEqualizer;
pub use session::{FrameSession, SessionStats};
pub use transformer::FrameTransformer;
