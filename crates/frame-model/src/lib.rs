//! LumaFX Frame Model
//!
//! Defines the data contracts shared by the processing core and its hosts:
//! - **Geometry:** Frame dimensions negotiated once per session
//! - **Planes:** Row-major 8-bit sample arrays
//! - **Frames:** Contiguous I420 buffers split into luma and two chroma planes
//! - **Modes:** Per-call selection of the luma transform
//!
//! Buffer layout is planar 4:2:0: the full-resolution luma plane first,
//! followed by the two quarter-resolution chroma planes.

pub mod frame;
pub mod geometry;
pub mod mode;
pub mod plane;

pub use frame::*;
pub use geometry::*;
pub use mode::*;
pub use plane::*;
