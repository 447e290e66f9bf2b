//! Per-call transform mode selection.

use serde::{Deserialize, Serialize};

/// The luma transform a frame goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LumaPath {
    Halftone,
    Equalize,
    Passthrough,
}

/// Mode flags valid for exactly one transform call.
///
/// Precedence among the luma transforms is fixed: halftone wins over
/// histogram equalization, which wins over passthrough. `grayscale` never
/// changes luma; it only requests chroma neutralization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeSelection {
    pub grayscale: bool,
    pub halftone: bool,
    pub histogram_equalize: bool,
}

impl ModeSelection {
    /// No flags set: luma and chroma pass through unchanged.
    pub const PASSTHROUGH: ModeSelection = ModeSelection {
        grayscale: false,
        halftone: false,
        histogram_equalize: false,
    };

    pub fn grayscale() -> Self {
        Self {
            grayscale: true,
            ..Self::PASSTHROUGH
        }
    }

    pub fn halftone() -> Self {
        Self {
            halftone: true,
            ..Self::PASSTHROUGH
        }
    }

    pub fn histogram_equalize() -> Self {
        Self {
            histogram_equalize: true,
            ..Self::PASSTHROUGH
        }
    }

    pub fn luma_path(&self) -> LumaPath {
        if self.halftone {
            LumaPath::Halftone
        } else if self.histogram_equalize {
            LumaPath::Equalize
        } else {
            LumaPath::Passthrough
        }
    }

    /// Whether chroma is overwritten with mid-gray for this call.
    pub fn neutralizes_chroma(&self) -> bool {
        self.grayscale || self.halftone || self.histogram_equalize
    }

    /// Whether any flag is set.
    pub fn is_active(&self) -> bool {
        self.neutralizes_chroma()
    }
}
