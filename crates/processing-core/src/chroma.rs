//! Chroma neutralization.

/// Mid-gray chroma sample: zero color difference in 8-bit YUV.
pub const CHROMA_NEUTRAL: u8 = 128;

/// Overwrite every sample of both chroma planes with [`CHROMA_NEUTRAL`].
pub fn neutralize(chroma_a: &mut [u8], chroma_b: &mut [u8]) {
    chroma_a.fill(CHROMA_NEUTRAL);
    chroma_b.fill(CHROMA_NEUTRAL);
}
