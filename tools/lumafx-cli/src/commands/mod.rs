pub mod config;
pub mod info;
pub mod process;

use std::io::{self, Read};
use std::path::Path;

use lumafx_frame_model::FrameGeometry;

/// Fill `buf` from `reader`, stopping early only at end of stream.
///
/// Returns the number of bytes read: `buf.len()` for a whole frame, `0` at
/// a clean end of stream, anything in between for a truncated frame.
pub(crate) fn read_frame(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Number of whole frames in a raw stream file; errors on a partial trailer.
pub(crate) fn count_frames(path: &Path, geometry: FrameGeometry) -> anyhow::Result<u64> {
    let len = std::fs::metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to stat {}: {e}", path.display()))?
        .len();
    let frame_len = geometry.frame_len() as u64;
    if len % frame_len != 0 {
        anyhow::bail!(
            "{} is {len} bytes, not a whole number of {geometry} I420 frames ({frame_len} bytes each)",
            path.display()
        );
    }
    Ok(len / frame_len)
}
