//! Show per-frame luma statistics of a raw I420 stream.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use lumafx_frame_model::{FrameGeometry, FrameRef};
use lumafx_processing_core::histogram::Histogram;

use super::{count_frames, read_frame};

pub fn run(input: PathBuf, geometry: FrameGeometry) -> anyhow::Result<()> {
    let total_frames = count_frames(&input, geometry)?;

    println!("Stream: {}", input.display());
    println!(
        "  Geometry: {} I420 ({} bytes/frame)",
        geometry,
        geometry.frame_len()
    );
    println!("  Frames: {total_frames}");
    println!();

    let file = File::open(&input)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", input.display()))?;
    let mut reader = BufReader::new(file);
    let mut buf = vec![0u8; geometry.frame_len()];

    println!("Luma:");
    let mut index = 0u64;
    while read_frame(&mut reader, &mut buf)? == buf.len() {
        let frame = FrameRef::split(geometry, &buf)?;
        println!("  [{index:>5}] {}", summarize(&Histogram::from_samples(frame.luma)));
        index += 1;
    }

    Ok(())
}

fn summarize(hist: &Histogram) -> String {
    match (hist.min_level(), hist.max_level(), hist.mean()) {
        (Some(min), Some(max), Some(mean)) => format!(
            "min {min:>3}  max {max:>3}  mean {mean:>6.2}  levels {:>3}",
            hist.distinct_levels()
        ),
        _ => "empty".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_line() {
        let hist = Histogram::from_samples(&[0, 255, 255, 2]);
        assert_eq!(
            summarize(&hist),
            "min   0  max 255  mean 128.00  levels   3"
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&Histogram::from_samples(&[])), "empty");
    }
}
