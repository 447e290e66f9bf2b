//! Transform a raw I420 stream frame by frame.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use lumafx_frame_model::{FrameGeometry, LumaPath, ModeSelection};
use lumafx_processing_core::{FrameSession, HalftoneDiffuser};

use super::{count_frames, read_frame};

/// Resolved options for one `process` invocation.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub geometry: FrameGeometry,
    pub mode: ModeSelection,
    pub diffuser: HalftoneDiffuser,
}

pub fn run(options: ProcessOptions) -> anyhow::Result<()> {
    println!("Processing: {}", options.input.display());

    let total_frames = count_frames(&options.input, options.geometry)?;
    let path = options.mode.luma_path();

    println!("  Output: {}", options.output.display());
    println!(
        "  Geometry: {} ({} bytes/frame)",
        options.geometry,
        options.geometry.frame_len()
    );
    println!("  Luma: {}", describe_path(path, &options.diffuser));
    println!(
        "  Chroma: {}",
        if options.mode.neutralizes_chroma() {
            "neutralized"
        } else {
            "passthrough"
        }
    );

    let processed = transform_stream(&options)?;
    if processed != total_frames {
        anyhow::bail!(
            "Wrote {processed} frame(s) but {} holds {total_frames}",
            options.input.display()
        );
    }

    println!("\nDone: {processed} frame(s) written.");
    Ok(())
}

/// Stream every frame of `options.input` through a session into
/// `options.output`, returning the number of frames written.
pub fn transform_stream(options: &ProcessOptions) -> anyhow::Result<u64> {
    ensure_distinct_paths(&options.input, &options.output)?;

    let input = File::open(&options.input)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", options.input.display()))?;
    let output = File::create(&options.output)
        .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", options.output.display()))?;
    let mut reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);

    let mut session = FrameSession::new(options.diffuser);
    session.negotiate(options.geometry);
    session.set_mode(options.mode);

    let frame_len = options.geometry.frame_len();
    let mut in_frame = vec![0u8; frame_len];
    let mut out_frame = vec![0u8; frame_len];
    let mut index = 0u64;

    loop {
        let n = read_frame(&mut reader, &mut in_frame)?;
        if n == 0 {
            break;
        }
        if n < frame_len {
            anyhow::bail!("Frame {index} is truncated: {n} of {frame_len} bytes");
        }

        session
            .process_frame(&in_frame, &mut out_frame)
            .map_err(|e| anyhow::anyhow!("Frame {index} failed: {e}"))?;
        writer.write_all(&out_frame)?;
        index += 1;
    }
    writer.flush()?;

    let stats = session.stats();
    tracing::info!(
        frames = stats.frames_processed,
        rejected = stats.frames_rejected,
        "Stream complete"
    );
    Ok(stats.frames_processed)
}

/// Refuse to stream a file onto itself; creating the output would
/// truncate the input before its first frame is read.
fn ensure_distinct_paths(input: &Path, output: &Path) -> anyhow::Result<()> {
    let input_abs = input
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {e}", input.display()))?;
    // A missing output cannot alias an existing input.
    let Ok(output_abs) = output.canonicalize() else {
        return Ok(());
    };
    if input_abs == output_abs {
        anyhow::bail!(
            "Output {} is the input file; choose a different output path",
            output.display()
        );
    }
    Ok(())
}

fn describe_path(path: LumaPath, diffuser: &HalftoneDiffuser) -> String {
    match path {
        LumaPath::Halftone => format!(
            "halftone (threshold {}, levels {}/{})",
            diffuser.threshold(),
            diffuser.high_value(),
            diffuser.low_value()
        ),
        LumaPath::Equalize => "histogram equalization".to_string(),
        LumaPath::Passthrough => "passthrough".to_string(),
    }
}
