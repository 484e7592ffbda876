use crate::capture::{descriptor_lines, CameraError, CameraProvider, CaptureSource};
use crate::output::{resolve_output_path, ImageFileWriter, OutputSink};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

/// Capture-mode settings taken from the command line
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub output: PathBuf,
    pub device_index: u32,
    pub grayscale: bool,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            output: PathBuf::from("screenshot.png"),
            device_index: 0,
            grayscale: false,
        }
    }
}

/// Print one descriptor per camera, or `No cameras found`.
///
/// Returns the number of cameras listed.
pub fn list_cameras<P, W>(provider: &P, out: &mut W) -> Result<usize>
where
    P: CameraProvider,
    W: Write,
{
    let cameras = descriptor_lines(provider.list_cameras().context("list cameras failed")?);

    if cameras.is_empty() {
        writeln!(out, "No cameras found")?;
        return Ok(0);
    }

    for camera in &cameras {
        writeln!(out, "{}", camera)?;
    }

    Ok(cameras.len())
}

/// Capture a single frame and save it as a 640x480 image.
///
/// The output extension is checked before the camera is touched. Once
/// opened, the camera is released on every return path when it goes out
/// of scope. Returns the absolute path that was written.
pub fn capture_to_file<P, W>(provider: &P, request: &CaptureRequest, out: &mut W) -> Result<PathBuf>
where
    P: CameraProvider,
    W: Write,
{
    let output_path = resolve_output_path(&request.output).context("output path error")?;
    let mut writer = ImageFileWriter::new(&output_path, request.grayscale)?;

    let mut camera = provider
        .open(request.device_index)
        .context("camera open failed")?;

    camera.start().context("camera start failed")?;

    let width = camera.frame_width();
    let height = camera.frame_height();
    if width == 0 || height == 0 {
        return Err(CameraError::InvalidGeometry { width, height }.into());
    }
    tracing::info!("Negotiated frame size {}x{}", width, height);

    let frame = camera.capture(width, height).context("capture failed")?;
    tracing::debug!(
        "Frame {}x{} {:?} holds {} bytes ({} captured)",
        frame.width(),
        frame.height(),
        frame.layout(),
        frame.as_bytes().len(),
        frame.captured()
    );

    let image = frame
        .into_rgb_image()
        .context("frame buffer does not match its geometry")?;

    writer.write_frame(&image).context("failed to write image")?;

    writeln!(out, "Saved screenshot: {}", output_path.display())?;

    Ok(output_path)
}
