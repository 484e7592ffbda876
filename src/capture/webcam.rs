use super::{CameraError, CameraProvider, CaptureSource, FrameBuffer, PixelLayout};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, CameraInfo, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

/// Cameras reached through nokhwa's platform backends
#[derive(Debug, Default, Clone, Copy)]
pub struct NokhwaProvider;

impl NokhwaProvider {
    pub fn new() -> Self {
        Self
    }
}

/// `"<index>: <name> (<description>)"`, omitting an empty description
fn describe(info: &CameraInfo) -> String {
    let name = info.human_name();
    let description = info.description().trim();
    if description.is_empty() {
        format!("{}: {}", info.index(), name.trim())
    } else {
        format!("{}: {} ({})", info.index(), name.trim(), description)
    }
}

impl CameraProvider for NokhwaProvider {
    type Device = WebcamCapture;

    fn list_cameras(&self) -> Result<Vec<String>, CameraError> {
        let devices = nokhwa::query(ApiBackend::Auto)
            .map_err(|e| CameraError::ListFailed(e.to_string()))?;

        tracing::debug!("Camera query returned {} device(s)", devices.len());

        Ok(devices.iter().map(describe).collect())
    }

    fn open(&self, device_index: u32) -> Result<WebcamCapture, CameraError> {
        WebcamCapture::open(device_index)
    }
}

/// An open nokhwa camera session, stopped when dropped
pub struct WebcamCapture {
    camera: Camera,
    index: u32,
    started: bool,
}

impl WebcamCapture {
    pub fn open(device_index: u32) -> Result<Self, CameraError> {
        tracing::info!("Opening camera {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let camera = Camera::new(index, requested).map_err(|e| CameraError::OpenFailed {
            index: device_index,
            message: e.to_string(),
        })?;

        tracing::info!("Camera {} opened: {}", device_index, camera.info().human_name());

        Ok(Self {
            camera,
            index: device_index,
            started: false,
        })
    }
}

impl CaptureSource for WebcamCapture {
    fn start(&mut self) -> Result<(), CameraError> {
        if self.started {
            return Ok(());
        }

        self.camera
            .open_stream()
            .map_err(|e| CameraError::StartFailed(e.to_string()))?;
        self.started = true;

        tracing::info!(
            "Camera {} streaming at {} ({:?})",
            self.index,
            self.camera.resolution(),
            self.camera.frame_format()
        );

        Ok(())
    }

    fn frame_width(&self) -> u32 {
        if self.started {
            self.camera.resolution().width()
        } else {
            0
        }
    }

    fn frame_height(&self) -> u32 {
        if self.started {
            self.camera.resolution().height()
        } else {
            0
        }
    }

    fn capture(&mut self, width: u32, height: u32) -> Result<FrameBuffer, CameraError> {
        let mut buffer = FrameBuffer::allocate(width, height, PixelLayout::Rgb)?;

        if !self.started {
            return Err(CameraError::CaptureFailed("stream not started".to_string()));
        }

        let frame = self
            .camera
            .frame()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::CaptureFailed(e.to_string()))?;

        let copied = buffer.fill(&decoded.into_raw());
        tracing::debug!(
            "Captured {} of {} bytes from camera {}",
            copied,
            buffer.as_bytes().len(),
            self.index
        );

        Ok(buffer)
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        if self.camera.is_stream_open() {
            if let Err(e) = self.camera.stop_stream() {
                tracing::warn!("Failed to stop camera {} stream: {}", self.index, e);
            }
        }
        tracing::debug!("Camera {} released", self.index);
    }
}
