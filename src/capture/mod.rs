mod error;
mod frame;
mod webcam;

pub use error::CameraError;
pub use frame::{FrameBuffer, PixelLayout, BYTES_PER_PIXEL};
pub use webcam::{NokhwaProvider, WebcamCapture};

/// Entry point to the cameras available on this machine
pub trait CameraProvider {
    type Device: CaptureSource;

    /// List one descriptor line per available camera, in enumeration order.
    ///
    /// Zero cameras is an empty list, not an error.
    fn list_cameras(&self) -> Result<Vec<String>, CameraError>;

    /// Open a camera session. The session is released when the device is dropped.
    fn open(&self, device_index: u32) -> Result<Self::Device, CameraError>;
}

/// An open camera session
pub trait CaptureSource {
    /// Begin streaming and negotiate the frame format
    fn start(&mut self) -> Result<(), CameraError>;

    /// Negotiated frame width, 0 until the stream is started
    fn frame_width(&self) -> u32;

    /// Negotiated frame height, 0 until the stream is started
    fn frame_height(&self) -> u32;

    /// Block until one frame arrives and copy it into a `width * height * 3` buffer
    fn capture(&mut self, width: u32, height: u32) -> Result<FrameBuffer, CameraError>;
}

/// Trim descriptor lines and drop empty ones, keeping enumeration order
pub fn descriptor_lines<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|line| line.as_ref().trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
