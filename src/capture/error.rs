use thiserror::Error;

/// Failures reported by the camera layer
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("failed to enumerate cameras: {0}")]
    ListFailed(String),

    #[error("failed to open camera {index}: {message}")]
    OpenFailed { index: u32, message: String },

    #[error("failed to start camera stream: {0}")]
    StartFailed(String),

    #[error("invalid frame size: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("failed to capture frame: {0}")]
    CaptureFailed(String),

    #[error("cannot allocate frame buffer for {width}x{height}")]
    AllocationFailed { width: u32, height: u32 },
}
