//! Capture a single still frame from a webcam and save it as an image.
//!
//! [`capture`] wraps camera access behind [`capture::CameraProvider`] and
//! [`capture::CaptureSource`], [`output`] turns frames into PNG/JPEG files,
//! and [`pipeline`] runs the one-shot listing and capture flows.

pub mod capture;
pub mod output;
pub mod pipeline;
