mod image_file;

pub use image_file::{ImageFileWriter, OUTPUT_HEIGHT, OUTPUT_WIDTH};

use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Trait for output destinations
pub trait OutputSink {
    /// Write a frame to the output
    fn write_frame(&mut self, frame: &RgbImage) -> Result<(), OutputError>;

    /// Get the expected output resolution
    fn resolution(&self) -> (u32, u32);
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unsupported output extension for {0}; use .png/.jpg/.jpeg")]
    UnsupportedExtension(PathBuf),

    #[error("cannot resolve output path {path}: {source}")]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Image file formats accepted for output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from the path extension, case-insensitively.
    ///
    /// Only `.png`, `.jpg` and `.jpeg` are accepted.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Absolute form of `path`, relative paths joined onto the current directory
pub fn resolve_output_path(path: &Path) -> Result<PathBuf, OutputError> {
    std::path::absolute(path).map_err(|source| OutputError::ResolvePath {
        path: path.to_path_buf(),
        source,
    })
}
