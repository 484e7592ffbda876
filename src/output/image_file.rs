use super::{OutputError, OutputFormat, OutputSink};
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::path::{Path, PathBuf};

pub const OUTPUT_WIDTH: u32 = 640;
pub const OUTPUT_HEIGHT: u32 = 480;

/// Writes frames to a PNG or JPEG file at a fixed resolution
pub struct ImageFileWriter {
    path: PathBuf,
    format: OutputFormat,
    width: u32,
    height: u32,
    grayscale: bool,
}

impl ImageFileWriter {
    /// Create a writer for `path`, rejecting extensions outside `.png`/`.jpg`/`.jpeg`.
    ///
    /// Nothing is written until [`OutputSink::write_frame`] is called.
    pub fn new<P: AsRef<Path>>(path: P, grayscale: bool) -> Result<Self, OutputError> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)
            .ok_or_else(|| OutputError::UnsupportedExtension(path.to_path_buf()))?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            width: OUTPUT_WIDTH,
            height: OUTPUT_HEIGHT,
            grayscale,
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

impl OutputSink for ImageFileWriter {
    fn write_frame(&mut self, frame: &RgbImage) -> Result<(), OutputError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(OutputError::InvalidFrame(format!("{}x{}", width, height)));
        }

        // Fixed target size, aspect ratio is not preserved
        let resized = imageops::resize(frame, self.width, self.height, FilterType::Triangle);

        let image = if self.grayscale {
            DynamicImage::ImageLuma8(imageops::grayscale(&resized))
        } else {
            DynamicImage::ImageRgb8(resized)
        };

        tracing::debug!(
            "Encoding {}x{} frame as {:?} to {}",
            self.width,
            self.height,
            self.format,
            self.path.display()
        );

        image
            .save_with_format(&self.path, self.format.image_format())
            .map_err(|source| OutputError::Encode {
                path: self.path.clone(),
                source,
            })?;

        Ok(())
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb};

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
    }

    #[test]
    fn writes_png_at_fixed_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut writer = ImageFileWriter::new(&path, false).unwrap();
        assert_eq!(writer.resolution(), (640, 480));
        writer.write_frame(&gradient(320, 320)).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!(written.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
        assert_eq!(written.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn writes_grayscale_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.jpeg");

        let mut writer = ImageFileWriter::new(&path, true).unwrap();
        assert_eq!(writer.format(), OutputFormat::Jpeg);
        writer.write_frame(&gradient(1280, 720)).unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!(written.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
        assert_eq!(written.color(), image::ColorType::L8);
    }

    #[test]
    fn rejects_ppm_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.ppm");

        let err = ImageFileWriter::new(&path, false).err().unwrap();
        assert!(matches!(err, OutputError::UnsupportedExtension(_)));
        assert!(!path.exists());
    }

    #[test]
    fn empty_frame_is_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut writer = ImageFileWriter::new(&path, false).unwrap();
        let err = writer.write_frame(&RgbImage::new(0, 0)).unwrap_err();
        assert!(matches!(err, OutputError::InvalidFrame(ref size) if size == "0x0"));
        assert!(!path.exists());
    }

    #[test]
    fn encode_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");

        let mut writer = ImageFileWriter::new(&path, false).unwrap();
        let err = writer.write_frame(&gradient(8, 8)).unwrap_err();
        assert!(matches!(err, OutputError::Encode { .. }));
    }
}
