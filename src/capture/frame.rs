use super::CameraError;
use image::RgbImage;

/// Bytes per pixel of every captured frame
pub const BYTES_PER_PIXEL: usize = 3;

/// Channel order of the raw frame bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Bgr,
}

/// One raw captured frame
///
/// `data` always holds exactly `width * height * 3` bytes. If the camera
/// delivered fewer, the tail stays zeroed and `captured` records how many
/// bytes were actually copied.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    layout: PixelLayout,
    data: Vec<u8>,
    captured: usize,
}

impl FrameBuffer {
    /// Allocate a zeroed buffer sized for `width x height` pixels
    pub fn allocate(width: u32, height: u32, layout: PixelLayout) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidGeometry { width, height });
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .ok_or(CameraError::AllocationFailed { width, height })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| CameraError::AllocationFailed { width, height })?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            layout,
            data,
            captured: 0,
        })
    }

    /// Copy as much of `src` as fits and return the number of bytes copied
    pub fn fill(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.data.len());
        self.data[..n].copy_from_slice(&src[..n]);
        self.captured = n;
        n
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Bytes actually delivered by the camera
    pub fn captured(&self) -> usize {
        self.captured
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer into an RGB image, swapping channels for BGR frames
    pub fn into_rgb_image(self) -> Option<RgbImage> {
        let Self {
            width,
            height,
            layout,
            mut data,
            ..
        } = self;

        if layout == PixelLayout::Bgr {
            for pixel in data.chunks_exact_mut(BYTES_PER_PIXEL) {
                pixel.swap(0, 2);
            }
        }

        RgbImage::from_raw(width, height, data)
    }
}
