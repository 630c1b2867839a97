//! Animation sequences: read-only 2-D pixel grids where rows correspond to
//! lights and columns to time-ordered frames.

use smart_leds::RGB8;

/// Random-access view of an animation.
///
/// The grid width is the authoritative frame count for every light; a
/// light's row index stays fixed for its entire lifetime.
pub trait Sequence {
    /// Number of frames (grid width).
    fn frame_count(&self) -> usize;

    /// Number of rows available for lights (grid height).
    fn light_count(&self) -> usize;

    /// Returns the pixel at the given frame column and light row.
    fn color_at(&self, frame: usize, row: usize) -> RGB8;
}

/// An owned, row-major RGB8 pixel grid.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<RGB8>,
}

impl PixelGrid {
    /// Creates a grid from row-major pixels.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height`.
    #[must_use]
    pub fn new(width: usize, height: usize, pixels: Vec<RGB8>) -> Self {
        assert_eq!(
            pixels.len(),
            width * height,
            "pixel count does not match the grid dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Creates a grid from raw interleaved RGB bytes, row-major.
    ///
    /// # Panics
    ///
    /// Panics if `raw.len() != width * height * 3`.
    #[must_use]
    pub fn from_raw(width: usize, height: usize, raw: &[u8]) -> Self {
        let pixels = raw
            .chunks_exact(3)
            .map(|px| RGB8::new(px[0], px[1], px[2]))
            .collect();
        Self::new(width, height, pixels)
    }
}

impl Sequence for PixelGrid {
    fn frame_count(&self) -> usize {
        self.width
    }

    fn light_count(&self) -> usize {
        self.height
    }

    fn color_at(&self, frame: usize, row: usize) -> RGB8 {
        self.pixels[row * self.width + frame]
    }
}
