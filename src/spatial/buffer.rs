//! Owned RGB pixel grid with bounds-checked region access
//!
//! Pixels are stored as a `(height, width, 3)` array so a region view can be
//! handed straight to `average_color` and tiles can be pasted with a single
//! slice assignment.

use image::RgbImage;
use image::imageops::{self, FilterType};
use ndarray::{Array3, ArrayView3, Axis, Slice};

use crate::color::Color;
use crate::color::rgb::CHANNELS;
use crate::io::error::{MosaicError, Result, invalid_parameter};

/// Row-major RGB pixel buffer without alpha
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Array3<u8>,
}

impl PixelBuffer {
    /// Create a black buffer of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array3::zeros((height, width, CHANNELS)),
        }
    }

    /// Create a buffer filled with a single color
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let channels = color.channels();
        Self {
            pixels: Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| {
                channels.get(c).copied().unwrap_or(0)
            }),
        }
    }

    /// Create a buffer by evaluating `pixel(x, y)` at every position
    pub fn from_fn(width: usize, height: usize, pixel: impl Fn(usize, usize) -> Color) -> Self {
        Self {
            pixels: Array3::from_shape_fn((height, width, CHANNELS), |(y, x, c)| {
                pixel(x, y).channel(c)
            }),
        }
    }

    /// Wrap interleaved RGB bytes in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `data` is not exactly `width * height * 3` bytes
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let length = data.len();
        let pixels = Array3::from_shape_vec((height, width, CHANNELS), data).map_err(|e| {
            invalid_parameter(
                "data",
                &format!("{length} bytes"),
                &format!("cannot be shaped as {width}x{height} RGB: {e}"),
            )
        })?;
        Ok(Self { pixels })
    }

    /// Wrap a `(height, width, 3)` array
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the last axis does not have three channels
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = pixels.dim();
        if channels != CHANNELS {
            return Err(invalid_parameter(
                "pixels",
                &format!("{width}x{height}x{channels}"),
                &"last axis must hold exactly 3 channels",
            ));
        }
        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Color at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        let red = *self.pixels.get((y, x, 0))?;
        let green = *self.pixels.get((y, x, 1))?;
        let blue = *self.pixels.get((y, x, 2))?;
        Some(Color::new(red, green, blue))
    }

    /// Read-only view of the whole buffer as `(height, width, 3)`
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.pixels.view()
    }

    fn check_region(&self, x: usize, y: usize, width: usize, height: usize) -> Result<()> {
        let fits = width > 0
            && height > 0
            && x.checked_add(width).is_some_and(|end| end <= self.width())
            && y
                .checked_add(height)
                .is_some_and(|end| end <= self.height());
        if fits {
            Ok(())
        } else {
            Err(MosaicError::InvalidRegion {
                origin: Some((x, y)),
                size: (width, height),
                channels: CHANNELS,
                bounds: Some((self.width(), self.height())),
            })
        }
    }

    /// View of the `width × height` region with top-left corner `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` if the region is empty or not fully inside the buffer
    pub fn region(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> Result<ArrayView3<'_, u8>> {
        self.check_region(x, y, width, height)?;
        let rows = self.pixels.slice_axis(Axis(0), Slice::from(y..y + height));
        Ok(rows.slice_axis_move(Axis(1), Slice::from(x..x + width)))
    }

    /// Copy of the top-left `width × height` region
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` if the region is empty or larger than the buffer
    pub fn crop(&self, width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            pixels: self.region(0, 0, width, height)?.to_owned(),
        })
    }

    /// Copy `other` into this buffer with its top-left corner at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` if `other` does not fit at that position
    pub fn paste(&mut self, x: usize, y: usize, other: &Self) -> Result<()> {
        let (width, height) = (other.width(), other.height());
        self.check_region(x, y, width, height)?;
        self.pixels
            .slice_axis_mut(Axis(0), Slice::from(y..y + height))
            .slice_axis_move(Axis(1), Slice::from(x..x + width))
            .assign(&other.pixels);
        Ok(())
    }

    /// Resample to exactly `width × height` without preserving aspect ratio
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either target dimension is zero, or
    /// `InvalidRegion` if this buffer is empty
    pub fn resize(&self, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(invalid_parameter(
                "size",
                &format!("{width}x{height}"),
                &"resize target must not be empty",
            ));
        }
        if self.width() == width && self.height() == height {
            return Ok(self.clone());
        }
        self.check_region(0, 0, self.width(), self.height())?;

        let resized = imageops::resize(
            &self.to_rgb_image()?,
            to_u32("width", width)?,
            to_u32("height", height)?,
            FilterType::CatmullRom,
        );
        Self::from_rgb_image(resized)
    }

    /// Convert into an `image` crate buffer for encoding
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if a dimension does not fit in `u32`
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let width = to_u32("width", self.width())?;
        let height = to_u32("height", self.height())?;
        let raw: Vec<u8> = self.pixels.iter().copied().collect();
        RgbImage::from_raw(width, height, raw).ok_or_else(|| {
            invalid_parameter(
                "pixels",
                &format!("{width}x{height}"),
                &"buffer length does not match dimensions",
            )
        })
    }

    /// Take ownership of a decoded `image` crate buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the raw data does not match the image size
    pub fn from_rgb_image(image: RgbImage) -> Result<Self> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        Self::from_raw(width, height, image.into_raw())
    }
}

fn to_u32(parameter: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|e| invalid_parameter(parameter, &value, &e))
}
