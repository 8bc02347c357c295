//! Encoder options
//!
//! This module exposes a single struct carrying everything an encode
//! needs to know about its input that isn't a pixel: dimensions, quality,
//! and channel layout.
//!
//! To remove the annoyance of getters and setters, all fields are public;
//! the `with_*` methods exist only for chained, builder-style construction.

use crate::colorspace::ColorSpace;

/// Options controlling a single JPEG encode.
///
/// Not all fields have a meaningful default for every caller (width and
/// height in particular must be set to the real image dimensions), so
/// [`EncoderOptions::default`] is mainly a starting point for the `with_*`
/// builder methods rather than something to use as-is.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    /// JPEG quality factor, 1..=100.
    ///
    /// - Default value: 50
    /// - Quality 50 reproduces the JPEG Annex K default quantization
    ///   tables unscaled; see the quality-scaling formula in the `fjpeg`
    ///   crate for other values.
    pub quality: u8,
    /// Channel layout of the input planes.
    ///
    /// - Default value: `ColorSpace::YCbCr420`
    pub colorspace: ColorSpace,
    /// Width of the image, in pixels.
    ///
    /// Must be a multiple of `colorspace.mcu_size()`.
    ///
    /// - Default value: 0 (invalid; must be set before use)
    pub width: usize,
    /// Height of the image, in pixels.
    ///
    /// Must be a multiple of `colorspace.mcu_size()`.
    ///
    /// - Default value: 0 (invalid; must be set before use)
    pub height: usize
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            quality:    50,
            colorspace: ColorSpace::YCbCr420,
            width:      0,
            height:     0
        }
    }
}

impl EncoderOptions {
    /// Create options for a given colorspace, with all other fields at
    /// their default.
    pub fn new(colorspace: ColorSpace) -> Self {
        Self { colorspace, ..Self::default() }
    }

    /// Set the quality factor.
    pub const fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Set the colorspace.
    pub const fn with_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    /// Set the image dimensions.
    pub const fn with_dimensions(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Expected length, in bytes, of the raw planar input for these
    /// options: `width*height` for grayscale, plus two quarter-size chroma
    /// planes for 4:2:0.
    pub const fn expected_input_len(&self) -> usize {
        let luma = self.width * self.height;
        match self.colorspace {
            ColorSpace::Luma => luma,
            ColorSpace::YCbCr420 => luma + 2 * ((self.width / 2) * (self.height / 2))
        }
    }
}
