/*
 * Copyright (c) 2024.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Errors possible during encoding.
use core::fmt::{Debug, Display, Formatter};

use fjpeg_core::ZByteIoError;

/// Errors encountered while building or running an encoder.
pub enum EncodeErrors {
    /// The requested quality is outside `1..=100`.
    InvalidQuality(u8),
    /// Width or height is zero, or not a multiple of the colorspace's MCU
    /// size (16 for 4:2:0 color, 8 for grayscale).
    ///
    /// The arguments are the offending dimension and the required
    /// multiple.
    InvalidDimensions(usize, usize),
    /// The raw input buffer is the wrong length for the configured
    /// dimensions and colorspace.
    ///
    /// First argument is the expected length, second is the length found.
    InputLengthMismatch(usize, usize),
    /// A DC or AC coefficient category exceeded the baseline limit (11 for
    /// DC, 10 for AC). Indicates corrupt input or a transform bug.
    EncodeOverflow(u8, u8),
    /// A `(BITS, HUFFVAL)` specification was malformed: either
    /// `sum(BITS) > 256` or a symbol was repeated.
    TableSpecInvalid(&'static str),
    /// Generic message, does not need heap allocation.
    GenericStatic(&'static str),
    /// An I/O error from the output sink.
    IoError(ZByteIoError)
}

impl Debug for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            EncodeErrors::InvalidQuality(q) => {
                writeln!(f, "Invalid quality {q}, expected a value in 1..=100")
            }
            EncodeErrors::InvalidDimensions(dim, multiple) => {
                writeln!(
                    f,
                    "Invalid dimension {dim}, expected a positive multiple of {multiple}"
                )
            }
            EncodeErrors::InputLengthMismatch(expected, found) => {
                writeln!(
                    f,
                    "Input buffer length mismatch, expected {expected} bytes but found {found}"
                )
            }
            EncodeErrors::EncodeOverflow(category, limit) => {
                writeln!(
                    f,
                    "Coefficient category {category} exceeds the baseline limit of {limit}"
                )
            }
            EncodeErrors::TableSpecInvalid(reason) => {
                writeln!(f, "Invalid Huffman table specification: {reason}")
            }
            EncodeErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
            EncodeErrors::IoError(val) => {
                writeln!(f, "I/O error {val:?}")
            }
        }
    }
}

impl Display for EncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl From<&'static str> for EncodeErrors {
    fn from(r: &'static str) -> Self {
        Self::GenericStatic(r)
    }
}

impl From<ZByteIoError> for EncodeErrors {
    fn from(value: ZByteIoError) -> Self {
        EncodeErrors::IoError(value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeErrors {}
