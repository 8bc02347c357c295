/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A minimal bytestream writer.
//!
//! The encoder never reads a JPEG back in, so unlike the corresponding
//! module in other zune-family crates, only the writer half is kept here.

pub use traits::ZByteWriterTrait;
pub use writer::ZByteWriter;

mod traits;
mod writer;

#[cfg(feature = "std")]
use std::fmt;

/// Errors that can occur while writing to a byte sink.
#[derive(Debug)]
pub enum ZByteIoError {
    /// A standard library I/O error.
    #[cfg(feature = "std")]
    StdIoError(std::io::Error),
    /// The output buffer is too small to hold the requested write.
    NotEnoughBuffer(usize, usize),
    /// An error that may occur for reasons not covered by the other variants.
    Generic(&'static str)
}

#[cfg(feature = "std")]
impl fmt::Display for ZByteIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZByteIoError::StdIoError(err) => write!(f, "I/O error: {err}"),
            ZByteIoError::NotEnoughBuffer(wanted, have) => {
                write!(f, "buffer too small: wanted {wanted} bytes, have {have}")
            }
            ZByteIoError::Generic(msg) => write!(f, "{msg}")
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ZByteIoError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for ZByteIoError {
    fn from(value: std::io::Error) -> Self {
        ZByteIoError::StdIoError(value)
    }
}
