//! Core utilities shared by the fjpeg family of crates.
//!
//! This crate holds the plumbing an encoder needs but that has nothing to do
//! with JPEG itself: a small byte-sink abstraction, a description of the
//! colorspace/channel layout of an input image, and the public configuration
//! struct consumed by `fjpeg::JpegEncoder`.
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod options;

pub use bytestream::{ZByteIoError, ZByteWriter, ZByteWriterTrait};
pub use colorspace::ColorSpace;
pub use options::EncoderOptions;
