/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
use crate::bytestream::ZByteIoError;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// The underlying sink trait a [`ZByteWriter`](crate::bytestream::ZByteWriter) writes into.
///
/// Implementing this for a new sink type is all that is needed to make the
/// writer usable with it; the crate ships implementations for `Vec<u8>` and
/// `&mut [u8]`, and for `std::io::Write` types when the `std` feature is on.
pub trait ZByteWriterTrait {
    /// Write all of `buf`, failing if the sink cannot hold it all.
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError>;

    /// Write a compile-time sized chunk of bytes.
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ZByteIoError> {
        self.write_all_bytes(buf)
    }

    /// Hint that `additional` more bytes are coming, so growable sinks can
    /// reserve capacity up front. A no-op for fixed-size sinks.
    fn pre_allocate_hint(&mut self, _additional: usize) -> Result<(), ZByteIoError> {
        Ok(())
    }

    /// Push any internally buffered bytes out to their final destination.
    /// A no-op for sinks that don't buffer (`Vec<u8>`, a slice); meaningful
    /// for `std::io::Write` sinks such as `BufWriter<File>`.
    fn flush_sink(&mut self) -> Result<(), ZByteIoError> {
        Ok(())
    }
}

impl ZByteWriterTrait for Vec<u8> {
    #[inline]
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn pre_allocate_hint(&mut self, additional: usize) -> Result<(), ZByteIoError> {
        self.reserve(additional);
        Ok(())
    }
}

impl ZByteWriterTrait for &mut Vec<u8> {
    #[inline]
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    #[inline]
    fn pre_allocate_hint(&mut self, additional: usize) -> Result<(), ZByteIoError> {
        self.reserve(additional);
        Ok(())
    }
}

impl ZByteWriterTrait for &mut [u8] {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError> {
        if buf.len() > self.len() {
            return Err(ZByteIoError::NotEnoughBuffer(buf.len(), self.len()));
        }
        let n = buf.len();
        self[..n].copy_from_slice(buf);
        let this = core::mem::take(self);
        *self = &mut this[n..];
        Ok(())
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> ZByteWriterTrait for std::io::BufWriter<W> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ZByteIoError> {
        use std::io::Write;
        self.write_all(buf)?;
        Ok(())
    }

    fn flush_sink(&mut self) -> Result<(), ZByteIoError> {
        use std::io::Write;
        self.flush()?;
        Ok(())
    }
}
