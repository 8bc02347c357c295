/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, BufWriter};

/// Read the whole of `path` into memory.
///
/// Raw planar input has no header to validate against the requested
/// dimensions; `fjpeg::JpegEncoder::new` is what rejects a length mismatch.
pub fn read_raw_plane(path: &OsStr) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Open `path` for writing, buffered so the encoder can stream its output
/// straight to disk instead of holding the whole encoded image in memory
/// before writing it out.
pub fn create_output(path: &OsStr) -> io::Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Remove whatever was written to `path` so far. Called after a failed
/// encode, since a partially written output file is never meaningful.
pub fn discard_output(path: &OsStr) {
    let _ = fs::remove_file(path);
}
