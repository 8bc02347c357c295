/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The process interface around [`fjpeg::JpegEncoder`]: argument parsing,
//! logger setup, raw-plane file I/O and the timing/size summary printed
//! after every encode.

use std::process::exit;
use std::time::Instant;

use log::error;

use fjpeg_core::colorspace::ColorSpace;
use fjpeg_core::options::EncoderOptions;

mod cmd_args;
mod cmd_parsers;
mod file_io;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let matches = cmd.get_matches();

    cmd_parsers::setup_logger(&matches);

    if let Err(message) = run(&matches) {
        eprintln!("Error: {message}");
        exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<(), String> {
    let input_path = matches.get_one::<std::ffi::OsString>("in").unwrap();
    let output_path = matches.get_one::<std::ffi::OsString>("out").unwrap();
    let resolution = matches.get_one::<String>("resolution").unwrap();
    let quality = *matches.get_one::<u8>("quality").unwrap();
    let grayscale = matches.get_flag("grayscale");

    let (width, height) = cmd_parsers::parse_resolution(resolution)?;
    let colorspace = if grayscale { ColorSpace::Luma } else { ColorSpace::YCbCr420 };

    let read_start = Instant::now();
    let pixels = file_io::read_raw_plane(input_path)
        .map_err(|e| format!("could not read '{}': {e}", input_path.to_string_lossy()))?;
    let time_input_read_ms = read_start.elapsed().as_millis();

    let options = EncoderOptions::new(colorspace)
        .with_dimensions(width, height)
        .with_quality(quality);

    let mut encoder = fjpeg::JpegEncoder::new(&pixels, options).map_err(|e| e.to_string())?;

    let transform_start = Instant::now();
    encoder.transform().map_err(|e| {
        error!("transform failed: {e}");
        e.to_string()
    })?;
    let time_dct_quant_ms = transform_start.elapsed().as_millis();

    let sink = file_io::create_output(output_path)
        .map_err(|e| format!("could not open '{}': {e}", output_path.to_string_lossy()))?;

    let header_start = Instant::now();
    let bytes_written = match encoder.encode(sink) {
        Ok(n) => n,
        Err(e) => {
            error!("encode failed: {e}");
            file_io::discard_output(output_path);
            return Err(e.to_string());
        }
    };
    let time_header_ms = header_start.elapsed().as_millis();

    println!(
        "Time: Input read {time_input_read_ms} ms, DCT/Quant {time_dct_quant_ms} ms, Header {time_header_ms} ms"
    );
    println!("Input size: {} bytes", pixels.len());
    println!("Output size: {bytes_written} bytes");

    Ok(())
}
