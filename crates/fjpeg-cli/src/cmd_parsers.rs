/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};

/// Set up the global logger from the verbosity flags.
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if *options.get_one::<bool>("trace").unwrap() {
        Level::Trace
    } else if *options.get_one::<bool>("debug").unwrap() {
        Level::Debug
    } else if *options.get_one::<bool>("verbose").unwrap() {
        Level::Info
    } else {
        Level::Warn
    };

    simple_logger::init_with_level(log_level).unwrap();
    info!("Initialized logger at level {log_level}");
}

/// Parse `WIDTHxHEIGHT` into `(width, height)`.
pub fn parse_resolution(value: &str) -> Result<(usize, usize), String> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| format!("invalid resolution '{value}', expected WIDTHxHEIGHT"))?;
    let width: usize = w.parse().map_err(|_| format!("invalid width '{w}'"))?;
    let height: usize = h.parse().map_err(|_| format!("invalid height '{h}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("invalid resolution '{value}', dimensions must be positive"));
    }
    Ok((width, height))
}
