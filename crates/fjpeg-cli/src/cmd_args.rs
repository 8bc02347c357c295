/*
 * Copyright (c) 2024.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use clap::{value_parser, Arg, ArgAction, Command};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("fjpeg")
        .author("Marko Viitanen")
        .version(fjpeg::get_version())
        .about("Encode a raw planar YCbCr image into a baseline JPEG")
        .next_line_help(false)
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Raw planar input file to read pixel data from")
            .action(ArgAction::Set)
            .value_parser(value_parser!(OsString))
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Path to write the encoded JPEG to")
            .action(ArgAction::Set)
            .value_parser(value_parser!(OsString))
            .required(true))
        .arg(Arg::new("resolution")
            .short('r')
            .long("resolution")
            .help("Image dimensions, as WIDTHxHEIGHT")
            .value_name("WIDTHxHEIGHT")
            .action(ArgAction::Set)
            .required(true))
        .arg(Arg::new("quality")
            .short('q')
            .long("quality")
            .help("Encoding quality, 1..=100")
            .default_value("50")
            .value_parser(value_parser!(u8)))
        .arg(Arg::new("grayscale")
            .long("grayscale")
            .help("Treat the input as a single luma plane instead of 4:2:0 YCbCr")
            .action(ArgAction::SetTrue))
        .args(add_logging_options())
}

fn add_logging_options() -> [Arg; 3] {
    [
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display informational messages and higher"),
        Arg::new("debug")
            .short('d')
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display debug information and higher"),
        Arg::new("trace")
            .short('t')
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("Logging")
            .help("Display very verbose information")
    ]
}

#[test]
fn verify_cli() {
    create_cmd_args().debug_assert();
}
