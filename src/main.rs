// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for webp2png.
//!
//! This binary provides the `webp2png` command, which converts every WebP
//! image in the current directory to a numbered PNG.

use lexopt::prelude::*;
use snafu::prelude::*;
use webp2png::converter;
use webp2png::scanner::{self, ScanOptions};

struct Cli {
    sort: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("failed to determine current directory: {source}"))]
    CurrentDir { source: std::io::Error },

    #[snafu(transparent)]
    Scan { source: scanner::ScanError },
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert WebP images in the current directory to numbered PNG files

Usage: {name} [OPTIONS]

Each *.webp file (any case) becomes <name>_<n>.png in the same directory,
where <n> counts successful conversions starting at 1.

Options:
      --sort     Process files in name order instead of directory order
  -h, --help     Print help
  -V, --version  Print version",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    );
}

fn parse_args() -> Result<Cli, lexopt::Error> {
    let mut sort = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Long("sort") => sort = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Cli { sort })
}

fn main() -> Result<(), Error> {
    let cli = parse_args().context(ParseArgsSnafu)?;
    let dir = std::env::current_dir().context(CurrentDirSnafu)?;

    let opts = ScanOptions { sort: cli.sort };
    // Per-file failures are printed, not returned; the exit status stays 0
    converter::convert_dir(&dir, &opts, |outcome| println!("{outcome}"))?;

    println!("\nConversion process completed.");
    Ok(())
}
