// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert WebP images in a directory to numbered PNG files.
//!
//! Each `*.webp` file (any letter case) directly inside a directory is
//! decoded and written beside the original as `<stem>_<n>.png`, where `n`
//! counts successful conversions in this run starting from 1.
//!
//! # Overview
//!
//! 1. [`scanner`] lists the WebP inputs in the directory
//! 2. [`converter`] decodes each one, writes the PNG, and reports an
//!    [`Outcome`](converter::Outcome) per file
//!
//! # Example
//!
//! ```no_run
//! use webp2png::converter::convert_dir;
//! use webp2png::scanner::ScanOptions;
//!
//! let opts = ScanOptions { sort: true };
//! convert_dir(".".as_ref(), &opts, |outcome| println!("{outcome}")).unwrap();
//! ```
//!
//! # Modules
//!
//! - [`scanner`]: discovery of WebP inputs by file name
//! - [`converter`]: decoding, PNG encoding, and output numbering

#![deny(missing_docs)]

pub mod converter;
pub mod scanner;
