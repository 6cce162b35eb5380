// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Discovery of WebP inputs in a single directory.
//!
//! Entries are selected purely by name: anything ending in `.webp`, in any
//! letter case, is an input. The directory is not descended into.
//!
//! # Example
//!
//! ```no_run
//! use webp2png::scanner::{list_webp_files, ScanOptions};
//!
//! let files = list_webp_files(".".as_ref(), &ScanOptions::default()).unwrap();
//! for file in &files {
//!     println!("{}", file.display());
//! }
//! ```

use snafu::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Error type for directory listing failures.
#[derive(Debug, Snafu)]
pub enum ScanError {
    /// The directory itself could not be listed.
    #[snafu(display("failed to list {}: {source}", path.display()))]
    ReadDir {
        /// The directory being listed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Options controlling how inputs are discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Sort inputs by file name instead of using directory listing order.
    ///
    /// Listing order depends on the filesystem, so output numbering is only
    /// reproducible with this enabled.
    pub sort: bool,
}

/// Returns true if the file name ends in `.webp`, ignoring case.
#[must_use]
pub fn is_webp(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .is_some_and(|name| name.ends_with(".webp"))
}

/// Lists the WebP entries directly inside `dir`.
///
/// Entries that cannot be read are skipped. Only a failure to open `dir`
/// itself is an error.
///
/// # Errors
///
/// Returns [`ScanError::ReadDir`] if `dir` cannot be listed.
pub fn list_webp_files(dir: &Path, opts: &ScanOptions) -> Result<Vec<PathBuf>, ScanError> {
    // WalkDir yields root errors as items, which are filtered out below
    std::fs::read_dir(dir).context(ReadDirSnafu { path: dir })?;

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1);
    if opts.sort {
        walker = walker.sort_by_file_name();
    }

    Ok(walker
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| is_webp(e.path()))
        .map(walkdir::DirEntry::into_path)
        .collect())
}
