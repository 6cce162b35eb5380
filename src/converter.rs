// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! WebP to PNG conversion with sequential output numbering.
//!
//! Every WebP input is decoded and written back out as
//! `<stem>_<counter>.png` beside the original. The counter starts at 1 and
//! only advances when a conversion succeeds, so failed inputs never leave
//! gaps in the numbering.
//!
//! Failures are per file. A broken input is reported as an
//! [`Outcome::Failed`] and the batch moves on to the next one.
//!
//! # Example
//!
//! ```no_run
//! use webp2png::converter::convert_dir;
//! use webp2png::scanner::ScanOptions;
//!
//! let summary = convert_dir(".".as_ref(), &ScanOptions::default(), |outcome| {
//!     println!("{outcome}");
//! })
//! .unwrap();
//!
//! println!("{} converted, {} failed", summary.converted, summary.failed);
//! ```

use crate::scanner::{self, ScanError, ScanOptions};
use image::{ImageFormat, ImageReader};
use snafu::prelude::*;
use std::borrow::Cow;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Error type for a single failed conversion.
#[derive(Debug, Snafu)]
pub enum ConvertError {
    /// The input file could not be opened.
    #[snafu(display("failed to open: {source}"))]
    Open {
        /// The input being opened.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The input could not be decoded as a WebP image.
    #[snafu(display("failed to decode: {source}"))]
    Decode {
        /// The input being decoded.
        path: PathBuf,
        /// The underlying codec error.
        source: image::ImageError,
    },

    /// The input name has no stem to build an output name from.
    #[snafu(display("invalid input filename: no file stem"))]
    InvalidFilename {
        /// The offending input.
        path: PathBuf,
    },

    /// The PNG could not be encoded or written.
    #[snafu(display("failed to write {}: {source}", display_name(path)))]
    Save {
        /// The output being written.
        path: PathBuf,
        /// The underlying codec or I/O error.
        source: image::ImageError,
    },
}

/// The result of attempting to convert one input.
#[derive(Debug)]
pub enum Outcome {
    /// The input was written out as a PNG.
    Converted {
        /// The WebP file that was read.
        input: PathBuf,
        /// The PNG file that was written.
        output: PathBuf,
        /// The counter value used in the output name.
        counter: usize,
    },
    /// The input could not be converted. The counter was not advanced.
    Failed {
        /// The WebP file that was attempted.
        input: PathBuf,
        /// Why the conversion failed.
        error: ConvertError,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Converted`].
    #[must_use]
    pub const fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// The input this outcome is about.
    #[must_use]
    pub fn input(&self) -> &Path {
        match self {
            Self::Converted { input, .. } | Self::Failed { input, .. } => input,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converted { input, output, .. } => write!(
                f,
                "Converted '{}' to '{}'",
                display_name(input),
                display_name(output)
            ),
            Self::Failed { input, error } => {
                write!(f, "Error converting '{}': {error}", display_name(input))
            }
        }
    }
}

/// Totals for a whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of PNG files written.
    pub converted: usize,
    /// Number of inputs that failed.
    pub failed: usize,
}

impl Summary {
    /// Number of inputs attempted.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.converted + self.failed
    }
}

/// Shows a path by its file name, falling back to the whole path.
fn display_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
}

/// Builds the output file name `<stem>_<counter>.png` for `input`.
///
/// Only the last extension is stripped, so `a.b.webp` becomes `a.b_1.png`.
/// Returns `None` if `input` has no file name.
#[must_use]
pub fn output_file_name(input: &Path, counter: usize) -> Option<OsString> {
    let mut name = input.file_stem()?.to_os_string();
    name.push(format!("_{counter}.png"));
    Some(name)
}

/// Decodes `input` as WebP and writes it to `output` as PNG.
///
/// The format is taken on trust from the extension; contents are not
/// sniffed. An existing file at `output` is overwritten.
///
/// # Errors
///
/// Returns a [`ConvertError`] if the input cannot be opened or decoded, or
/// the PNG cannot be written.
pub fn convert_file(input: &Path, output: &Path) -> Result<(), ConvertError> {
    let mut reader = ImageReader::open(input).context(OpenSnafu { path: input })?;
    reader.set_format(ImageFormat::WebP);
    let image = reader.decode().context(DecodeSnafu { path: input })?;

    image
        .save_with_format(output, ImageFormat::Png)
        .context(SaveSnafu { path: output })
}

/// Converts one input using `counter` for its output name.
///
/// The output lands in the same directory as the input.
#[must_use]
pub fn convert_one(input: PathBuf, counter: usize) -> Outcome {
    let Some(name) = output_file_name(&input, counter) else {
        let error = ConvertError::InvalidFilename {
            path: input.clone(),
        };
        return Outcome::Failed { input, error };
    };
    let output = input.with_file_name(name);

    match convert_file(&input, &output) {
        Ok(()) => Outcome::Converted {
            input,
            output,
            counter,
        },
        Err(error) => Outcome::Failed { input, error },
    }
}

/// Converts every WebP file directly inside `dir`.
///
/// `on_outcome` is called after each attempt, in processing order. The
/// counter for the k-th successful conversion is always k.
///
/// # Errors
///
/// Returns a [`ScanError`] if `dir` cannot be listed. Individual conversion
/// failures are reported through `on_outcome` and never returned here.
pub fn convert_dir(
    dir: &Path,
    opts: &ScanOptions,
    mut on_outcome: impl FnMut(&Outcome),
) -> Result<Summary, ScanError> {
    let files = scanner::list_webp_files(dir, opts)?;

    let mut summary = Summary::default();
    let mut counter = 1;
    for input in files {
        let outcome = convert_one(input, counter);
        if outcome.is_converted() {
            counter += 1;
            summary.converted += 1;
        } else {
            summary.failed += 1;
        }
        on_outcome(&outcome);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::tempdir;

    #[allow(clippy::cast_possible_truncation)]
    fn write_webp(path: &Path) {
        let image = RgbaImage::from_fn(4, 3, |x, y| {
            Rgba([(x * 60) as u8, (y * 80) as u8, 200, 255])
        });
        image.save_with_format(path, ImageFormat::WebP).unwrap();
    }

    #[test]
    fn output_name_appends_counter() {
        let name = output_file_name(Path::new("photo.webp"), 1).unwrap();
        assert_eq!(name, "photo_1.png");
    }

    #[test]
    fn output_name_keeps_directory_out() {
        let name = output_file_name(Path::new("some/dir/b.WEBP"), 12).unwrap();
        assert_eq!(name, "b_12.png");
    }

    #[test]
    fn output_name_strips_only_last_extension() {
        let name = output_file_name(Path::new("a.b.webp"), 3).unwrap();
        assert_eq!(name, "a.b_3.png");
    }

    #[test]
    fn output_name_for_dotfile_keeps_whole_name() {
        let name = output_file_name(Path::new(".webp"), 1).unwrap();
        assert_eq!(name, ".webp_1.png");
    }

    #[test]
    fn output_name_requires_file_name() {
        assert!(output_file_name(Path::new(".."), 1).is_none());
    }

    #[test]
    fn converts_valid_webp_to_png() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.webp");
        let output = dir.path().join("in_1.png");
        write_webp(&input);

        convert_file(&input, &output).unwrap();

        let png = image::open(&output).unwrap();
        assert_eq!((png.width(), png.height()), (4, 3));
        assert!(input.exists(), "input must be left in place");
    }

    #[test]
    fn uppercase_extension_still_decodes_as_webp() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("SHOUT.WEBP");
        write_webp(&input);

        let outcome = convert_one(input, 1);
        assert!(outcome.is_converted(), "{outcome}");
        assert!(dir.path().join("SHOUT_1.png").exists());
    }

    #[test]
    fn corrupt_input_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("corrupt.webp");
        fs::write(&input, b"definitely not a webp").unwrap();

        let err = convert_file(&input, &dir.path().join("corrupt_1.png")).unwrap_err();
        assert!(matches!(err, ConvertError::Decode { .. }), "{err}");
        assert!(!dir.path().join("corrupt_1.png").exists());
    }

    #[test]
    fn missing_input_is_an_open_error() {
        let dir = tempdir().unwrap();
        let err = convert_file(
            &dir.path().join("gone.webp"),
            &dir.path().join("gone_1.png"),
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::Open { .. }), "{err}");
    }

    #[test]
    fn unwritable_output_is_a_save_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("ok.webp");
        write_webp(&input);

        let output = dir.path().join("no_such_dir").join("ok_1.png");
        let err = convert_file(&input, &output).unwrap_err();
        assert!(matches!(err, ConvertError::Save { .. }), "{err}");
    }

    #[test]
    fn converted_outcome_names_both_files() {
        let outcome = Outcome::Converted {
            input: PathBuf::from("/tmp/x/a.webp"),
            output: PathBuf::from("/tmp/x/a_1.png"),
            counter: 1,
        };
        assert_eq!(outcome.to_string(), "Converted 'a.webp' to 'a_1.png'");
    }

    #[test]
    fn failed_outcome_names_input_and_error() {
        let outcome = Outcome::Failed {
            input: PathBuf::from("/tmp/x/bad.webp"),
            error: ConvertError::InvalidFilename {
                path: PathBuf::from("/tmp/x/bad.webp"),
            },
        };
        assert_eq!(
            outcome.to_string(),
            "Error converting 'bad.webp': invalid input filename: no file stem"
        );
    }

    #[test]
    fn failures_do_not_consume_counter_values() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_broken.webp"), b"junk").unwrap();
        write_webp(&dir.path().join("b_good.webp"));
        fs::write(dir.path().join("c_broken.webp"), b"junk").unwrap();
        write_webp(&dir.path().join("d_good.webp"));

        let mut counters = Vec::new();
        let summary = convert_dir(dir.path(), &ScanOptions { sort: true }, |outcome| {
            if let Outcome::Converted { counter, .. } = outcome {
                counters.push(*counter);
            }
        })
        .unwrap();

        assert_eq!(counters, [1, 2]);
        assert_eq!(summary, Summary { converted: 2, failed: 2 });
        assert_eq!(summary.attempted(), 4);
        assert!(dir.path().join("b_good_1.png").exists());
        assert!(dir.path().join("d_good_2.png").exists());
    }

    #[test]
    fn outcomes_are_reported_in_processing_order() {
        let dir = tempdir().unwrap();
        for name in ["c.webp", "a.webp", "b.webp"] {
            write_webp(&dir.path().join(name));
        }

        let mut seen = Vec::new();
        convert_dir(dir.path(), &ScanOptions { sort: true }, |outcome| {
            seen.push(outcome.to_string());
        })
        .unwrap();

        assert_eq!(
            seen,
            [
                "Converted 'a.webp' to 'a_1.png'",
                "Converted 'b.webp' to 'b_2.png'",
                "Converted 'c.webp' to 'c_3.png'",
            ]
        );
    }
}
