#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the fetcher, README sync, and CLI.
///
/// Configuration parsing deliberately never surfaces through this type at
/// the top level — malformed documents degrade to defaults — but the strict
/// parser still reports [`Error::Parse`] so callers can log what was wrong.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors raised while reading or writing workspace files.
    #[error("failed to access {path:?}: {source}")]
    Io {
        /// Location of the file involved in the failed operation.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    },
    /// Wraps decoding errors for configuration documents.
    #[error("failed to parse configuration: {message}")]
    Parse {
        /// Human readable message describing the decode failure.
        message: String
    },
    /// GitHub API transport or authentication failures. Fatal to the run.
    #[error("GitHub API error: {message}")]
    Api {
        /// Human readable message describing the API failure.
        message: String
    },
    /// Returned when inputs violate invariants.
    #[error("invalid input: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    }
}

impl Error {
    /// Constructs an API error from the provided displayable value.
    pub fn api<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Api {
            message: message.into()
        }
    }

    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Intended for CLI contexts where the variant name adds nothing for end
    /// users. The returned string matches the [`std::fmt::Display`]
    /// implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Parse {
            message: source.to_string()
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            message: source.to_string()
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(source: octocrab::Error) -> Self {
        Self::Api {
            message: source.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn api_constructor_populates_message() {
        let error = Error::api("rate limited");
        match error {
            Error::Api {
                ref message
            } => {
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected api error, got {other:?}")
        }
    }

    #[test]
    fn validation_constructor_populates_message() {
        let error = Error::validation("something went wrong");
        match error {
            Error::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::api("display me");
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/config.json");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_json_conversion_maps_to_parse_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let invalid = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }
}
