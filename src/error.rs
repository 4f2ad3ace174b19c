// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for vegplot I/O and data access.
//!
//! The diversity and species-area computations are total and never fail;
//! [`Error`] covers only the layers around them (CSV parsing, plot lookup,
//! caller-supplied layouts). No external error crates.

use std::fmt;
use std::path::PathBuf;

/// Errors produced by vegplot parsers and data-access layers.
#[derive(Debug)]
pub enum Error {
    /// File I/O error with path context.
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Plot CSV parsing error (header, field count, number format).
    Csv(String),
    /// Lookup of a plot id the data source does not hold.
    UnknownPlot(String),
    /// Invalid input parameters (negative areas, non-finite values).
    InvalidInput(String),
}

/// Result type alias for vegplot operations.
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Csv(msg) => write!(f, "plot CSV parse error: {msg}"),
            Self::UnknownPlot(id) => write!(f, "unknown plot: {id}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(_) | Self::UnknownPlot(_) | Self::InvalidInput(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io_error() {
        let err = Error::Io {
            path: PathBuf::from("field_data/plots.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("plots.csv"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn display_all_variants() {
        let cases: Vec<(Error, &str)> = vec![
            (Error::Csv("line 3: bad height".into()), "plot CSV parse error"),
            (Error::UnknownPlot("P-07".into()), "unknown plot"),
            (Error::InvalidInput("negative area".into()), "invalid input"),
        ];
        for (err, expected_prefix) in cases {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "'{msg}' should start with '{expected_prefix}'"
            );
        }
    }

    #[test]
    fn error_source_chain() {
        let io_err = Error::Io {
            path: PathBuf::from("x"),
            source: std::io::Error::other("inner"),
        };
        assert!(std::error::Error::source(&io_err).is_some());

        let variants = [
            Error::Csv("x".into()),
            Error::UnknownPlot("x".into()),
            Error::InvalidInput("x".into()),
        ];
        for err in &variants {
            assert!(std::error::Error::source(err).is_none());
        }
    }
}
