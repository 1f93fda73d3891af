use std::{fmt, io};

use thiserror::Error;

use crate::compare::Mismatch;
use crate::options::Representation;

/// Failure reported by a [`Candidate`](crate::Candidate).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The candidate does not accept these options.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    /// Compression did not complete.
    #[error("compression failed: {0}")]
    Compress(String),
    /// The compressed data could not be decoded.
    #[error("corrupt data: {0}")]
    CorruptData(String),
}

/// Which comparison of a trial failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Reference output against candidate output.
    Deflate,
    /// Round-tripped bytes against the original fixture.
    Inflate,
    /// Zlib trailer against the Adler-32 of the original fixture.
    Checksum,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Check::Deflate => "reference result != candidate result",
            Check::Inflate => "inflate result != original",
            Check::Checksum => "adler32 trailer != checksum of original",
        })
    }
}

/// Error returned by the fixture loader and the conformance suites.
#[derive(Error, Debug)]
pub enum Error {
    /// The fixture directory or one of its files could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The reference stream rejected the options or failed while compressing.
    #[error("Error in \"{fixture}\" ({representation}) - reference stream failed: {source}")]
    Reference {
        fixture: String,
        representation: Representation,
        #[source]
        source: io::Error,
    },

    /// The candidate rejected the options or failed.
    #[error("Error in \"{fixture}\" ({representation}) - candidate failed: {source}")]
    Candidate {
        fixture: String,
        representation: Representation,
        #[source]
        source: CodecError,
    },

    /// Both sides ran but produced different bytes.
    #[error("Error in \"{fixture}\" ({representation}) - {check} ({mismatch})")]
    Mismatch {
        fixture: String,
        representation: Representation,
        check: Check,
        mismatch: Mismatch,
    },
}

impl Error {
    /// Name of the fixture that failed, if the error belongs to a trial.
    pub fn fixture(&self) -> Option<&str> {
        match self {
            Error::Io(_) => None,
            Error::Reference { fixture, .. }
            | Error::Candidate { fixture, .. }
            | Error::Mismatch { fixture, .. } => Some(fixture.as_str()),
        }
    }

    /// Representation the failing trial ran under.
    pub fn representation(&self) -> Option<Representation> {
        match *self {
            Error::Io(_) => None,
            Error::Reference { representation, .. }
            | Error::Candidate { representation, .. }
            | Error::Mismatch { representation, .. } => Some(representation),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_fixture() {
        let err = Error::Mismatch {
            fixture: "lorem".into(),
            representation: Representation::Untyped,
            check: Check::Deflate,
            mismatch: Mismatch::Length { left: 10, right: 12 },
        };
        assert_eq!(
            err.to_string(),
            "Error in \"lorem\" (untyped) - reference result != candidate result (length 10 != 12)"
        );
        assert_eq!(err.fixture(), Some("lorem"));
        assert_eq!(err.representation(), Some(Representation::Untyped));
    }

    #[test]
    fn reference_error_keeps_source() {
        use std::error::Error as _;

        let err = Error::Reference {
            fixture: "a".into(),
            representation: Representation::Typed,
            source: io::Error::new(io::ErrorKind::InvalidInput, "bad level"),
        };
        let source = err.source().unwrap().downcast_ref::<io::Error>().unwrap();
        assert_eq!(source.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(source.to_string(), "bad level");
    }
}
