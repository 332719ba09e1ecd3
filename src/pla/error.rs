//! Errors raised while reading truth tables and writing covers

use std::fmt;
use std::io;
use std::sync::Arc;

use crate::error::MinimizeError;

/// A malformed single-output truth table
///
/// Variants found while scanning rows carry the 1-based `line` of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PLAError {
    /// `.i` or `.o` without a non-negative integer count
    InvalidCount {
        /// The directive, `.i` or `.o`
        directive: Arc<str>,
        /// Text found in place of the count
        value: Arc<str>,
    },
    /// More than one output, from `.o`, `.ob` or a row's output column
    UnsupportedOutputCount {
        /// Outputs found
        count: usize,
    },
    /// Input position that is not `0`, `1` or one of `- ~ x X`
    InvalidInputCharacter {
        line: usize,
        character: char,
        /// Zero-based variable index
        position: usize,
    },
    /// Output value that is not one of `0 1 2 3 4 - ~`
    InvalidOutputCharacter { line: usize, character: char },
    /// Row whose input part is not as wide as the table
    RowWidthMismatch {
        line: usize,
        /// Variables declared by `.i` or inferred from the first row
        expected: usize,
        /// Input characters in this row
        actual: usize,
    },
    /// Row with inputs but no output value
    MissingOutput { line: usize },
    /// Row matching more minterms than the reader will expand
    TooManyDontCares {
        line: usize,
        count: usize,
        limit: usize,
    },
    /// `.ilb` names a different number of variables than the table has
    InputLabelMismatch { expected: usize, actual: usize },
    /// Neither `.i` nor any row gives the number of variables
    MissingDimensions,
}

impl fmt::Display for PLAError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAError::InvalidCount { directive, value } => {
                write!(f, "{} expects a count, found '{}'", directive, value)
            }
            PLAError::UnsupportedOutputCount { count } => {
                write!(f, "Only single-output tables can be minimized, found {} outputs", count)
            }
            PLAError::InvalidInputCharacter {
                line,
                character,
                position,
            } => write!(
                f,
                "Line {}: '{}' is not an input value (variable {})",
                line, character, position
            ),
            PLAError::InvalidOutputCharacter { line, character } => {
                write!(f, "Line {}: '{}' is not an output value", line, character)
            }
            PLAError::RowWidthMismatch {
                line,
                expected,
                actual,
            } => write!(
                f,
                "Line {}: row has {} inputs, table has {} variables",
                line, actual, expected
            ),
            PLAError::MissingOutput { line } => {
                write!(f, "Line {}: row has no output value", line)
            }
            PLAError::TooManyDontCares { line, count, limit } => write!(
                f,
                "Line {}: row has {} don't-care inputs, at most {} are expanded",
                line, count, limit
            ),
            PLAError::InputLabelMismatch { expected, actual } => write!(
                f,
                ".ilb names {} variables, table has {}",
                actual, expected
            ),
            PLAError::MissingDimensions => {
                write!(f, "Table has no .i directive and no rows")
            }
        }
    }
}

impl std::error::Error for PLAError {}

impl From<PLAError> for io::Error {
    fn from(err: PLAError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Failure of [`PLAReader`](super::PLAReader) entry points
#[derive(Debug)]
pub enum PLAReadError {
    /// The text is not a valid truth table
    PLA(PLAError),
    /// The parsed rows do not form a valid data set
    Data(MinimizeError),
    /// Reading the source failed
    Io(io::Error),
}

impl fmt::Display for PLAReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAReadError::PLA(e) => write!(f, "Malformed PLA: {}", e),
            PLAReadError::Data(e) => write!(f, "Invalid truth table: {}", e),
            PLAReadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PLAReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PLAReadError::PLA(e) => Some(e),
            PLAReadError::Data(e) => Some(e),
            PLAReadError::Io(e) => Some(e),
        }
    }
}

impl From<PLAError> for PLAReadError {
    fn from(err: PLAError) -> Self {
        PLAReadError::PLA(err)
    }
}

impl From<MinimizeError> for PLAReadError {
    fn from(err: MinimizeError) -> Self {
        PLAReadError::Data(err)
    }
}

impl From<io::Error> for PLAReadError {
    fn from(err: io::Error) -> Self {
        PLAReadError::Io(err)
    }
}

impl From<PLAReadError> for io::Error {
    fn from(err: PLAReadError) -> Self {
        match err {
            PLAReadError::Io(e) => e,
            PLAReadError::PLA(e) => e.into(),
            PLAReadError::Data(e) => e.into(),
        }
    }
}

/// Failure of [`PLAWriter`](super::PLAWriter) entry points
#[derive(Debug)]
pub enum PLAWriteError {
    /// Writing the destination failed
    Io(io::Error),
}

impl fmt::Display for PLAWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PLAWriteError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for PLAWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PLAWriteError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for PLAWriteError {
    fn from(err: io::Error) -> Self {
        PLAWriteError::Io(err)
    }
}

impl From<PLAWriteError> for io::Error {
    fn from(err: PLAWriteError) -> Self {
        match err {
            PLAWriteError::Io(e) => e,
        }
    }
}
