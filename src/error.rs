//! Parse errors and the partial-result outcome type.
//!
//! Path parsing never aborts destructively: whatever geometry was built
//! before the first error is still returned, paired with the error. The
//! parser result is therefore a [`ParseOutcome`] rather than a plain
//! `Result`: renderers draw what parsed and surface the diagnostic for the
//! rest.

use thiserror::Error;

use crate::path_spline::PathSpline;

/// The reason a path-data parse stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A character that is not a command letter where a command was expected.
    #[error("unexpected token '{0}' in path data")]
    UnexpectedToken(char),

    /// The first command in a path must be a move-to.
    #[error("unexpected command, first command must be 'm' or 'M'")]
    InvalidFirstCommand,

    /// Close-path does not repeat implicitly; an explicit command must follow.
    #[error("expected command")]
    ExpectedCommand,

    /// A comma is not allowed directly before a command letter.
    #[error("unexpected ',' before command")]
    CommaBeforeCommand,

    /// A comma is not allowed at the end of the path data.
    #[error("unexpected ',' at end of string")]
    TrailingComma,

    /// A numeric argument did not follow the SVG number grammar.
    #[error("failed to parse number")]
    MalformedNumber,

    /// An arc flag must be exactly '0' or '1'.
    #[error("unexpected character '{0}' when parsing flag, expected '0' or '1'")]
    InvalidFlag(char),

    /// Input ended while an argument token was expected.
    #[error("unexpected end of string")]
    UnexpectedEnd,
}

/// A parse error located at a byte offset into the path-data string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// The result of parsing path data: the spline built up to the first error
/// (possibly empty, possibly complete) plus the error itself, if any.
///
/// Both fields are meaningful at the same time; callers check each
/// independently.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Geometry constructed before parsing stopped.
    pub spline: PathSpline,
    /// The first error encountered, or `None` on a clean parse.
    pub error: Option<ParseError>,
}

impl ParseOutcome {
    /// A clean outcome with no error.
    pub fn ok(spline: PathSpline) -> Self {
        Self {
            spline,
            error: None,
        }
    }

    /// A partial outcome: the geometry built so far plus the error that
    /// stopped the parse.
    pub fn partial(spline: PathSpline, error: ParseError) -> Self {
        Self {
            spline,
            error: Some(error),
        }
    }

    /// Returns `true` if parsing completed without error.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
