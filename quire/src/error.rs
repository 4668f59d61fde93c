// Copyright 2026 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for fallible composition operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the context needed to report it: the offending
/// position or range, the length of the text it applied to, and, for configuration errors,
/// the rejected value.
///
/// Overflow while measuring is never an error; it drives line breaking instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The start character index of the caller-provided position or range.
    start: usize,

    /// The end character index (exclusive) of the caller-provided range.
    end: usize,

    /// The length in characters of the text at the time of failure.
    len: usize,

    /// The rejected configuration value, for configuration errors.
    value: f64,

    /// A short description for [`ErrorKind::Unsupported`].
    what: &'static str,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start character index of the position or range provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end character index (exclusive) of the range provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in characters of the text at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The rejected configuration value, for [`ErrorKind::InvalidTabStop`] and
    /// [`ErrorKind::Unsupported`].
    pub fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn invalid_tab_stop(value: f64) -> Self {
        Self {
            kind: ErrorKind::InvalidTabStop,
            start: 0,
            end: 0,
            len: 0,
            value,
            what: "",
        }
    }

    pub(crate) fn invalid_bounds(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidBounds,
            start,
            end,
            len,
            value: 0.0,
            what: "",
        }
    }

    pub(crate) fn invalid_position(pos: usize, len: usize) -> Self {
        Self::invalid_bounds(pos, pos, len)
    }

    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            start,
            end,
            len,
            value: 0.0,
            what: "",
        }
    }

    pub(crate) fn unsupported(what: &'static str, value: f64) -> Self {
        Self {
            kind: ErrorKind::Unsupported,
            start: 0,
            end: 0,
            len: 0,
            value,
            what,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidTabStop => {
                write!(f, "tab stop length must be positive, got {}", self.value)
            }
            ErrorKind::InvalidBounds => {
                if self.start == self.end {
                    write!(f, "position {} out of bounds for len {}", self.start, self.len)
                } else {
                    write!(
                        f,
                        "range {}..{} out of bounds for len {}",
                        self.start, self.end, self.len
                    )
                }
            }
            ErrorKind::InvalidRange => {
                write!(f, "invalid range {}..{}: start > end", self.start, self.end)
            }
            ErrorKind::Unsupported => write!(f, "unsupported: {} ({})", self.what, self.value),
        }
    }
}

impl core::error::Error for Error {}

impl From<style_ranges::Error> for Error {
    fn from(err: style_ranges::Error) -> Self {
        match err.kind() {
            style_ranges::ErrorKind::InvalidRange => {
                Self::invalid_range(err.start(), err.end(), err.len())
            }
            _ => Self::invalid_bounds(err.start(), err.end(), err.len()),
        }
    }
}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The tab stop length was zero, negative or not finite.
    InvalidTabStop,

    /// A position or range reached past the end of the text.
    InvalidBounds,

    /// The provided range had `start > end`.
    InvalidRange,

    /// The requested combination of settings is not implemented.
    Unsupported,
}
