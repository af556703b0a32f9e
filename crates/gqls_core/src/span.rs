//! Source span representation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span in shorthand source, represented as byte offsets plus the
/// zero-based line it starts on.
///
/// Offsets are stored as `u32`. Spans built with [`Span::from_offsets`]
/// saturate at `u32::MAX` for sources larger than 4 GiB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: u32,
    /// End byte offset (exclusive).
    pub end: u32,
    /// Zero-based line index.
    pub line: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    #[inline]
    pub const fn new(start: u32, end: u32, line: u32) -> Self {
        Self { start, end, line }
    }

    /// Creates a span from `usize` offsets, saturating each at `u32::MAX`.
    #[must_use]
    pub fn from_offsets(start: usize, end: usize, line: usize) -> Self {
        let clamp = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
        Self::new(clamp(start), clamp(end), clamp(line))
    }

    /// Returns the length of this span in bytes.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns true if this span is empty.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the one-based line number, as shown to users.
    #[must_use]
    #[inline]
    pub const fn line_number(&self) -> u32 {
        self.line.saturating_add(1)
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start as usize..span.end as usize
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(
            miette::SourceOffset::from(span.start as usize),
            span.len() as usize,
        )
    }
}
