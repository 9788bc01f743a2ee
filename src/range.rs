//! Byte ranges and the capability of being located in a source buffer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Half-open byte interval `[start, end)` into a source buffer.
///
/// Construction never validates: an inverted or out-of-bounds range is
/// ordinary data here and is rejected, if at all, by whoever applies it.
/// Serializes as a two-element array, `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct TextRange {
    /// Starting byte offset (inclusive)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl TextRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width range marking an insertion point.
    pub const fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    /// Number of bytes covered; zero for inverted ranges.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the two half-open ranges share at least one byte.
    ///
    /// A zero-width range intersects only a range that strictly contains
    /// its point.
    pub fn intersects(&self, other: &TextRange) -> bool {
        if self.is_empty() {
            return other.start < self.start && self.start < other.end;
        }
        if other.is_empty() {
            return self.start < other.start && other.start < self.end;
        }
        self.start < other.end && other.start < self.end
    }

    pub fn as_std(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<(usize, usize)> for TextRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl From<[usize; 2]> for TextRange {
    fn from([start, end]: [usize; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<TextRange> for [usize; 2] {
    fn from(range: TextRange) -> Self {
        [range.start, range.end]
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Anything that sits at a known range of the source buffer.
///
/// Syntax nodes and lexical tokens both implement this; the fixer never
/// needs to know which one it was given.
pub trait Located {
    fn text_range(&self) -> TextRange;
}

impl Located for TextRange {
    fn text_range(&self) -> TextRange {
        *self
    }
}

impl Located for Range<usize> {
    fn text_range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn text_range(&self) -> TextRange {
        (**self).text_range()
    }
}

impl<T: Located + ?Sized> Located for Box<T> {
    fn text_range(&self) -> TextRange {
        (**self).text_range()
    }
}

impl Located for tree_sitter::Node<'_> {
    fn text_range(&self) -> TextRange {
        TextRange::new(self.start_byte(), self.end_byte())
    }
}
