use crate::range::TextRange;
use crate::source::slice_text;
use serde::{Deserialize, Serialize};

/// The one output of the fixer: replace the bytes in `range` with `text`.
///
/// Plain data with no link back to the fixer or the buffer it came from.
/// An empty `text` over a non-empty range is a removal; any `text` over a
/// zero-width range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[must_use = "Fix does nothing until handed to an applier"]
pub struct Fix {
    pub range: TextRange,
    pub text: String,
}

impl Fix {
    pub fn new(range: impl Into<TextRange>, text: impl Into<String>) -> Self {
        Self {
            range: range.into(),
            text: text.into(),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty() && !self.text.is_empty()
    }

    pub fn is_removal(&self) -> bool {
        self.text.is_empty() && !self.range.is_empty()
    }

    /// Whether applying this fix to `source` would leave it unchanged.
    ///
    /// True for every `keep` fix, and for empty insertions.
    pub fn is_noop_for(&self, source: &str) -> bool {
        !self.range.is_inverted() && slice_text(source, self.range) == self.text
    }
}
