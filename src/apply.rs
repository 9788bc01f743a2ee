//! Applying a batch of fixes to a source string.
//!
//! [`FixApplier`] is where validation happens: bounds, ordering and
//! overlap are all checked here, never when a fix is built.

use crate::fix::Fix;
use crate::range::TextRange;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Inverted fix range {0}")]
    InvertedRange(TextRange),

    #[error("Fix range {range} out of bounds for source length {len}")]
    OutOfBounds { range: TextRange, len: usize },

    #[error("Fix range {0} does not fall on UTF-8 character boundaries")]
    NotCharBoundary(TextRange),

    #[error("Fix range {range} overlaps already accepted fix {accepted}")]
    Overlapping {
        range: TextRange,
        accepted: TextRange,
    },
}

/// What to do with a fix that is malformed or conflicts with another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Leave the fix out and report it in [`FixOutcome::skipped`].
    #[default]
    Skip,
    /// Abort the whole batch.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplyOptions {
    #[serde(default)]
    pub on_conflict: ConflictPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    InvertedRange,
    OutOfBounds { len: usize },
    NotCharBoundary,
    Overlapping { accepted: TextRange },
}

impl SkipReason {
    fn from_error(error: &ApplyError) -> Self {
        match error {
            ApplyError::InvertedRange(_) => SkipReason::InvertedRange,
            ApplyError::OutOfBounds { len, .. } => SkipReason::OutOfBounds { len: *len },
            ApplyError::NotCharBoundary(_) => SkipReason::NotCharBoundary,
            ApplyError::Overlapping { accepted, .. } => SkipReason::Overlapping {
                accepted: *accepted,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFix {
    pub fix: Fix,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of applying a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "FixOutcome carries the fixed text and any skipped fixes"]
pub struct FixOutcome {
    /// Source with every accepted fix spliced in
    pub output: String,
    /// Accepted fixes in application order
    pub applied: Vec<Fix>,
    /// Fixes left out, in the order they were considered
    pub skipped: Vec<SkippedFix>,
}

impl FixOutcome {
    /// Whether the output differs from `source`.
    pub fn is_fixed(&self, source: &str) -> bool {
        self.output != source
    }

    pub fn fixed_count(&self) -> usize {
        self.applied.len()
    }
}

/// Consumes fixes and produces edited text.
///
/// Implementations own all validation of fix ranges.
pub trait FixApplier {
    fn apply(&self, source: &str, fixes: &[Fix]) -> Result<FixOutcome, ApplyError>;
}

/// Sorts fixes by range and splices the non-conflicting ones into a copy
/// of the source.
///
/// A fix conflicts when it starts before the end of the previously
/// accepted fix. Insertions exactly at a previous end, or at the same
/// point as a previous insertion, do not conflict. `keep` fixes take part
/// like any other fix and leave their span unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpliceApplier {
    pub options: ApplyOptions,
}

impl SpliceApplier {
    pub fn new(options: ApplyOptions) -> Self {
        Self { options }
    }

    fn validate(source: &str, fix: &Fix) -> Result<(), ApplyError> {
        let range = fix.range;
        if range.is_inverted() {
            return Err(ApplyError::InvertedRange(range));
        }
        if range.end > source.len() {
            return Err(ApplyError::OutOfBounds {
                range,
                len: source.len(),
            });
        }
        if !source.is_char_boundary(range.start) || !source.is_char_boundary(range.end) {
            return Err(ApplyError::NotCharBoundary(range));
        }
        Ok(())
    }
}

impl FixApplier for SpliceApplier {
    fn apply(&self, source: &str, fixes: &[Fix]) -> Result<FixOutcome, ApplyError> {
        // Stable: fixes with equal ranges keep their input order
        let mut sorted: Vec<&Fix> = fixes.iter().collect();
        sorted.sort_by_key(|f| (f.range.start, f.range.end));

        let mut applied: Vec<Fix> = Vec::with_capacity(sorted.len());
        let mut skipped = Vec::new();
        let mut last_accepted: Option<TextRange> = None;

        for fix in sorted {
            // Sorted and pairwise disjoint, so the last accepted fix is the
            // only one a later fix can intersect
            let checked = Self::validate(source, fix).and_then(|()| match last_accepted {
                Some(accepted) if accepted.intersects(&fix.range) => {
                    Err(ApplyError::Overlapping {
                        range: fix.range,
                        accepted,
                    })
                }
                _ => Ok(()),
            });

            match checked {
                Ok(()) => {
                    tracing::debug!(range = %fix.range, bytes = fix.text.len(), "accepted fix");
                    last_accepted = Some(fix.range);
                    applied.push(fix.clone());
                }
                Err(error) => match self.options.on_conflict {
                    ConflictPolicy::Error => return Err(error),
                    ConflictPolicy::Skip => {
                        tracing::warn!(range = %fix.range, %error, "skipping fix");
                        skipped.push(SkippedFix {
                            fix: fix.clone(),
                            reason: SkipReason::from_error(&error),
                        });
                    }
                },
            }
        }

        let mut output = String::with_capacity(source.len());
        let mut cursor = 0;
        for fix in &applied {
            output.push_str(&source[cursor..fix.range.start]);
            output.push_str(&fix.text);
            cursor = fix.range.end;
        }
        output.push_str(&source[cursor..]);

        Ok(FixOutcome {
            output,
            applied,
            skipped,
        })
    }
}
