//! Rule Fixer: declarative fix descriptors for lint rules
//!
//! A lint rule that wants to change code does not edit text itself. It
//! asks a [`RuleFixer`] for a [`Fix`]: a byte range of the source plus the
//! text that should replace it. Fixes are inert data; a [`FixApplier`]
//! later sorts them, rejects malformed or overlapping ones and splices the
//! rest into the source.
//!
//! # Architecture
//!
//! - [`fixer`]: the ten fix-building operations (insert before/after,
//!   replace, remove, keep; each by element or by range). Total functions,
//!   no validation.
//! - [`merge`]: fold the fixes of one report into a single fix.
//! - [`apply`]: validation and splicing, with a configurable conflict policy.
//! - [`syntax`]: tree-sitter nodes and tokens as located elements.
//!
//! # Example
//!
//! ```
//! use rule_fixer::{Fix, FixApplier, RuleFixer, SpliceApplier, TextRange};
//!
//! let source = "const a = 1;";
//! let fixer = RuleFixer::new(source);
//!
//! let fix = fixer.replace_text_range((6, 7), "b");
//! assert_eq!(fix, Fix::new(TextRange::new(6, 7), "b"));
//!
//! let outcome = SpliceApplier::default().apply(source, &[fix]).unwrap();
//! assert_eq!(outcome.output, "const b = 1;");
//! ```

pub mod apply;
pub mod config;
pub mod fix;
pub mod fixer;
pub mod merge;
pub mod range;
pub mod source;
pub mod syntax;
pub mod write;

// Re-exports
pub use apply::{
    ApplyError, ApplyOptions, ConflictPolicy, FixApplier, FixOutcome, SkipReason, SkippedFix,
    SpliceApplier,
};
pub use config::{
    load_from_path, load_from_str, ConfigError, FixerConfig, OutputConfig, ValidationError,
    ValidationIssue,
};
pub use fix::Fix;
pub use fixer::RuleFixer;
pub use merge::{merge_fixes, MergeError};
pub use range::{Located, TextRange};
pub use source::{slice_text, SourceBuffer};
pub use syntax::{ParsedSource, RustParser, Token, TreeSitterError};
pub use write::{atomic_write, WriteError};
