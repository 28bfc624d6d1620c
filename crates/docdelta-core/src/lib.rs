//! docdelta core - minimal update batches for a search index
//!
//! This crate turns an old and a new snapshot of documents into the smallest
//! update request body for the index:
//! - A lazy, comparator-driven two-way merge ([`merge`])
//! - Deterministically ordered keyed collections ([`ordered`])
//! - Per-document diffing that picks full rewrite vs partial update ([`diff`])
//! - Hand-rolled JSON encoding of the update grammar ([`encode`])
//! - The batch builder tying them together ([`builder`])
//!
//! ```
//! use docdelta_core::{BatchBuilder, BatchConfig, Document};
//!
//! let mut builder = BatchBuilder::new(BatchConfig::new().with_in_place_fields(["int1"]));
//! builder.update(
//!     Document::new("1").with_field("int1", 10).with_field("str1", "x"),
//!     Document::new("1").with_field("int1", 5).with_field("str1", "x"),
//! );
//! assert_eq!(builder.build().unwrap(), r#"{"add":{"doc":{"id":"1","int1":{"set":10}}}}"#);
//! ```

pub mod builder;
pub mod config;
pub mod diff;
pub mod encode;
pub mod errors;
pub mod logging_facility;
pub mod merge;
pub mod model;
pub mod ordered;

pub use docdelta_core_types::schema;

// Re-export commonly used types
pub use builder::{BatchBuilder, BatchSummary};
pub use config::{BatchConfig, FieldAllowList};
pub use errors::{DocDeltaError, ExError, ExErrorKind, Result};
pub use merge::{merge_by, merge_by_key, MergeIter, Merged};
pub use model::{Document, Field};
pub use ordered::{merge_ordered, Keyed, OrderedSet};
