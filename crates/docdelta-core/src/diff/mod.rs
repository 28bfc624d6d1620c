//! Document diff engine.
//!
//! Decides, for one pair of old/new documents, whether anything needs to be
//! sent and whether it can be sent as a partial update.
//!
//! ## Guarantees
//!
//! - Only fields admitted by the allow-list are ever compared.
//! - Values compare by type and value; there is no numeric/text coercion.
//! - A field removed between old and new always forces a full rewrite.

pub mod engine;
pub mod model;

pub use engine::{can_in_place_update, changed_fields, classify, field_changes, has_updates};
pub use model::{DocumentAction, FieldChange};
