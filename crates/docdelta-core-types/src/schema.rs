//! Canonical schema constants for structured logging and events
//!
//! These constants keep field keys and event names consistent between the
//! logging macros, the CLI and the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Batch counters
pub const FIELD_FULL_ADDS: &str = "full_adds";
pub const FIELD_IN_PLACE_ADDS: &str = "in_place_adds";
pub const FIELD_SKIPPED: &str = "skipped";
pub const FIELD_DELETES: &str = "deletes";
pub const FIELD_SUPPRESSED_ADDS: &str = "suppressed_adds";
pub const FIELD_DOCUMENT_COUNT: &str = "document_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
