//! Core types shared across docdelta facilities
//!
//! - **Correlation types**: RequestId, carried on every logged batch run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
