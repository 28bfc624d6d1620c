//! Document producer for docdelta
//!
//! Turns tabular input into [`Document`](docdelta_core::Document)s:
//! - [`tabular`]: CSV rows with one id column, every other column a field
//! - [`input`]: opening a file path or stdin (`-`)

#![allow(clippy::result_large_err)]

pub mod tabular;
pub mod input;
pub mod options;

pub use tabular::{parse_csv, parse_csv_str};
pub use input::open_input;
pub use options::ParseOptions;
