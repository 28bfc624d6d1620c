//! Input opening

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use docdelta_core::errors::{DocDeltaError, Result};

/// Path that selects standard input
pub const STDIN_PATH: &str = "-";

/// Read the whole input named by `path`, or stdin when it is `-`.
///
/// The content is buffered in memory and the file closed before returning.
///
/// # Errors
///
/// `Io` if the file cannot be read.
pub fn open_input(path: &str) -> Result<Box<dyn Read>> {
    if path == STDIN_PATH {
        return Ok(Box::new(io::stdin()));
    }

    let content = fs::read(Path::new(path)).map_err(|e| DocDeltaError::Io {
        operation: "open_input".to_string(),
        message: format!("{}: {}", path, e),
    })?;
    Ok(Box::new(io::Cursor::new(content)))
}
