/// How cells are turned into field values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    infer_types: bool,
}

impl ParseOptions {
    /// Every cell stays a string
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse integer-looking cells as integers and float-looking cells as floats
    pub fn with_infer_types(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    pub fn infer_types(&self) -> bool {
        self.infer_types
    }
}
