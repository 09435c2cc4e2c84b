//! Structured error types for gridcanvas.
//!
//! Interaction policy (clamping, ignoring out-of-range data, empty undo) never
//! produces an error; these variants cover host failures and explicit misuse.

/// All errors that can occur while wiring, loading or mutating a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A drawing surface could not provide a 2D context.
    #[error("Surface unavailable: {0}")]
    Surface(String),

    /// DOM access failed (missing window, document or element).
    #[error("DOM error: {0}")]
    Dom(String),

    /// Record data could not be decoded.
    #[error("Invalid data: {0}")]
    Data(#[from] serde_json::Error),

    /// A row/column index outside the grid was passed to an explicit mutator.
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    Index {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn index_error_names_the_cell_and_bounds() {
        let err = GridError::Index {
            row: 12,
            col: 3,
            rows: 10,
            cols: 5,
        };
        assert_eq!(err.to_string(), "Cell (12, 3) is outside the 10x5 grid");
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("[1,");
        let err: GridError = parse.unwrap_err().into();
        assert!(matches!(err, GridError::Data(_)));
        assert!(err.to_string().starts_with("Invalid data:"));
    }
}
