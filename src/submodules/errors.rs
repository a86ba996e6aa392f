use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FieldError>;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: column {column}: `{token}` is not a number", path.display())]
    Parse { path: PathBuf, line: usize, column: usize, token: String },

    #[error("{}:{line}: expected {expected} values, found {found}", path.display())]
    Ragged { path: PathBuf, line: usize, expected: usize, found: usize },

    #[error("{} contains no data rows", path.display())]
    Empty { path: PathBuf },

    #[error("cannot decode {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("shape mismatch: field is {field:?} but x grid is {x_grid:?} and y grid is {y_grid:?}")]
    ShapeMismatch { field: (usize, usize), x_grid: (usize, usize), y_grid: (usize, usize) },

    #[error("contouring needs at least a 2x2 grid, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },

    #[error("field has no finite values")]
    NoFiniteValues,
}
