use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use super::{errors::{FieldError, Result}, type_lib::{Field, NumericData}};

pub const DEFAULT_DELIMITER: char = ',';

/// Loads a 2D field from `path`.
///
/// `.json` files are read as a serialized `Array2<f64>`; anything else is
/// treated as comma separated rows of numbers.
pub fn load_field<P: AsRef<Path>>(path: P) -> Result<Field> {
    let path = path.as_ref();
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        load_json(path)
    } else {
        load_field_with_delimiter(path, DEFAULT_DELIMITER)
    }
}

pub fn load_field_with_delimiter<P: AsRef<Path>>(path: P, delimiter: char) -> Result<Field> {
    let path = path.as_ref();
    let file = read_to_string(path)?;
    let field = parse_delimited(&file, delimiter, path)?;
    debug!(path = %path.display(), shape = ?field.dim(), "loaded field");
    Ok(field)
}

fn load_json(path: &Path) -> Result<Field> {
    let file = read_to_string(path)?;
    let field: Array2<NumericData> = serde_json::from_str(&file)
        .map_err(|source| FieldError::Json { path: path.to_path_buf(), source })?;
    if field.is_empty() {
        return Err(FieldError::Empty { path: path.to_path_buf() });
    }
    debug!(path = %path.display(), shape = ?field.dim(), "loaded field");
    Ok(field)
}

fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| FieldError::Io { path: path.to_path_buf(), source })
}

fn parse_delimited(text: &str, delimiter: char, path: &Path) -> Result<Field> {
    let mut values: Vec<NumericData> = Vec::new();
    let mut n_cols = 0;
    let mut n_rows = 0;

    for (line_index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = line_index + 1;
        let start = values.len();
        for (column, token) in line.split(delimiter).enumerate() {
            let token = token.trim();
            let value = token.parse::<NumericData>().map_err(|_| FieldError::Parse {
                path: path.to_path_buf(),
                line: line_number,
                column: column + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
        let found = values.len() - start;
        if n_rows == 0 {
            n_cols = found;
        } else if found != n_cols {
            return Err(FieldError::Ragged { path: path.to_path_buf(), line: line_number, expected: n_cols, found });
        }
        n_rows += 1;
    }

    if n_rows == 0 {
        return Err(FieldError::Empty { path: path.to_path_buf() });
    }
    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|_| FieldError::Ragged { path: path.to_path_buf(), line: n_rows, expected: n_cols, found: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn shape_matches_source_file() {
        let file = write_temp("1.0,2.0,3.0\n4.0,5.0,6.0\n");
        let field = load_field(file.path()).unwrap();
        assert_eq!(field.dim(), (2, 3));
        assert_eq!(field[[1, 2]], 6.0);
    }

    #[test]
    fn solver_output_without_trailing_newline() {
        let file = write_temp("0.000000,1.000000\n-1.000000,0.500000");
        let field = load_field(file.path()).unwrap();
        assert_eq!(field.dim(), (2, 2));
        assert_eq!(field[[1, 0]], -1.0);
    }

    #[test]
    fn tolerates_whitespace_around_tokens() {
        let file = write_temp(" 1, 2 \n3 ,4\n\n");
        let field = load_field(file.path()).unwrap();
        assert_eq!(field, ndarray::array![[1.0, 2.0], [3.0, 4.0]]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_field(dir.path().join("output.csv")).unwrap_err();
        assert!(matches!(err, FieldError::Io { .. }));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let file = write_temp("1,2,3\n4,5\n");
        match load_field(file.path()).unwrap_err() {
            FieldError::Ragged { line, expected, found, .. } => {
                assert_eq!((line, expected, found), (2, 3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_token_is_reported() {
        let file = write_temp("1,2\n3,abc\n");
        match load_field(file.path()).unwrap_err() {
            FieldError::Parse { line, column, token, .. } => {
                assert_eq!((line, column, token.as_str()), (2, 2, "abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_file_is_rejected() {
        let file = write_temp("\n\n");
        assert!(matches!(load_field(file.path()).unwrap_err(), FieldError::Empty { .. }));
    }

    #[test]
    fn custom_delimiter() {
        let file = write_temp("1;2\n3;4\n");
        let field = load_field_with_delimiter(file.path(), ';').unwrap();
        assert_eq!(field.dim(), (2, 2));
    }

    #[test]
    fn json_array_input() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        let field = ndarray::array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]];
        file.write_all(serde_json::to_string(&field).unwrap().as_bytes()).unwrap();
        assert_eq!(load_field(file.path()).unwrap(), field);
    }
}
