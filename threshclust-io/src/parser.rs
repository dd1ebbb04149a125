//! Parser for parenthesized point lists.
//!
//! Accepts text such as
//!
//! ```text
//! (20,3,19), (7,18,4), (-5,-5,2),
//! (15, 19, 20)
//! ```
//!
//! Whitespace (including newlines) is insignificant. Tuples may be separated
//! by commas, semicolons or whitespace. Every tuple must have the dimension of
//! the first one.

use std::fs;
use std::path::Path;

use threshclust_core::{Error as CoreError, PointSet};

use crate::{Error, Result};

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == ';'
}

fn parse_error(position: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        position,
        message: message.into(),
    }
}

/// Parses one tuple body (the text between the parentheses).
///
/// `base` is the byte offset of `body` within the full input.
fn parse_tuple(body: &str, base: usize) -> Result<Vec<f64>> {
    let mut row = Vec::new();
    let mut field_start = 0;
    for field in body.split(',') {
        let position = base + field_start;
        field_start += field.len() + 1;

        let value = field.trim();
        if value.is_empty() {
            return Err(parse_error(position, "empty coordinate"));
        }
        let parsed = value
            .parse::<f64>()
            .map_err(|_| parse_error(position, format!("invalid number `{value}`")))?;
        row.push(parsed);
    }
    Ok(row)
}

/// Parses a point list into a [`PointSet`].
///
/// # Errors
/// Returns [`Error::Parse`] for malformed text and a core error for an empty
/// list, mismatched dimensions or non-finite values.
pub fn parse_points(text: &str) -> Result<PointSet> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut cursor = 0;

    loop {
        let rest = &text[cursor..];
        let Some(skip) = rest.find(|c: char| !is_separator(c)) else {
            break;
        };
        cursor += skip;
        let rest = &text[cursor..];

        if !rest.starts_with('(') {
            return Err(parse_error(cursor, "expected '('"));
        }
        let close = rest
            .find(')')
            .ok_or_else(|| parse_error(cursor, "unclosed '('"))?;
        let body = &rest[1..close];
        if let Some(nested) = body.find('(') {
            return Err(parse_error(cursor + 1 + nested, "unexpected '('"));
        }

        rows.push(parse_tuple(body, cursor + 1)?);
        cursor += close + 1;
    }

    if rows.is_empty() {
        return Err(CoreError::EmptyPointSet.into());
    }
    log::debug!("parsed {} points of dimension {}", rows.len(), rows[0].len());
    Ok(PointSet::from_rows(&rows)?)
}

/// Reads a point list from a file.
///
/// # Errors
/// Returns an I/O error if the file cannot be read, otherwise the errors of
/// [`parse_points`].
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    let text = fs::read_to_string(path)?;
    parse_points(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiline() {
        let text = "(20,3,19), (7,18,4), (-5,-5,2), \n        (15,19,20), (6, 15,3)";
        let points = parse_points(text).unwrap();
        assert_eq!(points.len(), 5);
        assert_eq!(points.dim(), 3);
        assert_eq!(points.point(4), &[6.0, 15.0, 3.0]);
    }

    #[test]
    fn test_read_points_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(1,2,3),").unwrap();
        writeln!(file, "(4,5,6)").unwrap();

        let points = read_points(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert!(matches!(
            read_points(file.path().with_extension("missing")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_parse_separators_and_floats() {
        let points = parse_points("(0.5, -1e2);(3,4)\n(1.25,0)").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points.point(0), &[0.5, -100.0]);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "   \n ", ", ;"] {
            assert!(matches!(
                parse_points(text),
                Err(Error::CoreError(CoreError::EmptyPointSet))
            ));
        }
    }

    #[test]
    fn test_invalid_number_position() {
        let err = parse_points("(1,2), (3,x)").unwrap_err();
        match err {
            Error::Parse { position, message } => {
                assert_eq!(position, 10);
                assert!(message.contains("`x`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            parse_points("(1,2"),
            Err(Error::Parse { position: 0, .. })
        ));
        assert!(matches!(
            parse_points("1,2"),
            Err(Error::Parse { position: 0, .. })
        ));
        assert!(matches!(
            parse_points("((1,2)"),
            Err(Error::Parse { position: 1, .. })
        ));
        assert!(matches!(
            parse_points("(1,,2)"),
            Err(Error::Parse { position: 3, .. })
        ));
        assert!(matches!(
            parse_points("(1,2) )"),
            Err(Error::Parse { position: 6, .. })
        ));
    }

    #[test]
    fn test_dimension_mismatch() {
        assert!(matches!(
            parse_points("(1,2,3), (4,5)"),
            Err(Error::CoreError(CoreError::DimensionMismatch { index: 1, .. }))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            parse_points("(1, NaN)"),
            Err(Error::CoreError(CoreError::NonFiniteCoordinate { .. }))
        ));
    }
}
