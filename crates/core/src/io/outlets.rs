//! Outlet coordinate file parsing
//!
//! Plain text, one outlet per line: `row col label`, whitespace
//! separated, one-based. The label is read and discarded. EOF or the
//! first line that does not yield three integers terminates parsing.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Parse outlet locations from text. Returns raw one-based (row, col)
/// pairs; bounds checking against a grid happens at dispatch.
pub fn parse_outlets(text: &str) -> Vec<(i64, i64)> {
    let mut outlets = Vec::new();

    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let row = fields.next().and_then(|s| s.parse::<i64>().ok());
        let col = fields.next().and_then(|s| s.parse::<i64>().ok());
        let label = fields.next().and_then(|s| s.parse::<i64>().ok());

        match (row, col, label) {
            (Some(row), Some(col), Some(_)) => outlets.push((row, col)),
            _ => break,
        }
    }

    outlets
}

/// Read outlet locations from a file.
pub fn read_outlets<P: AsRef<Path>>(path: P) -> Result<Vec<(i64, i64)>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_outlets(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let outlets = parse_outlets("10 20 1\n30 40 2\n");
        assert_eq!(outlets, vec![(10, 20), (30, 40)]);
    }

    #[test]
    fn test_short_line_terminates() {
        let outlets = parse_outlets("10 20 1\n30 40\n50 60 3\n");
        assert_eq!(outlets, vec![(10, 20)]);
    }

    #[test]
    fn test_non_numeric_terminates() {
        let outlets = parse_outlets("10 20 1\nend of outlets\n");
        assert_eq!(outlets, vec![(10, 20)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_outlets("").is_empty());
    }

    #[test]
    fn test_label_ignored() {
        let outlets = parse_outlets("5 7 -42\n");
        assert_eq!(outlets, vec![(5, 7)]);
    }
}
