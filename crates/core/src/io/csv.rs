//! Result CSV writing
//!
//! Header `row,column`, then one one-based `row,col` line per source cell
//! in input order.

use crate::error::Result;
use crate::flow::CellLocation;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write source cells to a CSV file.
pub fn write_sources<P: AsRef<Path>>(path: P, sources: &[CellLocation]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "row,column")?;
    for source in sources {
        let (row, col) = source.one_based();
        writeln!(writer, "{},{}", row, col)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_write_sources() {
        let path = std::env::temp_dir().join("flowpath_csv_test.csv");
        let sources = vec![CellLocation::new(0, 0), CellLocation::new(4, 9)];

        write_sources(&path, &sources).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(text, "row,column\n1,1\n5,10\n");
    }

    #[test]
    fn test_write_empty() {
        let path = std::env::temp_dir().join("flowpath_csv_empty_test.csv");
        write_sources(&path, &[]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(text, "row,column\n");
    }
}
