//! Writing tables back to delimited text.

use std::fs::{self, File};
use std::path::Path;

use tracing::info;

use crate::error::{CarecheckError, Result};
use crate::input::DataTable;

/// Write a table as UTF-8 CSV. The missing marker is written as an empty field.
pub fn write_table(table: &DataTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;

    let file = File::create(path).map_err(|e| CarecheckError::io(path, e))?;
    write_to(table, file)?;

    info!(path = %path.display(), rows = table.row_count(), "wrote table");
    Ok(())
}

/// Write a table as CSV to any writer.
pub fn write_to<W: std::io::Write>(table: &DataTable, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer
        .flush()
        .map_err(|e| CarecheckError::Csv(csv::Error::from(e)))?;
    Ok(())
}

/// Write a text artifact, creating parent directories as needed.
pub fn write_text(contents: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| CarecheckError::io(path, e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| CarecheckError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_written_alike() {
        let table = DataTable::from_literals(
            &["provider_id", "zip_code"],
            &[vec![Some("010001"), None], vec![Some("010005"), Some("")]],
        );
        let mut buf = Vec::new();
        write_to(&table, &mut buf).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "provider_id,zip_code\n010001,\n010005,\n"
        );
    }
}
