use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};

use crate::models::Transaction;

const DEFAULT_EXPORT_FILE: &str = "fintrack-export.csv";
const HEADER: [&str; 5] = ["id", "date", "category", "amount", "description"];

/// Write transactions as CSV, returning the number of data rows written.
pub(crate) fn write_csv<W: io::Write>(transactions: &[Transaction], writer: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for txn in transactions {
        wtr.write_record([
            txn.id.to_string().as_str(),
            txn.date.as_str(),
            txn.category.as_str(),
            txn.amount.to_string().as_str(),
            txn.description.as_deref().unwrap_or(""),
        ])?;
    }
    wtr.flush()?;
    Ok(transactions.len())
}

pub(crate) fn export_to_path(transactions: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = write_csv(transactions, file)
        .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
    tracing::info!(count, "Exported transactions to {}", path.display());
    Ok(count)
}

/// `fintrack-export.csv` in the home directory, or the current directory
/// when there is no home.
pub(crate) fn default_export_path() -> PathBuf {
    directories::UserDirs::new()
        .map(|d| d.home_dir().join(DEFAULT_EXPORT_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE))
}

/// Expand a leading `~/` to the user's home directory.
pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return dirs.home_dir().join(rest).display().to_string();
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 1,
                category: "Food".into(),
                amount: dec!(-12.50),
                date: "2024-01-15".into(),
                description: Some("lunch, with team".into()),
            },
            Transaction {
                id: 2,
                category: "Salary".into(),
                amount: dec!(3000),
                date: "2024-01-31".into(),
                description: None,
            },
        ]
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        let count = write_csv(&sample(), &mut buf).unwrap();
        assert_eq!(count, 2);
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,date,category,amount,description");
        assert_eq!(lines[1], "1,2024-01-15,Food,-12.50,\"lunch, with team\"");
        assert_eq!(lines[2], "2,2024-01-31,Salary,3000,");
    }

    #[test]
    fn test_write_csv_empty() {
        let mut buf = Vec::new();
        assert_eq!(write_csv(&[], &mut buf).unwrap(), 0);
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        assert_eq!(export_to_path(&sample(), &path).unwrap(), 2);

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][4], "lunch, with team");
    }

    #[test]
    fn test_default_export_path_file_name() {
        let path = default_export_path();
        assert_eq!(path.file_name().unwrap(), "fintrack-export.csv");
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/x.csv"), "/tmp/x.csv");
        assert_eq!(expand_home("x.csv"), "x.csv");
    }
}
