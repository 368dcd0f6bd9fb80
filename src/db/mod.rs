mod schema;

use anyhow::Context;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result, ValidationError};
use crate::models::{amount_in_range, Transaction, TransactionDraft};

const SELECT_COLUMNS: &str = "SELECT id, category, amount, date, description FROM transactions";

/// Owns the single SQLite connection for the lifetime of the process.
///
/// Open it once at startup and hand it back to [`Database::close`] on
/// shutdown. Dropping it also releases the connection, but without reporting
/// close errors.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> anyhow::Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        conn.execute_batch(schema::SCHEMA)
            .context("Failed to create transactions table")?;
        tracing::info!("Opened database at {}", path.display());
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::SCHEMA)?;
        Ok(Self { conn })
    }

    pub(crate) fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Storage(e))?;
        tracing::info!("Closed database");
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    pub(crate) fn insert_transaction(&self, draft: &TransactionDraft) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions (category, amount, date, description)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.category,
                draft.amount.to_string(),
                draft.date,
                draft.description,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, category = %draft.category, "inserted transaction");
        Ok(with_id(id, draft))
    }

    /// Overwrite every field of the transaction with the given ID.
    pub(crate) fn update_transaction(
        &self,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        let changed = self.conn.execute(
            "UPDATE transactions SET category = ?1, amount = ?2, date = ?3, description = ?4
             WHERE id = ?5",
            params![
                draft.category,
                draft.amount.to_string(),
                draft.date,
                draft.description,
                id,
            ],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        tracing::debug!(id, "updated transaction");
        Ok(with_id(id, draft))
    }

    /// Overwrite category, amount and date, leaving the stored description
    /// as it is. Used where descriptions are hidden from the user.
    pub(crate) fn update_transaction_keep_description(
        &self,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<Transaction> {
        let changed = self.conn.execute(
            "UPDATE transactions SET category = ?1, amount = ?2, date = ?3 WHERE id = ?4",
            params![draft.category, draft.amount.to_string(), draft.date, id],
        )?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        tracing::debug!(id, "updated transaction, description kept");
        self.get_transaction(id)?.ok_or(Error::NotFound(id))
    }

    pub(crate) fn delete_transaction(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        tracing::debug!(id, "deleted transaction");
        Ok(())
    }

    /// All transactions in insertion order.
    pub(crate) fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt.query_map([], transaction_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let result = self.conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id],
            transaction_from_row,
        );
        match result {
            Ok(t) => Ok(Some(t)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn get_transaction_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}

fn with_id(id: i64, draft: &TransactionDraft) -> Transaction {
    Transaction {
        id,
        category: draft.category.clone(),
        amount: draft.amount,
        date: draft.date.clone(),
        description: draft.description.clone(),
    }
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_str: String = row.get(2)?;
    let amount = Decimal::from_str(&amount_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    if !amount_in_range(amount) {
        return Err(rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(ValidationError::InvalidAmount(amount_str)),
        ));
    }
    Ok(Transaction {
        id: row.get(0)?,
        category: row.get(1)?,
        amount,
        date: row.get(3)?,
        description: row.get(4)?,
    })
}
