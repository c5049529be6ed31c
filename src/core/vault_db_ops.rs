// src/core/vault_db_ops.rs
//! Vault database operations — ciphertext rows only
//!
//! The vault knows nothing about credentials. It stores encrypted values
//! keyed by uuid, each tagged with the encryption key that produced it,
//! which is all rotation needs to find work.

use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::core::encryptor::EncryptedValue;
use crate::core::Result;

pub fn insert_encrypted_value(conn: &Connection, value: &EncryptedValue) -> Result<()> {
    conn.execute(
        "INSERT INTO encrypted_values (uuid, key_uuid, ciphertext, nonce, created_at)
         VALUES (?1, ?2, ?3, ?4, datetime('now'))",
        params![value.uuid, value.key_uuid, value.ciphertext, value.nonce],
    )?;
    Ok(())
}

pub fn find_encrypted_value(conn: &Connection, uuid: &str) -> Result<Option<EncryptedValue>> {
    let value = conn
        .query_row(
            "SELECT uuid, key_uuid, ciphertext, nonce FROM encrypted_values WHERE uuid = ?1",
            [uuid],
            row_to_encrypted_value,
        )
        .optional()?;
    Ok(value)
}

/// Rows encrypted under any of the given keys, oldest first so repeated
/// batches make monotonic progress.
pub fn find_encrypted_by_keys(
    conn: &Connection,
    key_uuids: &[String],
    limit: usize,
) -> Result<Vec<EncryptedValue>> {
    if key_uuids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; key_uuids.len()].join(", ");
    let sql = format!(
        "SELECT uuid, key_uuid, ciphertext, nonce FROM encrypted_values
         WHERE key_uuid IN ({placeholders}) ORDER BY rowid LIMIT {limit}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(key_uuids.iter()), row_to_encrypted_value)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn count_encrypted_by_keys(conn: &Connection, key_uuids: &[String]) -> Result<u64> {
    if key_uuids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; key_uuids.len()].join(", ");
    let sql = format!("SELECT COUNT(*) FROM encrypted_values WHERE key_uuid IN ({placeholders})");
    let count: i64 = conn.query_row(&sql, params_from_iter(key_uuids.iter()), |row| row.get(0))?;
    Ok(count as u64)
}

pub fn count_encrypted_values(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM encrypted_values", [], |row| row.get(0))?;
    Ok(count as u64)
}

/// Re-key a row in place: same uuid, new ciphertext under the new key.
pub fn replace_ciphertext(conn: &Connection, uuid: &str, value: &EncryptedValue) -> Result<()> {
    conn.execute(
        "UPDATE encrypted_values
         SET key_uuid = ?2, ciphertext = ?3, nonce = ?4, updated_at = datetime('now')
         WHERE uuid = ?1",
        params![uuid, value.key_uuid, value.ciphertext, value.nonce],
    )?;
    Ok(())
}

pub fn delete_encrypted_values(conn: &Connection, uuids: &[String]) -> Result<usize> {
    if uuids.is_empty() {
        return Ok(0);
    }
    let placeholders = vec!["?"; uuids.len()].join(", ");
    let sql = format!("DELETE FROM encrypted_values WHERE uuid IN ({placeholders})");
    let deleted = conn.execute(&sql, params_from_iter(uuids.iter()))?;
    Ok(deleted)
}

fn row_to_encrypted_value(row: &rusqlite::Row<'_>) -> rusqlite::Result<EncryptedValue> {
    Ok(EncryptedValue {
        uuid: row.get(0)?,
        key_uuid: row.get(1)?,
        ciphertext: row.get(2)?,
        nonce: row.get(3)?,
    })
}
