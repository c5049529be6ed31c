// src/core/index_db_ops.rs
//! Index database operations — public credential metadata
//!
//! Versions are append-only; deletes remove a whole credential with all
//! its versions. "Latest" is therefore always the row with the highest
//! rowid per name, and timestamps only need to break ties for readers.

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::core::Result;

/// One row of `credential_versions`, exactly as stored.
#[derive(Debug, Clone)]
pub struct VersionRow {
    pub uuid: String,
    pub credential_name: String,
    pub credential_type: String,
    pub value_uuid: String,
    pub params_uuid: Option<String>,
    pub checksum: String,
    pub version_created_at: String,
    pub username: Option<String>,
    pub salt: Option<String>,
    pub public_key: Option<String>,
    pub certificate: Option<String>,
    pub ca: Option<String>,
    pub ca_name: Option<String>,
    pub is_ca: bool,
    pub self_signed: bool,
    pub expiry_date: Option<String>,
}

const VERSION_COLUMNS: &str = "uuid, credential_name, credential_type, value_uuid, params_uuid, \
     checksum, version_created_at, username, salt, public_key, certificate, ca, ca_name, \
     is_ca, self_signed, expiry_date";

/// Insert the credential row if missing, then the version row, atomically.
pub fn insert_version(conn: &mut Connection, row: &VersionRow) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute(
        "INSERT OR IGNORE INTO credentials (name, uuid, created_at)
         VALUES (?1, ?2, datetime('now'))",
        params![row.credential_name, Uuid::new_v4().to_string()],
    )?;
    tx.execute(
        &format!(
            "INSERT INTO credential_versions ({VERSION_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
        ),
        params![
            row.uuid,
            row.credential_name,
            row.credential_type,
            row.value_uuid,
            row.params_uuid,
            row.checksum,
            row.version_created_at,
            row.username,
            row.salt,
            row.public_key,
            row.certificate,
            row.ca,
            row.ca_name,
            row.is_ca,
            row.self_signed,
            row.expiry_date,
        ],
    )?;
    tx.commit()?;
    Ok(())
}

/// Versions of one credential, newest first.
pub fn find_versions_by_name(
    conn: &Connection,
    name: &str,
    limit: Option<usize>,
) -> Result<Vec<VersionRow>> {
    let mut sql = format!(
        "SELECT {VERSION_COLUMNS} FROM credential_versions
         WHERE credential_name = ?1
         ORDER BY version_created_at DESC, rowid DESC"
    );
    if let Some(n) = limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([name], row_to_version)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn find_latest_version(conn: &Connection, name: &str) -> Result<Option<VersionRow>> {
    Ok(find_versions_by_name(conn, name, Some(1))?.into_iter().next())
}

pub fn find_version_by_uuid(conn: &Connection, uuid: &str) -> Result<Option<VersionRow>> {
    let row = conn
        .query_row(
            &format!("SELECT {VERSION_COLUMNS} FROM credential_versions WHERE uuid = ?1"),
            [uuid],
            row_to_version,
        )
        .optional()?;
    Ok(row)
}

/// Names whose latest version was signed by the given CA, ascending.
pub fn find_names_signed_by(conn: &Connection, ca_name: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT v.credential_name FROM credential_versions v
         JOIN (SELECT credential_name, MAX(rowid) AS max_rowid
               FROM credential_versions GROUP BY credential_name) latest
           ON v.credential_name = latest.credential_name AND v.rowid = latest.max_rowid
         WHERE v.ca_name = ?1
         ORDER BY v.credential_name",
    )?;
    let rows = stmt.query_map([ca_name], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// (name, latest version_created_at) pairs, newest credential first.
pub fn credential_summaries(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT v.credential_name, v.version_created_at FROM credential_versions v
         JOIN (SELECT credential_name, MAX(rowid) AS max_rowid
               FROM credential_versions GROUP BY credential_name) latest
           ON v.credential_name = latest.credential_name AND v.rowid = latest.max_rowid
         ORDER BY v.version_created_at DESC, v.rowid DESC",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn all_credential_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM credentials ORDER BY name")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

/// Delete a credential with all versions. Returns the vault uuids the
/// versions referenced, or `None` when the name was never stored.
pub fn delete_credential(conn: &mut Connection, name: &str) -> Result<Option<Vec<String>>> {
    let tx = conn.transaction()?;

    let exists: i64 =
        tx.query_row("SELECT COUNT(*) FROM credentials WHERE name = ?1", [name], |row| {
            row.get(0)
        })?;
    if exists == 0 {
        return Ok(None);
    }

    let mut uuids = Vec::new();
    {
        let mut stmt = tx.prepare(
            "SELECT value_uuid, params_uuid FROM credential_versions WHERE credential_name = ?1",
        )?;
        let rows = stmt.query_map([name], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
        for row in rows {
            let (value_uuid, params_uuid) = row?;
            uuids.push(value_uuid);
            if let Some(params_uuid) = params_uuid {
                uuids.push(params_uuid);
            }
        }
    }

    tx.execute(
        "DELETE FROM credential_versions WHERE credential_name = ?1",
        [name],
    )?;
    tx.execute("DELETE FROM credentials WHERE name = ?1", [name])?;
    tx.commit()?;

    Ok(Some(uuids))
}

pub fn count_credentials(conn: &Connection) -> Result<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM credentials", [], |row| row.get(0))?;
    Ok(count as u64)
}

pub fn count_versions(conn: &Connection) -> Result<u64> {
    let count: i64 =
        conn.query_row("SELECT COUNT(*) FROM credential_versions", [], |row| row.get(0))?;
    Ok(count as u64)
}

fn row_to_version(row: &rusqlite::Row<'_>) -> rusqlite::Result<VersionRow> {
    Ok(VersionRow {
        uuid: row.get(0)?,
        credential_name: row.get(1)?,
        credential_type: row.get(2)?,
        value_uuid: row.get(3)?,
        params_uuid: row.get(4)?,
        checksum: row.get(5)?,
        version_created_at: row.get(6)?,
        username: row.get(7)?,
        salt: row.get(8)?,
        public_key: row.get(9)?,
        certificate: row.get(10)?,
        ca: row.get(11)?,
        ca_name: row.get(12)?,
        is_ca: row.get(13)?,
        self_signed: row.get(14)?,
        expiry_date: row.get(15)?,
    })
}
