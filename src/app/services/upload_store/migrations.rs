//! `user_version`-gated schema migrations for the upload store

use rusqlite::{Connection, Transaction};

use crate::{Error, Result};

const CURRENT_SCHEMA_VERSION: i32 = 1;

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let mut version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version > CURRENT_SCHEMA_VERSION {
        return Err(Error::database(
            format!(
                "database version ({}) is newer than supported schema ({})",
                version, CURRENT_SCHEMA_VERSION
            ),
            None,
        ));
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        apply_migration(&tx, next_version)?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(())
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> Result<()> {
    match version {
        1 => {
            tx.execute_batch(include_str!("schema_v1.sql"))?;
            Ok(())
        }
        _ => Err(Error::database(
            format!("unknown migration target version: {}", version),
            None,
        )),
    }
}
