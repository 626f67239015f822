//! SQLite-backed upload store and retention manager
//!
//! All Upload/Reading mutation flows through this module. A dedicated worker
//! thread owns the single SQLite connection and executes submitted closures
//! in order, bridged to async callers via oneshot channels. That single
//! writer makes a commit (insert upload + insert readings + retention trim)
//! one serialized transaction: an upload is never observable without its
//! readings, and two commits by the same owner cannot both escape the
//! retention cap.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, mpsc},
    thread::{self, JoinHandle},
};

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tokio::sync::oneshot;
use tracing::{error, info, warn};

mod migrations;

#[cfg(test)]
pub mod tests;

use crate::app::models::{CommitOutcome, RawReading, Reading, Requester, Upload, UploadSummary};
use crate::config::StoreConfig;
use crate::{Error, Result};
use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join store thread: {join_err:?}");
            }
        }
    }
}

/// Handle to the upload store; cheap to clone, safe to share across tasks
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    db_path: Arc<PathBuf>,
    retention_limit: usize,
}

impl Database {
    /// Open (creating if necessary) the store at the configured path and
    /// spawn its worker thread. Fails if migrations cannot be applied.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let db_path = config.database_path.clone();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::io(
                        format!("failed to create database directory {}", parent.display()),
                        e,
                    )
                })?;
            }
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("chemstats-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(Error::database(
                            "failed to open SQLite database",
                            Some(err),
                        )));
                        return;
                    }
                };

                if ready_tx.send(init_connection(&mut conn)).is_err() {
                    error!("Store initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Store thread shutting down");
            })
            .map_err(|e| Error::io("failed to spawn database worker thread", e))?;

        ready_rx.recv().map_err(|_| {
            Error::database("database worker exited before signaling readiness", None)
        })??;

        info!("Upload store initialized at {}", db_path.display());

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
            retention_limit: config.max_retained_uploads,
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Uploads retained per owner before trimming kicks in
    pub fn retention_limit(&self) -> usize {
        self.retention_limit
    }

    /// Run a closure on the store's connection, in submission order
    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Store caller dropped before receiving result");
            }
        }));

        sender.send(command).map_err(|_| {
            Error::database("failed to send command to store thread", None)
        })?;

        reply_rx
            .await
            .map_err(|_| Error::database("store thread terminated unexpectedly", None))?
    }
}

fn init_connection(conn: &mut Connection) -> Result<()> {
    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        warn!("Failed to enable WAL mode: {err}");
    }
    // cascade deletion of readings depends on this pragma
    conn.pragma_update(None, "foreign_keys", "ON")?;
    run_migrations(conn)
}

// =============================================================================
// Upload and Reading Operations
// =============================================================================

impl Database {
    /// Persist an upload and its readings as one atomic unit, then trim the
    /// owner's history to the retention limit inside the same transaction.
    /// Either everything becomes visible at once or nothing does.
    pub async fn commit_upload(
        &self,
        owner_id: &str,
        file_name: &str,
        readings: Vec<RawReading>,
    ) -> Result<CommitOutcome> {
        let owner = owner_id.to_string();
        let file = file_name.to_string();
        let limit = self.retention_limit;

        let outcome = self
            .execute(move |conn| {
                let uploaded_at = Utc::now();
                let tx = conn.transaction()?;

                tx.execute(
                    "INSERT INTO uploads (owner_id, file_name, rows_imported, uploaded_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        owner,
                        file,
                        readings.len() as i64,
                        uploaded_at.to_rfc3339(),
                    ],
                )?;
                let upload_id = tx.last_insert_rowid();

                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO readings
                             (upload_id, equipment_name, equipment_type, parameter_name, value, unit)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )?;
                    for reading in &readings {
                        stmt.execute(params![
                            upload_id,
                            reading.equipment_name,
                            reading.equipment_type,
                            reading.parameter_name,
                            reading.value,
                            reading.unit,
                        ])?;
                    }
                }

                // keep only the newest `limit` uploads for this owner;
                // readings cascade with their upload
                tx.execute(
                    "DELETE FROM uploads
                     WHERE owner_id = ?1
                       AND id NOT IN (
                           SELECT id FROM uploads
                           WHERE owner_id = ?1
                           ORDER BY uploaded_at DESC, id DESC
                           LIMIT ?2
                       )",
                    params![owner, limit as i64],
                )?;

                tx.commit()?;

                let mut equipment: IndexSet<&str> = IndexSet::new();
                let mut parameters: IndexSet<&str> = IndexSet::new();
                for reading in &readings {
                    equipment.insert(reading.equipment_name.as_str());
                    parameters.insert(reading.parameter_name.as_str());
                }

                Ok(CommitOutcome {
                    upload_id,
                    rows_imported: readings.len() as u64,
                    equipment_count: equipment.len(),
                    numeric_columns: parameters.iter().map(|s| s.to_string()).collect(),
                })
            })
            .await?;

        info!(
            "Committed upload {} ({} rows, {} equipment) for owner '{}'",
            outcome.upload_id, outcome.rows_imported, outcome.equipment_count, owner_id
        );

        Ok(outcome)
    }

    /// Delete one upload and (by cascade) all of its readings.
    ///
    /// Fails with [`Error::UploadNotFound`] when the id does not exist and
    /// with the generic [`Error::UploadAccess`] when the requester neither
    /// owns the upload nor holds the admin override.
    pub async fn delete_upload(&self, upload_id: i64, requester: &Requester) -> Result<()> {
        let requester = requester.clone();

        self.execute(move |conn| {
            let owner: Option<String> = conn
                .query_row(
                    "SELECT owner_id FROM uploads WHERE id = ?1",
                    params![upload_id],
                    |row| row.get(0),
                )
                .optional()?;

            match owner {
                None => Err(Error::upload_not_found(upload_id)),
                Some(owner) if !requester.can_access(&owner) => Err(Error::UploadAccess),
                Some(_) => {
                    conn.execute("DELETE FROM uploads WHERE id = ?1", params![upload_id])?;
                    info!("Deleted upload {}", upload_id);
                    Ok(())
                }
            }
        })
        .await
    }

    /// Fetch one upload by id, regardless of owner
    pub async fn upload(&self, upload_id: i64) -> Result<Option<Upload>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, file_name, rows_imported, uploaded_at
                 FROM uploads WHERE id = ?1",
            )?;
            let mut rows = stmt.query(params![upload_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_upload(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// The owner's most recently created upload, if any
    pub async fn latest_upload(&self, owner_id: &str) -> Result<Option<Upload>> {
        let owner = owner_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, file_name, rows_imported, uploaded_at
                 FROM uploads
                 WHERE owner_id = ?1
                 ORDER BY uploaded_at DESC, id DESC
                 LIMIT 1",
            )?;
            let mut rows = stmt.query(params![owner])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_upload(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// The owner's upload history, newest first, capped at the retention
    /// limit by construction
    pub async fn history(&self, owner_id: &str) -> Result<Vec<UploadSummary>> {
        let owner = owner_id.to_string();
        let limit = self.retention_limit;
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, owner_id, file_name, rows_imported, uploaded_at
                 FROM uploads
                 WHERE owner_id = ?1
                 ORDER BY uploaded_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let mut rows = stmt.query(params![owner, limit as i64])?;
            let mut history = Vec::new();
            while let Some(row) = rows.next()? {
                history.push(row_to_upload(row)?.summary());
            }
            Ok(history)
        })
        .await
    }

    /// All readings of one upload, in insertion (file) order
    pub async fn readings_for_upload(&self, upload_id: i64) -> Result<Vec<Reading>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, upload_id, equipment_name, equipment_type, parameter_name, value, unit
                 FROM readings
                 WHERE upload_id = ?1
                 ORDER BY id",
            )?;
            let mut rows = stmt.query(params![upload_id])?;
            let mut readings = Vec::new();
            while let Some(row) = rows.next()? {
                readings.push(row_to_reading(row)?);
            }
            Ok(readings)
        })
        .await
    }

    /// Total number of persisted readings across all uploads, any owner.
    /// Used by tests and diagnostics to check for orphans.
    pub async fn reading_count(&self) -> Result<u64> {
        self.execute(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
            Ok(count as u64)
        })
        .await
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

fn row_to_upload(row: &Row) -> Result<Upload> {
    let uploaded_at: String = row.get("uploaded_at")?;
    let rows_imported: i64 = row.get("rows_imported")?;

    Ok(Upload {
        id: row.get("id")?,
        owner_id: row.get("owner_id")?,
        file_name: row.get("file_name")?,
        rows_imported: rows_imported.max(0) as u64,
        uploaded_at: parse_datetime(&uploaded_at, "uploaded_at")?,
    })
}

fn row_to_reading(row: &Row) -> Result<Reading> {
    Ok(Reading {
        id: row.get("id")?,
        upload_id: row.get("upload_id")?,
        equipment_name: row.get("equipment_name")?,
        equipment_type: row.get("equipment_type")?,
        parameter_name: row.get("parameter_name")?,
        value: row.get("value")?,
        unit: row.get("unit")?,
    })
}

fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::datetime_parsing(format!("invalid {} '{}'", field, value), e))
}
