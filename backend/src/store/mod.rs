//! # Document Store
//!
//! A small Firestore-style document database on top of SQLite. Every
//! document lives in one `documents` table keyed by `(collection, id)` with
//! its body stored as JSON; top-level fields are queried through SQLite's
//! `json_extract`.
//!
//! Ids are opaque UUID v4 strings and both timestamps are assigned here, so
//! callers never provide them. Multi-document writes go through
//! [`WriteBatch`], which is applied in one immediate transaction together
//! with its preconditions and count invariants.

mod batch;
mod error;

pub use batch::{Bound, Filter, FilterOp, WriteBatch};
pub use error::StoreError;

use batch::{Invariant, Precondition, Write};
use chrono::{DateTime, SecondsFormat, Utc};
use common::model::document::Document;
use log::{debug, warn};
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub mod collections {
    pub const ORGANIZATIONS: &str = "organizations";
    pub const USERS: &str = "users";
    pub const CAMERAS: &str = "cameras";
    pub const CONFIGURATIONS: &str = "configurations";
    pub const GROUPS: &str = "groups";
    pub const SERVERS: &str = "servers";
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    id          TEXT NOT NULL,
    data        TEXT NOT NULL,
    create_time TEXT NOT NULL,
    update_time TEXT NOT NULL,
    PRIMARY KEY (collection, id)
);
CREATE INDEX IF NOT EXISTS documents_by_created ON documents (collection, create_time);
";

pub struct DocumentStore {
    conn: Mutex<Connection>,
}

impl DocumentStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document<T>>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, data, create_time, update_time FROM documents
                 WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                RawDocument::from_row,
            )
            .optional()?;
        row.map(RawDocument::decode).transpose()
    }

    /// Like `get`, but a missing document is an error.
    pub fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Document<T>, StoreError> {
        self.get(collection, id)?
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    /// Documents matching every filter, oldest first.
    pub fn list<T: DeserializeOwned>(
        &self,
        collection: &str,
        filters: &[Filter],
    ) -> Result<Vec<Document<T>>, StoreError> {
        let conn = self.lock()?;
        let (clause, values) = where_clause(collection, filters);
        let sql = format!(
            "SELECT id, data, create_time, update_time FROM documents {clause}
             ORDER BY create_time, rowid"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values), RawDocument::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawDocument::decode).collect()
    }

    pub fn count(&self, collection: &str, filters: &[Filter]) -> Result<u64, StoreError> {
        let conn = self.lock()?;
        count_in(&conn, collection, filters)
    }

    /// Stores a new document under a generated id.
    pub fn add<T: Serialize>(&self, collection: &str, data: &T) -> Result<String, StoreError> {
        let id = Self::new_id();
        let mut batch = WriteBatch::new();
        batch.set(collection, &id, data)?;
        self.commit(batch)?;
        Ok(id)
    }

    /// Applies a batch atomically.
    pub fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        for precondition in &batch.preconditions {
            check_precondition(&tx, precondition)?;
        }

        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);
        for write in &batch.writes {
            apply_write(&tx, write, &now)?;
        }

        for invariant in &batch.invariants {
            check_invariant(&tx, invariant)?;
        }

        tx.commit()?;
        debug!(
            "Committed batch with {} writes, {} preconditions, {} invariants",
            batch.writes.len(),
            batch.preconditions.len(),
            batch.invariants.len()
        );
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

struct RawDocument {
    id: String,
    data: String,
    create_time: String,
    update_time: String,
}

impl RawDocument {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            data: row.get(1)?,
            create_time: row.get(2)?,
            update_time: row.get(3)?,
        })
    }

    fn decode<T: DeserializeOwned>(self) -> Result<Document<T>, StoreError> {
        Ok(Document {
            id: self.id,
            create_time: parse_time(&self.create_time)?,
            update_time: parse_time(&self.update_time)?,
            data: serde_json::from_str(&self.data)?,
        })
    }
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn where_clause(collection: &str, filters: &[Filter]) -> (String, Vec<SqlValue>) {
    let mut clause = String::from("WHERE collection = ?");
    let mut values = vec![SqlValue::Text(collection.to_string())];
    for filter in filters {
        let op = match filter.op {
            FilterOp::Eq => "IS",
            FilterOp::Ne => "IS NOT",
        };
        clause.push_str(&format!(" AND json_extract(data, ?) {op} ?"));
        values.push(SqlValue::Text(json_path(&filter.field)));
        values.push(to_sql(&filter.value));
    }
    (clause, values)
}

fn count_in(conn: &Connection, collection: &str, filters: &[Filter]) -> Result<u64, StoreError> {
    let (clause, values) = where_clause(collection, filters);
    let sql = format!("SELECT COUNT(*) FROM documents {clause}");
    let count: i64 = conn.query_row(&sql, params_from_iter(values), |row| row.get(0))?;
    Ok(u64::try_from(count).unwrap_or_default())
}

fn read_body(
    conn: &Connection,
    collection: &str,
    id: &str,
) -> Result<Option<Map<String, Value>>, StoreError> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT data FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
            |row| row.get(0),
        )
        .optional()?;
    match raw {
        None => Ok(None),
        Some(raw) => match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(StoreError::InvalidDocument(format!(
                "{collection}/{id} is not a JSON object"
            ))),
        },
    }
}

fn write_body(
    conn: &Connection,
    collection: &str,
    id: &str,
    body: &Map<String, Value>,
    now: &str,
) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO documents (collection, id, data, create_time, update_time)
         VALUES (?1, ?2, ?3, ?4, ?4)
         ON CONFLICT (collection, id)
         DO UPDATE SET data = excluded.data, update_time = excluded.update_time",
        params![collection, id, serde_json::to_string(body)?, now],
    )?;
    Ok(())
}

fn check_precondition(conn: &Connection, precondition: &Precondition) -> Result<(), StoreError> {
    match precondition {
        Precondition::Exists { collection, id } => {
            if read_body(conn, collection, id)?.is_none() {
                return Err(StoreError::PreconditionFailed(format!(
                    "{collection}/{id} does not exist"
                )));
            }
        }
        Precondition::FieldEquals {
            collection,
            id,
            field,
            value,
        } => {
            let body = read_body(conn, collection, id)?.ok_or_else(|| {
                StoreError::PreconditionFailed(format!("{collection}/{id} does not exist"))
            })?;
            let current = body.get(field).unwrap_or(&Value::Null);
            if current != value {
                warn!("Precondition on {collection}/{id}.{field} failed: expected {value}, found {current}");
                return Err(StoreError::PreconditionFailed(format!(
                    "{collection}/{id} was modified concurrently"
                )));
            }
        }
    }
    Ok(())
}

fn apply_write(conn: &Connection, write: &Write, now: &str) -> Result<(), StoreError> {
    match write {
        Write::Set {
            collection,
            id,
            data,
        } => {
            let body = data.as_object().cloned().unwrap_or_default();
            write_body(conn, collection, id, &body, now)
        }
        Write::Update {
            collection,
            id,
            fields,
        } => {
            let Value::Object(fields) = fields else {
                return Err(StoreError::InvalidDocument(format!(
                    "update of {collection}/{id} must be a JSON object"
                )));
            };
            let mut body = read_body(conn, collection, id)?
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            for (key, value) in fields {
                body.insert(key.clone(), value.clone());
            }
            write_body(conn, collection, id, &body, now)
        }
        Write::ArrayUnion {
            collection,
            id,
            field,
            value,
        } => {
            let mut body = read_body(conn, collection, id)?
                .ok_or_else(|| StoreError::not_found(collection, id))?;
            let entry = body
                .entry(field.clone())
                .or_insert_with(|| Value::Array(Vec::new()));
            if entry.is_null() {
                *entry = Value::Array(Vec::new());
            }
            let Value::Array(items) = entry else {
                return Err(StoreError::InvalidDocument(format!(
                    "{collection}/{id}.{field} is not an array"
                )));
            };
            if !items.contains(value) {
                items.push(value.clone());
            }
            write_body(conn, collection, id, &body, now)
        }
        Write::Delete { collection, id } => {
            conn.execute(
                "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
            )?;
            Ok(())
        }
    }
}

fn check_invariant(conn: &Connection, invariant: &Invariant) -> Result<(), StoreError> {
    let count = count_in(conn, &invariant.collection, &invariant.filters)?;
    if invariant.bound.holds(count) {
        return Ok(());
    }
    warn!(
        "Rejected batch: {} (count {} in {}, required {:?})",
        invariant.message, count, invariant.collection, invariant.bound
    );
    Err(StoreError::InvariantViolated(invariant.message.clone()))
}
