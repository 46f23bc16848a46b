use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use reef_sql::{CollectionRef, Projection, Statement, Value};
use tracing::{debug, info};

use crate::collection::Collection;
use crate::cursor::Cursor;
use crate::database::Database;
use crate::error::DbError;
use crate::record::Record;

#[derive(Default)]
pub struct EngineConfig {
    /// Where persisted state, if any, lives. Opaque to the engine core;
    /// the connection layer decides what goes there.
    pub root: Option<PathBuf>,
    /// Execution budget per row-processing statement. `None` means no limit.
    pub statement_timeout: Option<Duration>,
}

/// The database registry and statement entry point.
///
/// One engine owns all databases for a process; there is no hidden global.
/// `execute` is the only surface: statement text in, cursor out. Statements
/// against the same collection serialize on that collection's lock; reads
/// clone a snapshot under the read lock, so a produced cursor never observes
/// later mutation.
pub struct Engine {
    databases: RwLock<HashMap<String, Database>>,
    statement_timeout: Option<Duration>,
}

impl Engine {
    pub fn open(config: EngineConfig) -> Engine {
        info!(root = ?config.root, "opening engine");
        Engine {
            databases: RwLock::new(HashMap::new()),
            statement_timeout: config.statement_timeout,
        }
    }

    /// Parse and execute a single statement, returning a cursor over the
    /// matching or affected rows (empty for DDL).
    pub fn execute(&self, text: &str) -> Result<Cursor, DbError> {
        let started = Instant::now();
        let statement = reef_sql::parse(text)?;
        match statement {
            Statement::CreateDatabase { name } => self.create_database(&name),
            Statement::DropDatabase { name } => self.drop_database(&name),
            Statement::CreateTable { target, columns } => self.create_table(&target, columns),
            Statement::DropTable { target } => self.drop_table(&target),
            Statement::Insert {
                target,
                columns,
                rows,
            } => self.insert(&target, &columns, rows, started),
            Statement::Select {
                target,
                projection,
                predicate,
                order,
            } => self.select(&target, &projection, predicate.as_ref(), order.as_ref(), started),
            Statement::Update {
                target,
                assignments,
                predicate,
            } => self.update(&target, &assignments, predicate.as_ref(), started),
            Statement::Delete { target, predicate } => {
                self.delete(&target, predicate.as_ref(), started)
            }
        }
    }

    // ── DDL ─────────────────────────────────────────────────────

    fn create_database(&self, name: &str) -> Result<Cursor, DbError> {
        let mut databases = self.databases.write().unwrap();
        databases
            .entry(name.to_string())
            .or_insert_with(|| Database::new(name));
        info!(database = name, "create database");
        Ok(Cursor::new(Vec::new()))
    }

    fn drop_database(&self, name: &str) -> Result<Cursor, DbError> {
        let mut databases = self.databases.write().unwrap();
        databases
            .remove(name)
            .ok_or_else(|| DbError::DatabaseNotFound(name.to_string()))?;
        info!(database = name, "drop database");
        Ok(Cursor::new(Vec::new()))
    }

    fn create_table(&self, target: &CollectionRef, columns: Vec<String>) -> Result<Cursor, DbError> {
        let mut databases = self.databases.write().unwrap();
        let database = databases
            .get_mut(&target.database)
            .ok_or_else(|| DbError::DatabaseNotFound(target.database.clone()))?;
        database.create_collection(&target.collection, columns);
        info!(target = %target, "create table");
        Ok(Cursor::new(Vec::new()))
    }

    fn drop_table(&self, target: &CollectionRef) -> Result<Cursor, DbError> {
        let mut databases = self.databases.write().unwrap();
        let database = databases
            .get_mut(&target.database)
            .ok_or_else(|| DbError::DatabaseNotFound(target.database.clone()))?;
        database.drop_collection(&target.collection)?;
        info!(target = %target, "drop table");
        Ok(Cursor::new(Vec::new()))
    }

    // ── DML ─────────────────────────────────────────────────────

    fn insert(
        &self,
        target: &CollectionRef,
        columns: &[String],
        rows: Vec<Vec<Value>>,
        started: Instant,
    ) -> Result<Cursor, DbError> {
        // Rows with the wrong arity are rejected row-locally; the rest of
        // the batch proceeds.
        let total = rows.len();
        let records: Vec<Record> = rows
            .into_iter()
            .filter(|row| row.len() == columns.len())
            .map(|row| Record::from_pairs(columns.iter().cloned().zip(row)))
            .collect();

        let collection = self.collection(target)?;
        let mut collection = collection.write().unwrap();
        self.check_deadline(started)?;
        let outcome = collection.insert(records);
        debug!(
            target = %target,
            inserted = outcome.inserted.len(),
            skipped = total - outcome.inserted.len(),
            "insert"
        );
        Ok(Cursor::new(outcome.inserted))
    }

    fn select(
        &self,
        target: &CollectionRef,
        projection: &Projection,
        predicate: Option<&reef_sql::Expression>,
        order: Option<&reef_sql::Sort>,
        started: Instant,
    ) -> Result<Cursor, DbError> {
        let collection = self.collection(target)?;
        let collection = collection.read().unwrap();
        let rows = match projection {
            // COUNT(*) bypasses row materialization entirely
            Projection::Count => {
                let n = collection.count(predicate);
                vec![Record::from_pairs([(
                    "count".to_string(),
                    Value::Int64(n as i64),
                )])]
            }
            Projection::All => collection.select(predicate, order),
            Projection::Columns(columns) => collection
                .select(predicate, order)
                .into_iter()
                .map(|record| record.project(columns))
                .collect(),
        };
        self.check_deadline(started)?;
        debug!(target = %target, rows = rows.len(), "select");
        Ok(Cursor::new(rows))
    }

    fn update(
        &self,
        target: &CollectionRef,
        assignments: &[(String, Value)],
        predicate: Option<&reef_sql::Expression>,
        started: Instant,
    ) -> Result<Cursor, DbError> {
        let collection = self.collection(target)?;
        let mut collection = collection.write().unwrap();
        self.check_deadline(started)?;
        let updated = collection.update(predicate, assignments);
        debug!(target = %target, updated = updated.len(), "update");
        Ok(Cursor::new(updated))
    }

    fn delete(
        &self,
        target: &CollectionRef,
        predicate: Option<&reef_sql::Expression>,
        started: Instant,
    ) -> Result<Cursor, DbError> {
        let collection = self.collection(target)?;
        let mut collection = collection.write().unwrap();
        self.check_deadline(started)?;
        let removed = collection.delete(predicate);
        debug!(target = %target, removed = removed.len(), "delete");
        Ok(Cursor::new(removed))
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Resolve a collection handle under the registry read lock, then
    /// release it — statement execution only holds the collection's lock.
    fn collection(&self, target: &CollectionRef) -> Result<Arc<RwLock<Collection>>, DbError> {
        let databases = self.databases.read().unwrap();
        let database = databases
            .get(&target.database)
            .ok_or_else(|| DbError::DatabaseNotFound(target.database.clone()))?;
        database.collection(&target.collection)
    }

    /// Abort before any mutation becomes visible if the statement has
    /// outrun its budget.
    fn check_deadline(&self, started: Instant) -> Result<(), DbError> {
        match self.statement_timeout {
            Some(budget) if started.elapsed() >= budget => Err(DbError::Timeout),
            _ => Ok(()),
        }
    }
}
