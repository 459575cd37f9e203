use super::schema::{initialize_table, table_name};
use crate::application::repositories::Repository;
use crate::domain::{DomainError, DomainResult, EntityId, Storable};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result as SqliteResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::{Mutex, MutexGuard};

/// SQLite-based implementation of the Repository trait.
///
/// Entities are stored as JSON documents, one table per entity kind.
pub struct SqliteRepository<T> {
    conn: Mutex<Connection>,
    table: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> SqliteRepository<T>
where
    T: Storable + Serialize + DeserializeOwned,
{
    /// Create a new SQLite repository with the given connection
    pub fn new(conn: Connection) -> SqliteResult<Self> {
        let table = table_name::<T>();
        initialize_table(&conn, &table)?;
        Ok(SqliteRepository {
            conn: Mutex::new(conn),
            table,
            _entity: PhantomData,
        })
    }

    /// Create a new in-memory SQLite repository (useful for testing)
    pub fn new_in_memory() -> SqliteResult<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Create a new file-based SQLite repository
    pub fn new_with_path(path: impl AsRef<std::path::Path>) -> SqliteResult<Self> {
        Self::new(Connection::open(path)?)
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire connection: {}", e)))
    }

    /// Insert or replace an item in a single transaction
    fn save_transaction(&self, conn: &mut Connection, mut item: T) -> SqliteResult<EntityId> {
        let tx = conn.transaction()?;

        let id = match item.id() {
            Some(id) => id,
            None => {
                // Reserve the row first so the body can carry its own id
                tx.execute(
                    &format!("INSERT INTO {} (body) VALUES ('{{}}')", self.table),
                    [],
                )?;
                let id = tx.last_insert_rowid();
                item.set_id(id);
                id
            }
        };

        tx.execute(
            &format!("INSERT OR REPLACE INTO {} (id, body) VALUES (?1, ?2)", self.table),
            params![id, encode(&item)?],
        )?;

        tx.commit()?;
        Ok(id)
    }

    fn load_all(&self, conn: &Connection) -> SqliteResult<Vec<T>> {
        let mut stmt = conn.prepare(&format!("SELECT id, body FROM {} ORDER BY id", self.table))?;

        let rows: Vec<(EntityId, Value)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<SqliteResult<Vec<_>>>()?;

        rows.into_iter().map(|(id, body)| decode(id, body)).collect()
    }
}

fn encode<T: Serialize>(item: &T) -> SqliteResult<Value> {
    serde_json::to_value(item).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn decode<T: Storable + DeserializeOwned>(id: EntityId, body: Value) -> SqliteResult<T> {
    let mut item: T = serde_json::from_value(body)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    item.set_id(id);
    Ok(item)
}

fn database_error(e: rusqlite::Error) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

impl<T> Repository<T> for SqliteRepository<T>
where
    T: Storable + Serialize + DeserializeOwned,
{
    fn add_or_update(&self, item: T) -> DomainResult<EntityId> {
        if let Some(id) = item.id().filter(|id| *id <= 0) {
            return Err(DomainError::InvalidValue(format!(
                "{} id must be positive, got {}",
                T::KIND,
                id
            )));
        }
        let mut conn = self.lock()?;
        let id = self
            .save_transaction(&mut conn, item)
            .map_err(database_error)?;

        tracing::debug!("Stored {} {} in {}", T::KIND, id, self.table);
        Ok(id)
    }

    fn find_by_id(&self, id: EntityId) -> DomainResult<Option<T>> {
        let conn = self.lock()?;
        let result: SqliteResult<Value> = conn.query_row(
            &format!("SELECT body FROM {} WHERE id = ?1", self.table),
            params![id],
            |row| row.get(0),
        );

        match result {
            Ok(body) => decode(id, body).map(Some).map_err(database_error),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(database_error(e)),
        }
    }

    fn find_all(&self) -> DomainResult<Vec<T>> {
        let conn = self.lock()?;
        self.load_all(&conn).map_err(database_error)
    }

    fn find_where(&self, filter: &dyn Fn(&T) -> bool) -> DomainResult<Vec<T>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|item| filter(item))
            .collect())
    }

    fn delete_where(&self, filter: &dyn Fn(&T) -> bool) -> DomainResult<usize> {
        let mut conn = self.lock()?;
        let ids: Vec<EntityId> = self
            .load_all(&conn)
            .map_err(database_error)?
            .iter()
            .filter(|item| filter(item))
            .filter_map(Storable::id)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = conn.transaction().map_err(database_error)?;
        let mut removed = 0;
        for id in &ids {
            removed += tx
                .execute(&format!("DELETE FROM {} WHERE id = ?1", self.table), params![id])
                .map_err(database_error)?;
        }
        tx.commit().map_err(database_error)?;

        tracing::debug!("Deleted {} {} item(s) from {}", removed, T::KIND, self.table);
        Ok(removed)
    }

    fn count(&self) -> DomainResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| row.get(0))
            .map_err(database_error)?;
        Ok(count as usize)
    }
}
