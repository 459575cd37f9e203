use crate::domain::Storable;
use rusqlite::{Connection, Result};

/// Name of the table holding entities of type `T` (`Order` => `orders`)
pub fn table_name<T: Storable>() -> String {
    format!("{}s", T::KIND.to_lowercase())
}

/// Initialize the table backing one entity kind.
/// This function is idempotent and can be safely called multiple times.
///
/// Each row keeps the entity as a JSON document next to its identifier.
/// AUTOINCREMENT guarantees identifiers of deleted rows are never reused.
pub fn initialize_table(conn: &Connection, table: &str) -> Result<()> {
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                body TEXT NOT NULL
            )"
        ),
        [],
    )?;

    Ok(())
}
