mod in_memory_repository;
mod schema;
mod sqlite_repository;

pub use in_memory_repository::InMemoryRepository;
pub use schema::{initialize_table, table_name};
pub use sqlite_repository::SqliteRepository;
