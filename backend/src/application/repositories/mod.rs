pub mod repository;

pub use repository::{Repository, RepositoryExt, SharedRepository};
