/// Base DDD abstractions for the domain layer
use std::fmt::Debug;
use thiserror::Error;

/// Identifier assigned to storable entities by a repository
pub type EntityId = i64;

/// Trait for value objects - immutable objects defined by their attributes
/// Value objects are equal if all their attributes are equal
pub trait ValueObject: Clone + PartialEq + Debug {}

/// Trait for entities that live in a repository.
///
/// The identifier is optional: an entity has no id until a repository
/// assigns one on its first save.
pub trait Storable: Clone + Debug {
    /// Entity name used in messages and storage table names
    const KIND: &'static str;

    fn id(&self) -> Option<EntityId>;

    fn set_id(&mut self, id: EntityId);

    /// Whether this entity is stored under the given identifier
    fn is_id(&self, id: EntityId) -> bool {
        self.id() == Some(id)
    }

    /// Whether the entity carries a repository-assigned (positive) identifier
    fn has_valid_id(&self) -> bool {
        self.id().is_some_and(|id| id > 0)
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// An order was created without any product
    #[error("Must contain at least one valid product")]
    EmptyProductList,
    /// Invalid value provided
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Backing store failure
    #[error("Storage error: {0}")]
    Storage(String),
}
