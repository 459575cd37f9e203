use crate::domain::{DomainResult, EntityId, Storable};
use std::sync::Arc;

/// Repository trait for storable entities.
///
/// This trait defines the contract for persisting and retrieving entities
/// from a data store. Implementations can be backed by different storage
/// mechanisms (in-memory, SQLite, etc.) and own their storage; nothing is
/// shared through global state.
pub trait Repository<T: Storable>: Send + Sync {
    /// Inserts the item when it has no identifier, otherwise replaces the
    /// stored item with the same identifier.
    ///
    /// Returns the identifier the item is stored under. New identifiers
    /// start at 1 and are never reused.
    fn add_or_update(&self, item: T) -> DomainResult<EntityId>;

    /// Finds an item by its identifier.
    ///
    /// Returns `Ok(Some(item))` if found, `Ok(None)` if not found,
    /// or an error if the operation fails.
    fn find_by_id(&self, id: EntityId) -> DomainResult<Option<T>>;

    /// Returns all items in the repository.
    fn find_all(&self) -> DomainResult<Vec<T>>;

    /// Returns all items matching the filter.
    fn find_where(&self, filter: &dyn Fn(&T) -> bool) -> DomainResult<Vec<T>>;

    /// Deletes every item matching the filter and returns how many were removed.
    fn delete_where(&self, filter: &dyn Fn(&T) -> bool) -> DomainResult<usize>;

    /// Number of stored items.
    fn count(&self) -> DomainResult<usize>;
}

/// A repository shared between services
pub type SharedRepository<T> = Arc<dyn Repository<T>>;

/// Lookup helpers available on every repository
pub trait RepositoryExt<T: Storable> {
    /// Whether an item with this (positive) identifier is stored
    fn contains(&self, id: EntityId) -> DomainResult<bool>;

    /// Whether every identifier is positive and stored (vacuously true for
    /// an empty list)
    fn contains_all(&self, ids: &[EntityId]) -> DomainResult<bool>;

    /// Resolve a list of identifiers to stored items.
    ///
    /// Duplicated ids resolve once, in first-seen order. Returns `None` when
    /// the list is empty or any id is not stored, so callers can tell an
    /// invalid reference apart from a valid one.
    fn resolve_all(&self, ids: &[EntityId]) -> DomainResult<Option<Vec<T>>>;
}

impl<T, R> RepositoryExt<T> for R
where
    T: Storable,
    R: Repository<T> + ?Sized,
{
    fn contains(&self, id: EntityId) -> DomainResult<bool> {
        if id <= 0 {
            return Ok(false);
        }
        Ok(self.find_by_id(id)?.is_some())
    }

    fn contains_all(&self, ids: &[EntityId]) -> DomainResult<bool> {
        if ids.is_empty() {
            return Ok(true);
        }
        if ids.iter().any(|id| *id <= 0) {
            return Ok(false);
        }
        Ok(self.resolve_all(ids)?.is_some())
    }

    fn resolve_all(&self, ids: &[EntityId]) -> DomainResult<Option<Vec<T>>> {
        let mut distinct: Vec<EntityId> = Vec::with_capacity(ids.len());
        for id in ids {
            if !distinct.contains(id) {
                distinct.push(*id);
            }
        }
        if distinct.is_empty() {
            return Ok(None);
        }

        let mut resolved = Vec::with_capacity(distinct.len());
        for id in distinct {
            if id <= 0 {
                return Ok(None);
            }
            match self.find_by_id(id)? {
                Some(item) => resolved.push(item),
                None => return Ok(None),
            }
        }

        Ok(Some(resolved))
    }
}
