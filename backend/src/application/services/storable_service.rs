/// Generic CRUD operations shared by every entity service
use super::errors::{ServiceError, ServiceResult};
use crate::application::repositories::{RepositoryExt, SharedRepository};
use crate::domain::{EntityId, Storable};
use std::fmt::Display;

/// Storage-backed CRUD helper composed into the entity services.
///
/// Entity specific validation stays in the owning service; this type only
/// knows how to move items in and out of the repository.
pub struct StorableService<T: Storable> {
    repository: SharedRepository<T>,
}

impl<T: Storable> Clone for StorableService<T> {
    fn clone(&self) -> Self {
        StorableService {
            repository: self.repository.clone(),
        }
    }
}

impl<T: Storable> StorableService<T> {
    pub fn new(repository: SharedRepository<T>) -> Self {
        StorableService { repository }
    }

    pub fn repository(&self) -> &SharedRepository<T> {
        &self.repository
    }

    /// Store a new item and return its identifier
    pub fn add(&self, item: T) -> ServiceResult<EntityId> {
        Ok(self.repository.add_or_update(item)?)
    }

    /// Replace an already stored item.
    ///
    /// The item must carry the positive identifier of an existing entry.
    pub fn update(&self, item: T) -> ServiceResult<()> {
        let id = item.id().unwrap_or(0);
        if !self.repository.contains(id)? {
            return Err(ServiceError::not_found(T::KIND, id));
        }

        let stored = self.repository.add_or_update(item)?;
        if stored != id {
            return Err(ServiceError::NotCreated);
        }
        Ok(())
    }

    pub fn get_all(&self) -> ServiceResult<Vec<T>> {
        Ok(self.repository.find_all()?)
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Option<T>> {
        Ok(self.repository.find_by_id(id)?)
    }

    /// Get an item or fail with [`ServiceError::NotFound`]
    pub fn require(&self, id: EntityId) -> ServiceResult<T> {
        self.get(id)?
            .ok_or_else(|| ServiceError::not_found(T::KIND, id))
    }

    /// Human readable rendering of a stored item
    pub fn print(&self, id: EntityId) -> ServiceResult<String>
    where
        T: Display,
    {
        Ok(match self.get(id)? {
            Some(item) => item.to_string(),
            None => format!("{} does not exist in the repository!", T::KIND),
        })
    }

    /// Delete an item, returning whether exactly one item was removed
    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        let removed = self.repository.delete_where(&|item: &T| item.is_id(id))?;
        Ok(removed == 1)
    }
}
