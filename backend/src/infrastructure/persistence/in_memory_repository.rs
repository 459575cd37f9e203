use crate::application::repositories::Repository;
use crate::domain::{DomainError, DomainResult, EntityId, Storable};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory implementation of the Repository trait.
///
/// Each instance owns its own map and identifier counter, so two
/// repositories of the same entity type never see each other's data.
pub struct InMemoryRepository<T: Storable> {
    state: RwLock<State<T>>,
}

struct State<T> {
    items: HashMap<EntityId, T>,
    last_id: EntityId,
}

impl<T: Storable> InMemoryRepository<T> {
    pub fn new() -> Self {
        InMemoryRepository {
            state: RwLock::new(State {
                items: HashMap::new(),
                last_id: 0,
            }),
        }
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, State<T>>> {
        self.state
            .read()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, State<T>>> {
        self.state
            .write()
            .map_err(|e| DomainError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl<T: Storable> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Storable + Send + Sync,
{
    fn add_or_update(&self, mut item: T) -> DomainResult<EntityId> {
        let mut state = self.write()?;

        let id = match item.id() {
            Some(id) if id <= 0 => {
                return Err(DomainError::InvalidValue(format!(
                    "{} id must be positive, got {}",
                    T::KIND,
                    id
                )))
            }
            Some(id) => {
                // Explicit ids must not be handed out again later
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                state.last_id += 1;
                let id = state.last_id;
                item.set_id(id);
                id
            }
        };

        state.items.insert(id, item);
        tracing::debug!("Stored {} {}", T::KIND, id);
        Ok(id)
    }

    fn find_by_id(&self, id: EntityId) -> DomainResult<Option<T>> {
        Ok(self.read()?.items.get(&id).cloned())
    }

    fn find_all(&self) -> DomainResult<Vec<T>> {
        let state = self.read()?;
        let mut items: Vec<T> = state.items.values().cloned().collect();
        items.sort_by_key(|item| item.id());
        Ok(items)
    }

    fn find_where(&self, filter: &dyn Fn(&T) -> bool) -> DomainResult<Vec<T>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|item| filter(item))
            .collect())
    }

    fn delete_where(&self, filter: &dyn Fn(&T) -> bool) -> DomainResult<usize> {
        let mut state = self.write()?;
        let before = state.items.len();
        state.items.retain(|_, item| !filter(item));
        let removed = before - state.items.len();

        if removed > 0 {
            tracing::debug!("Deleted {} {} item(s)", removed, T::KIND);
        }
        Ok(removed)
    }

    fn count(&self) -> DomainResult<usize> {
        Ok(self.read()?.items.len())
    }
}
