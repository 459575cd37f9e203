/// Promotion management
use super::errors::{ServiceError, ServiceResult};
use super::storable_service::StorableService;
use crate::application::repositories::SharedRepository;
use crate::domain::{EntityId, Promotion, Storable};

/// Service for creating and maintaining promotions.
///
/// Percentage range and product targets are already enforced when a
/// [`Promotion`] is constructed, so only identity is checked here.
#[derive(Clone)]
pub struct PromotionService {
    store: StorableService<Promotion>,
}

impl PromotionService {
    pub fn new(repository: SharedRepository<Promotion>) -> Self {
        PromotionService {
            store: StorableService::new(repository),
        }
    }

    pub fn add(&self, promotion: Promotion) -> ServiceResult<EntityId> {
        if promotion.id().is_some() {
            tracing::warn!("Rejected promotion with preset id {:?}", promotion.id());
            return Err(ServiceError::InvalidPromotion);
        }

        let id = self.store.add(promotion)?;
        tracing::debug!("Promotion {} created", id);
        Ok(id)
    }

    pub fn update(&self, promotion: Promotion) -> ServiceResult<()> {
        if !promotion.has_valid_id() {
            return Err(ServiceError::InvalidPromotion);
        }
        self.store.update(promotion)
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Promotion>> {
        self.store.get_all()
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Option<Promotion>> {
        self.store.get(id)
    }

    pub fn print(&self, id: EntityId) -> ServiceResult<String> {
        self.store.print(id)
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        self.store.delete(id)
    }
}
