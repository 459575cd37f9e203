/// Product catalog management
use super::errors::{ServiceError, ServiceResult};
use super::storable_service::StorableService;
use crate::application::repositories::SharedRepository;
use crate::domain::{EntityId, Product, Storable};

/// A product needs a name and a positive, finite value to be sold
pub fn validate_product(product: &Product) -> ServiceResult<()> {
    if product.name().trim().is_empty() {
        return Err(ServiceError::InvalidProduct);
    }
    if !product.value().is_finite() || product.value() <= 0.0 {
        return Err(ServiceError::InvalidProduct);
    }
    Ok(())
}

/// Service for creating and maintaining catalog products
#[derive(Clone)]
pub struct ProductService {
    store: StorableService<Product>,
}

impl ProductService {
    pub fn new(repository: SharedRepository<Product>) -> Self {
        ProductService {
            store: StorableService::new(repository),
        }
    }

    pub fn add(&self, product: Product) -> ServiceResult<EntityId> {
        if product.id().is_some() {
            tracing::warn!("Rejected product with preset id {:?}", product.id());
            return Err(ServiceError::InvalidProduct);
        }
        validate_product(&product)?;

        let id = self.store.add(product)?;
        tracing::debug!("Product {} created", id);
        Ok(id)
    }

    /// Update a catalog entry. Orders keep the copy they were built with.
    pub fn update(&self, product: Product) -> ServiceResult<()> {
        if !product.has_valid_id() {
            return Err(ServiceError::InvalidProduct);
        }
        validate_product(&product)?;
        self.store.update(product)
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Product>> {
        self.store.get_all()
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Option<Product>> {
        self.store.get(id)
    }

    pub fn print(&self, id: EntityId) -> ServiceResult<String> {
        self.store.print(id)
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        self.store.delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryRepository;
    use std::sync::Arc;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryRepository::<Product>::new()))
    }

    #[test]
    fn test_add_product() {
        let service = service();
        let id = service.add(Product::new("Product-1", 10.0)).unwrap();
        assert_eq!(
            service.print(id).unwrap(),
            "Product{1} => { Name = Product-1, Value = 10 }"
        );
    }

    #[test]
    fn test_add_product_with_id_is_rejected() {
        let service = service();
        let result = service.add(Product::new("Product-1", 10.0).with_id(1));
        assert_eq!(result.unwrap_err(), ServiceError::InvalidProduct);
    }

    #[test]
    fn test_add_product_with_invalid_value_is_rejected() {
        let service = service();
        for value in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                service.add(Product::new("Product", value)).unwrap_err(),
                ServiceError::InvalidProduct
            );
        }
        assert!(service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_product() {
        let service = service();
        let id = service.add(Product::new("Product-1", 10.0)).unwrap();

        let mut product = service.get(id).unwrap().unwrap();
        product.set_value(12.5);
        service.update(product).unwrap();

        assert_eq!(service.get(id).unwrap().unwrap().value(), 12.5);
    }

    #[test]
    fn test_update_unknown_product_fails() {
        let service = service();
        let result = service.update(Product::new("Product-1", 10.0).with_id(9));
        assert_eq!(result.unwrap_err(), ServiceError::not_found("Product", 9));
    }
}
