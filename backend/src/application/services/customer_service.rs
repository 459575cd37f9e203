/// Customer management
use super::errors::{ServiceError, ServiceResult};
use super::storable_service::StorableService;
use crate::application::repositories::SharedRepository;
use crate::domain::{Customer, EntityId, Storable};

/// Reject customers without a usable name
pub fn validate_customer(customer: &Customer) -> ServiceResult<()> {
    if customer.name().trim().is_empty() {
        return Err(ServiceError::InvalidCustomer);
    }
    Ok(())
}

/// Service for creating and maintaining customers
#[derive(Clone)]
pub struct CustomerService {
    store: StorableService<Customer>,
}

impl CustomerService {
    pub fn new(repository: SharedRepository<Customer>) -> Self {
        CustomerService {
            store: StorableService::new(repository),
        }
    }

    /// Register a new customer. Customers that already carry an id are
    /// rejected: identifiers are assigned by the repository.
    pub fn add(&self, customer: Customer) -> ServiceResult<EntityId> {
        if customer.id().is_some() {
            tracing::warn!("Rejected customer with preset id {:?}", customer.id());
            return Err(ServiceError::InvalidCustomer);
        }
        validate_customer(&customer)?;

        let id = self.store.add(customer)?;
        tracing::debug!("Customer {} created", id);
        Ok(id)
    }

    pub fn update(&self, customer: Customer) -> ServiceResult<()> {
        if !customer.has_valid_id() {
            return Err(ServiceError::InvalidCustomer);
        }
        validate_customer(&customer)?;
        self.store.update(customer)
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Customer>> {
        self.store.get_all()
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Option<Customer>> {
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

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryRepository::<Customer>::new()))
    }

    #[test]
    fn test_add_customer() {
        let service = service();
        let id = service.add(Customer::new("Customer-1")).unwrap();
        assert_eq!(id, 1);
        assert_eq!(service.get(id).unwrap().unwrap().name(), "Customer-1");
    }

    #[test]
    fn test_add_customer_with_id_is_rejected() {
        let service = service();
        let result = service.add(Customer::new("Customer-1").with_id(4));
        assert_eq!(result.unwrap_err(), ServiceError::InvalidCustomer);
        assert!(service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_customer_without_name_is_rejected() {
        let service = service();
        assert_eq!(
            service.add(Customer::new("  ")).unwrap_err(),
            ServiceError::InvalidCustomer
        );
    }

    #[test]
    fn test_update_customer_without_id_is_rejected() {
        let service = service();
        assert_eq!(
            service.update(Customer::new("Customer-1")).unwrap_err(),
            ServiceError::InvalidCustomer
        );
    }

    #[test]
    fn test_update_and_delete_customer() {
        let service = service();
        let id = service.add(Customer::new("Customer-1")).unwrap();

        service.update(Customer::new("Renamed").with_id(id)).unwrap();
        assert_eq!(service.print(id).unwrap(), "Customer{1} => { Name = Renamed }");

        assert!(service.delete(id).unwrap());
        assert!(service.get(id).unwrap().is_none());
    }
}
