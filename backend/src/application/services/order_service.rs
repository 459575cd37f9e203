/// Order service: resolves catalog references and drives the Order aggregate
use super::errors::{ServiceError, ServiceResult};
use super::storable_service::StorableService;
use crate::application::repositories::{RepositoryExt, SharedRepository};
use crate::domain::{Customer, EntityId, Order, Product, Promotion, Storable};

/// Service for creating orders and applying mutations to stored orders.
///
/// Every mutation is a read-modify-write of one stored order: the order is
/// loaded, mutated through the aggregate and written back. Two callers
/// mutating the same order concurrently race; the last write wins.
#[derive(Clone)]
pub struct OrderService {
    orders: StorableService<Order>,
    products: SharedRepository<Product>,
    customers: SharedRepository<Customer>,
    promotions: SharedRepository<Promotion>,
}

impl OrderService {
    pub fn new(
        orders: SharedRepository<Order>,
        products: SharedRepository<Product>,
        customers: SharedRepository<Customer>,
        promotions: SharedRepository<Promotion>,
    ) -> Self {
        OrderService {
            orders: StorableService::new(orders),
            products,
            customers,
            promotions,
        }
    }

    /// Store an already built order after checking every reference it holds
    pub fn add(&self, order: Order) -> ServiceResult<EntityId> {
        self.validate_references(&order)?;
        self.orders.add(order)
    }

    /// Replace a stored order after checking every reference it holds
    pub fn update(&self, order: Order) -> ServiceResult<()> {
        self.validate_references(&order)?;
        self.orders.update(order)
    }

    /// Create and store an order for a customer from catalog product ids.
    ///
    /// Every product id must resolve, otherwise the order is rejected with
    /// [`ServiceError::InvalidProduct`]. The optional promotion is applied
    /// right away.
    pub fn create_order(
        &self,
        customer_id: EntityId,
        product_ids: &[EntityId],
        promotion_id: Option<EntityId>,
    ) -> ServiceResult<EntityId> {
        let Some(products) = self.products.resolve_all(product_ids)? else {
            tracing::warn!("Order rejected: unknown products in {:?}", product_ids);
            return Err(ServiceError::InvalidProduct);
        };

        let customer = self.find_customer(customer_id)?.ok_or_else(|| {
            tracing::warn!("Order rejected: unknown customer {}", customer_id);
            ServiceError::InvalidCustomer
        })?;

        let promotion = match promotion_id {
            Some(id) => Some(self.find_promotion(id)?.ok_or_else(|| {
                tracing::warn!("Order rejected: unknown promotion {}", id);
                ServiceError::InvalidPromotion
            })?),
            None => None,
        };

        let order = Order::new(products, customer, promotion)?;
        let id = self.orders.add(order)?;

        tracing::info!("Order {} created for customer {}", id, customer_id);
        Ok(id)
    }

    /// Add catalog products to a stored order. Returns how many were added.
    pub fn add_products_to(&self, order_id: EntityId, product_ids: &[EntityId]) -> ServiceResult<usize> {
        let Some(products) = self.products.resolve_all(product_ids)? else {
            return Err(ServiceError::InvalidProduct);
        };
        let mut order = self.orders.require(order_id)?;

        let added = products.len();
        order.add_products(products);
        self.save(order_id, order)?;

        tracing::debug!("Added {} product(s) to order {}", added, order_id);
        Ok(added)
    }

    /// Remove catalog products from a stored order. Returns how many were
    /// removed.
    ///
    /// Non-positive ids are ignored; every remaining id must be in the
    /// catalog. The order is only written back when something was removed.
    pub fn remove_products_from(&self, order_id: EntityId, product_ids: &[EntityId]) -> ServiceResult<usize> {
        let ids: Vec<EntityId> = product_ids.iter().copied().filter(|id| *id > 0).collect();
        if ids.is_empty() {
            return Ok(0);
        }
        if !self.products.contains_all(&ids)? {
            tracing::warn!("Removal rejected: unknown products in {:?}", ids);
            return Err(ServiceError::InvalidProduct);
        }
        let mut order = self.orders.require(order_id)?;

        let removed = order.remove_products(&ids);
        if removed > 0 {
            self.save(order_id, order)?;
        }

        tracing::debug!("Removed {} product(s) from order {}", removed, order_id);
        Ok(removed)
    }

    /// Remove one catalog product from a stored order
    pub fn remove_product_from(&self, order_id: EntityId, product_id: EntityId) -> ServiceResult<usize> {
        if !self.products.contains(product_id)? {
            return Err(ServiceError::InvalidProduct);
        }
        let mut order = self.orders.require(order_id)?;

        let removed = order.remove_product(product_id);
        if removed > 0 {
            self.save(order_id, order)?;
        }

        tracing::debug!("Removed product {} from order {} ({} item(s))", product_id, order_id, removed);
        Ok(removed)
    }

    /// Apply a stored promotion to a stored order and return the discount
    pub fn apply_promotion_to(&self, order_id: EntityId, promotion_id: EntityId) -> ServiceResult<f64> {
        let promotion = self
            .find_promotion(promotion_id)?
            .ok_or(ServiceError::InvalidPromotion)?;
        let mut order = self.orders.require(order_id)?;

        let discount = order.apply_promotion(Some(promotion));
        self.save(order_id, order)?;

        tracing::debug!("Promotion {} applied to order {}: discount {}", promotion_id, order_id, discount);
        Ok(discount)
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Order>> {
        self.orders.get_all()
    }

    pub fn get(&self, id: EntityId) -> ServiceResult<Option<Order>> {
        self.orders.get(id)
    }

    pub fn print(&self, id: EntityId) -> ServiceResult<String> {
        self.orders.print(id)
    }

    pub fn delete(&self, id: EntityId) -> ServiceResult<bool> {
        self.orders.delete(id)
    }

    fn find_customer(&self, id: EntityId) -> ServiceResult<Option<Customer>> {
        if id <= 0 {
            return Ok(None);
        }
        Ok(self.customers.find_by_id(id)?)
    }

    fn find_promotion(&self, id: EntityId) -> ServiceResult<Option<Promotion>> {
        if id <= 0 {
            return Ok(None);
        }
        Ok(self.promotions.find_by_id(id)?)
    }

    /// Write a mutated order back under its original id
    fn save(&self, order_id: EntityId, order: Order) -> ServiceResult<()> {
        let stored = self.orders.repository().add_or_update(order)?;
        if stored != order_id {
            return Err(ServiceError::NotCreated);
        }
        Ok(())
    }

    fn validate_references(&self, order: &Order) -> ServiceResult<()> {
        let product_ids: Vec<EntityId> = order
            .products()
            .iter()
            .map(|product| product.id().unwrap_or(0))
            .collect();
        if !self.products.contains_all(&product_ids)? {
            return Err(ServiceError::InvalidProduct);
        }

        if !self.customers.contains(order.customer().id().unwrap_or(0))? {
            return Err(ServiceError::InvalidCustomer);
        }

        if let Some(promotion) = order.promotion() {
            if !self.promotions.contains(promotion.id().unwrap_or(0))? {
                return Err(ServiceError::InvalidPromotion);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::repositories::Repository;
    use crate::domain::{DomainError, DomainResult};
    use crate::infrastructure::persistence::InMemoryRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Order store that counts writes
    #[derive(Default)]
    struct CountingRepository {
        inner: InMemoryRepository<Order>,
        writes: AtomicUsize,
    }

    impl CountingRepository {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl Repository<Order> for CountingRepository {
        fn add_or_update(&self, item: Order) -> DomainResult<EntityId> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.add_or_update(item)
        }

        fn find_by_id(&self, id: EntityId) -> DomainResult<Option<Order>> {
            self.inner.find_by_id(id)
        }

        fn find_all(&self) -> DomainResult<Vec<Order>> {
            self.inner.find_all()
        }

        fn find_where(&self, filter: &dyn Fn(&Order) -> bool) -> DomainResult<Vec<Order>> {
            self.inner.find_where(filter)
        }

        fn delete_where(&self, filter: &dyn Fn(&Order) -> bool) -> DomainResult<usize> {
            self.inner.delete_where(filter)
        }

        fn count(&self) -> DomainResult<usize> {
            self.inner.count()
        }
    }

    struct Fixture {
        service: OrderService,
        products: Arc<InMemoryRepository<Product>>,
        orders: Arc<CountingRepository>,
    }

    fn assert_money_eq(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    /// Catalog: customer 1, products 1..=3 (10, 20, 30), promotion 1 (order
    /// 10%), promotion 2 (product 2, 50%)
    fn fixture() -> Fixture {
        let products = Arc::new(InMemoryRepository::<Product>::new());
        let customers = Arc::new(InMemoryRepository::<Customer>::new());
        let promotions = Arc::new(InMemoryRepository::<Promotion>::new());

        customers.add_or_update(Customer::new("Customer-1")).unwrap();
        for index in 1..=3 {
            products
                .add_or_update(Product::new(format!("Product-{}", index), index as f64 * 10.0))
                .unwrap();
        }
        promotions
            .add_or_update(Promotion::order_wide(10, "10% above total").unwrap())
            .unwrap();
        promotions
            .add_or_update(Promotion::for_product(2, 50, "50% on product 2").unwrap())
            .unwrap();

        let orders = Arc::new(CountingRepository::default());
        let service = OrderService::new(orders.clone(), products.clone(), customers, promotions);
        Fixture {
            service,
            products,
            orders,
        }
    }

    #[test]
    fn test_create_order() {
        let fixture = fixture();

        let id = fixture.service.create_order(1, &[1, 2], None).unwrap();

        let order = fixture.service.get(id).unwrap().unwrap();
        assert_eq!(order.id(), Some(id));
        assert_eq!(order.customer().name(), "Customer-1");
        assert_money_eq(order.total(), 30.0);
    }

    #[test]
    fn test_create_order_with_promotion() {
        let fixture = fixture();

        let id = fixture.service.create_order(1, &[1, 2], Some(2)).unwrap();

        let order = fixture.service.get(id).unwrap().unwrap();
        assert_money_eq(order.discount_amount(), 10.0);
        assert_money_eq(order.total(), 20.0);
    }

    #[test]
    fn test_create_order_rejects_invalid_references() {
        let fixture = fixture();

        assert_eq!(
            fixture.service.create_order(1, &[1, 99], None).unwrap_err(),
            ServiceError::InvalidProduct
        );
        assert_eq!(
            fixture.service.create_order(1, &[], None).unwrap_err(),
            ServiceError::InvalidProduct
        );
        assert_eq!(
            fixture.service.create_order(7, &[1], None).unwrap_err(),
            ServiceError::InvalidCustomer
        );
        assert_eq!(
            fixture.service.create_order(1, &[1], Some(9)).unwrap_err(),
            ServiceError::InvalidPromotion
        );
        assert!(fixture.service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_products_to_order() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1], Some(1)).unwrap();

        let added = fixture.service.add_products_to(id, &[2, 3]).unwrap();

        assert_eq!(added, 2);
        let order = fixture.service.get(id).unwrap().unwrap();
        assert_eq!(order.products().len(), 3);
        assert_money_eq(order.discount_amount(), 6.0);
        assert_money_eq(order.total(), 54.0);
    }

    #[test]
    fn test_add_products_to_missing_order() {
        let fixture = fixture();
        assert_eq!(
            fixture.service.add_products_to(5, &[1]).unwrap_err(),
            ServiceError::not_found("Order", 5)
        );
        assert_eq!(
            fixture.service.add_products_to(5, &[42]).unwrap_err(),
            ServiceError::InvalidProduct
        );
    }

    #[test]
    fn test_remove_products_from_order() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1, 2, 3], None).unwrap();

        assert_eq!(fixture.service.remove_products_from(id, &[1, 3, -4]).unwrap(), 2);

        let order = fixture.service.get(id).unwrap().unwrap();
        assert_eq!(order.products().len(), 1);
        assert_money_eq(order.total(), 20.0);
    }

    #[test]
    fn test_remove_unknown_catalog_products_leaves_order_untouched() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1], None).unwrap();
        let before = fixture.service.get(id).unwrap().unwrap();
        assert_eq!(fixture.orders.writes(), 1);

        assert_eq!(
            fixture.service.remove_products_from(id, &[999]).unwrap_err(),
            ServiceError::InvalidProduct
        );
        assert_eq!(
            fixture.service.remove_products_from(id, &[1, 999]).unwrap_err(),
            ServiceError::InvalidProduct
        );

        assert_eq!(fixture.orders.writes(), 1);
        assert_eq!(fixture.service.get(id).unwrap().unwrap(), before);
    }

    #[test]
    fn test_removals_without_effect_are_not_written() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1], None).unwrap();

        assert_eq!(fixture.service.remove_products_from(id, &[]).unwrap(), 0);
        assert_eq!(fixture.service.remove_products_from(id, &[0, -2]).unwrap(), 0);
        assert_eq!(fixture.service.remove_products_from(id, &[2, 3]).unwrap(), 0);
        assert_eq!(fixture.service.remove_product_from(id, 2).unwrap(), 0);

        assert_eq!(fixture.orders.writes(), 1);
        assert_eq!(fixture.service.remove_products_from(id, &[1]).unwrap(), 1);
        assert_eq!(fixture.orders.writes(), 2);
    }

    #[test]
    fn test_remove_product_from_order() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1, 2], Some(2)).unwrap();

        assert_eq!(fixture.service.remove_product_from(id, 2).unwrap(), 1);

        let order = fixture.service.get(id).unwrap().unwrap();
        assert_money_eq(order.discount_amount(), 0.0);
        assert_money_eq(order.total(), 10.0);
        assert!(order.promotion().is_some());
    }

    #[test]
    fn test_remove_unknown_catalog_product_is_rejected() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1], None).unwrap();

        assert_eq!(
            fixture.service.remove_product_from(id, 42).unwrap_err(),
            ServiceError::InvalidProduct
        );
    }

    #[test]
    fn test_apply_promotion_to_order() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1, 2], None).unwrap();

        let discount = fixture.service.apply_promotion_to(id, 1).unwrap();

        assert_money_eq(discount, 3.0);
        let order = fixture.service.get(id).unwrap().unwrap();
        assert_money_eq(order.total(), 27.0);
    }

    #[test]
    fn test_apply_unknown_promotion() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[1], None).unwrap();

        assert_eq!(
            fixture.service.apply_promotion_to(id, 9).unwrap_err(),
            ServiceError::InvalidPromotion
        );
        assert_eq!(
            fixture.service.apply_promotion_to(8, 1).unwrap_err(),
            ServiceError::not_found("Order", 8)
        );
    }

    #[test]
    fn test_add_validates_references() {
        let fixture = fixture();
        let product = fixture.products.find_by_id(1).unwrap().unwrap();

        let unknown_customer = Order::new(vec![product.clone()], Customer::new("x").with_id(9), None).unwrap();
        assert_eq!(
            fixture.service.add(unknown_customer).unwrap_err(),
            ServiceError::InvalidCustomer
        );

        let unsaved_product = Order::new(
            vec![Product::new("loose", 1.0)],
            Customer::new("Customer-1").with_id(1),
            None,
        )
        .unwrap();
        assert_eq!(
            fixture.service.add(unsaved_product).unwrap_err(),
            ServiceError::InvalidProduct
        );

        let valid = Order::new(vec![product], Customer::new("Customer-1").with_id(1), None).unwrap();
        assert_eq!(fixture.service.add(valid).unwrap(), 1);
    }

    #[test]
    fn test_print_and_delete_order() {
        let fixture = fixture();
        let id = fixture.service.create_order(1, &[2], Some(2)).unwrap();

        let printed = fixture.service.print(id).unwrap();
        assert!(printed.starts_with("Order{1}\n\tClient: CUSTOMER-1\n"));
        assert!(printed.contains("\t\t2\tPRODUCT-2\t$20.00P\n"));
        assert!(printed.ends_with("\tDiscount: $10.00\n\tTotal: $10.00\n"));

        assert!(fixture.service.delete(id).unwrap());
        assert_eq!(
            fixture.service.print(id).unwrap(),
            "Order does not exist in the repository!"
        );
    }

    #[test]
    fn test_empty_product_list_error_converts() {
        let error: ServiceError = DomainError::EmptyProductList.into();
        assert_eq!(error, ServiceError::Domain(DomainError::EmptyProductList));
    }
}
