/// Domain aggregates
use super::base::{DomainError, DomainResult, EntityId, Storable};
use super::entities::{Customer, Product, Promotion};
use super::value_objects::{Money, PromotionType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An Order is the aggregate root that owns the products sold to a customer
/// and the pricing rules applied on top of them.
///
/// The total is always `subtotal - discount_amount`, and both are recomputed
/// eagerly after every mutation against the live product list and the
/// currently attached promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "OrderRecord", into = "OrderRecord")]
pub struct Order {
    id: Option<EntityId>,
    products: Vec<Product>,
    customer: Customer,
    promotion: Option<Promotion>,
    subtotal: f64,
    discount_amount: f64,
}

impl Order {
    /// Create a new order.
    ///
    /// Fails with [`DomainError::EmptyProductList`] when no product is given.
    /// A supplied promotion is applied right after the totals are computed.
    pub fn new(
        products: Vec<Product>,
        customer: Customer,
        promotion: Option<Promotion>,
    ) -> DomainResult<Self> {
        if products.is_empty() {
            return Err(DomainError::EmptyProductList);
        }

        let mut order = Order {
            id: None,
            products,
            customer,
            promotion: None,
            subtotal: 0.0,
            discount_amount: 0.0,
        };
        order.calculate_totals();
        order.apply_promotion(promotion);

        Ok(order)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Sum of every product value, before any discount
    pub fn subtotal(&self) -> f64 {
        self.subtotal
    }

    pub fn discount_amount(&self) -> f64 {
        self.discount_amount
    }

    pub fn total(&self) -> f64 {
        self.subtotal - self.discount_amount
    }

    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    /// Append products to the order.
    ///
    /// Products without a positive identifier are silently skipped; when
    /// nothing is left to add the order is untouched.
    pub fn add_products(&mut self, products: Vec<Product>) {
        let to_add: Vec<Product> = products
            .into_iter()
            .filter(|product| product.has_valid_id())
            .collect();
        if to_add.is_empty() {
            return;
        }

        self.products.extend(to_add);
        self.calculate_totals();
    }

    /// Remove every product whose id is in `product_ids`.
    ///
    /// Non-positive ids are ignored. Duplicated products sharing a removed id
    /// are all removed and each one counted. Returns how many were removed.
    pub fn remove_products(&mut self, product_ids: &[EntityId]) -> usize {
        let ids: Vec<EntityId> = product_ids.iter().copied().filter(|id| *id > 0).collect();
        if ids.is_empty() {
            return 0;
        }

        let before = self.products.len();
        self.products
            .retain(|product| !product.id().is_some_and(|id| ids.contains(&id)));
        let removed = before - self.products.len();

        self.calculate_totals();
        removed
    }

    /// Remove every product carrying the given id
    pub fn remove_product(&mut self, product_id: EntityId) -> usize {
        self.remove_products(&[product_id])
    }

    /// Attach a promotion and return the resulting discount amount.
    ///
    /// `None` is a no-op returning 0: an attached promotion can be replaced
    /// but never cleared.
    pub fn apply_promotion(&mut self, promotion: Option<Promotion>) -> f64 {
        let Some(promotion) = promotion else {
            return 0.0;
        };

        self.promotion = Some(promotion);
        self.calculate_totals();

        self.discount_amount
    }

    /// Whether the attached promotion discounts the given product
    pub fn is_product_promoted(&self, product_id: EntityId) -> bool {
        self.promotion
            .as_ref()
            .is_some_and(|promotion| promotion.targets(product_id))
    }

    /// Recompute the undiscounted sum and the discount from the current state
    fn calculate_totals(&mut self) {
        self.discount_amount = 0.0;
        self.subtotal = self.products.iter().map(Product::value).sum();

        let Some(promotion) = &self.promotion else {
            return;
        };

        let fraction = promotion.discount_percentage().fraction();
        match promotion.kind() {
            PromotionType::Order => {
                self.discount_amount = self.subtotal * fraction;
            }
            PromotionType::Product => {
                // Only the first matching product is discounted
                if let Some(target) = self
                    .products
                    .iter()
                    .find(|product| product.id().is_some_and(|id| promotion.targets(id)))
                {
                    self.discount_amount = target.value() * fraction;
                }
            }
        }
    }
}

impl Storable for Order {
    const KIND: &'static str = "Order";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order{{{}}}", self.id.unwrap_or(0))?;
        writeln!(f, "\tClient: {}", self.customer.name().to_uppercase())?;
        writeln!(f, "\tProducts:")?;
        writeln!(f)?;
        for product in &self.products {
            let promoted = self.is_product_promoted(product.id().unwrap_or(-1));
            write!(
                f,
                "\t\t{}\t{}\t{}",
                product.id().map(|id| id.to_string()).unwrap_or_default(),
                product.name().to_uppercase(),
                Money::new(product.value())
            )?;
            writeln!(f, "{}", if promoted { "P" } else { "" })?;
        }
        writeln!(f)?;
        writeln!(f, "\tDiscount: {}", Money::new(self.discount_amount))?;
        writeln!(f, "\tTotal: {}", Money::new(self.total()))
    }
}

/// Stored shape of an order: derived totals are recomputed on load
#[derive(Serialize, Deserialize)]
struct OrderRecord {
    id: Option<EntityId>,
    products: Vec<Product>,
    customer: Customer,
    promotion: Option<Promotion>,
}

impl From<Order> for OrderRecord {
    fn from(order: Order) -> Self {
        OrderRecord {
            id: order.id,
            products: order.products,
            customer: order.customer,
            promotion: order.promotion,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        // A stored order may legitimately hold no products after removals,
        // so this bypasses the constructor's non-empty check.
        let mut order = Order {
            id: record.id,
            products: record.products,
            customer: record.customer,
            promotion: record.promotion,
            subtotal: 0.0,
            discount_amount: 0.0,
        };
        order.calculate_totals();
        order
    }
}
