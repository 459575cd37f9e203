/// Domain entities
use super::base::{DomainError, DomainResult, EntityId, Storable};
use super::value_objects::{DiscountPercentage, PromotionType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer that places orders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    id: Option<EntityId>,
    name: String,
}

impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Customer {
            id: None,
            name: name.into(),
        }
    }

    /// Builder-style identifier assignment, mostly for restoring stored data
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Storable for Customer {
    const KIND: &'static str = "Customer";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Customer{{{}}} => {{ Name = {} }}",
            self.id.unwrap_or(0),
            self.name
        )
    }
}

/// A product that can be sold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: Option<EntityId>,
    name: String,
    value: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Product {
            id: None,
            name: name.into(),
            value,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value the product is sold for
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

impl Storable for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product{{{}}} => {{ Name = {}, Value = {} }}",
            self.id.unwrap_or(0),
            self.name,
            self.value
        )
    }
}

/// An offer that can be applied to an order, either on its whole value or
/// on one targeted product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PromotionRecord", into = "PromotionRecord")]
pub struct Promotion {
    id: Option<EntityId>,
    kind: PromotionType,
    target_id: Option<EntityId>,
    discount_percentage: DiscountPercentage,
    description: String,
}

impl Promotion {
    /// Create a promotion.
    ///
    /// Product promotions must name a positive target product id. Order
    /// promotions apply to the whole order, so any target is dropped.
    pub fn new(
        kind: PromotionType,
        target_id: Option<EntityId>,
        discount_percentage: i32,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        let target_id = match kind {
            PromotionType::Product => match target_id {
                Some(id) if id > 0 => Some(id),
                _ => {
                    return Err(DomainError::InvalidValue(format!(
                        "Target product must be set for promotions of type {}",
                        kind
                    )))
                }
            },
            PromotionType::Order => None,
        };

        Ok(Promotion {
            id: None,
            kind,
            target_id,
            discount_percentage: DiscountPercentage::new(discount_percentage)?,
            description: description.into(),
        })
    }

    /// Shorthand for an order-wide promotion
    pub fn order_wide(discount_percentage: i32, description: impl Into<String>) -> DomainResult<Self> {
        Self::new(PromotionType::Order, None, discount_percentage, description)
    }

    /// Shorthand for a promotion on a single product
    pub fn for_product(
        target_id: EntityId,
        discount_percentage: i32,
        description: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(
            PromotionType::Product,
            Some(target_id),
            discount_percentage,
            description,
        )
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn kind(&self) -> PromotionType {
        self.kind
    }

    pub fn target_id(&self) -> Option<EntityId> {
        self.target_id
    }

    pub fn discount_percentage(&self) -> DiscountPercentage {
        self.discount_percentage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this promotion discounts the product with the given id.
    ///
    /// Shared by discount calculation and order rendering so both always
    /// agree on which product is promoted.
    pub fn targets(&self, product_id: EntityId) -> bool {
        self.kind == PromotionType::Product
            && product_id > 0
            && self.target_id == Some(product_id)
    }
}

impl Storable for Promotion {
    const KIND: &'static str = "Promotion";

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }
}

/// Stored shape of a promotion; loading goes back through [`Promotion::new`]
#[derive(Serialize, Deserialize)]
struct PromotionRecord {
    id: Option<EntityId>,
    kind: PromotionType,
    target_id: Option<EntityId>,
    discount_percentage: i32,
    description: String,
}

impl TryFrom<PromotionRecord> for Promotion {
    type Error = DomainError;

    fn try_from(record: PromotionRecord) -> Result<Self, Self::Error> {
        let mut promotion = Promotion::new(
            record.kind,
            record.target_id,
            record.discount_percentage,
            record.description,
        )?;
        promotion.id = record.id;
        Ok(promotion)
    }
}

impl From<Promotion> for PromotionRecord {
    fn from(promotion: Promotion) -> Self {
        PromotionRecord {
            id: promotion.id,
            kind: promotion.kind,
            target_id: promotion.target_id,
            discount_percentage: i32::from(promotion.discount_percentage.value()),
            description: promotion.description,
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.unwrap_or(0);
        match self.target_id {
            Some(target) if target > 0 => write!(
                f,
                "Promotion{{{}}} [{}] => {{ Product = {}, DiscountPercentage = {} }}",
                id, self.kind, target, self.discount_percentage
            ),
            _ => write!(
                f,
                "Promotion{{{}}} [{}] => {{ DiscountPercentage = {} }}",
                id, self.kind, self.discount_percentage
            ),
        }
    }
}
