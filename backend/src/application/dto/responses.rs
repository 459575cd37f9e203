use crate::application::services::ServiceError;
use crate::domain::{EntityId, Order, PromotionType, Storable};
use serde::{Deserialize, Serialize};

const GENERIC_FAILURE_MESSAGE: &str = "Generic error happened!";

/// Error payload returned to callers of the order system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Friendly message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            message: message.into(),
        }
    }
}

impl Default for ErrorResponse {
    fn default() -> Self {
        ErrorResponse::new(GENERIC_FAILURE_MESSAGE)
    }
}

impl From<&ServiceError> for ErrorResponse {
    fn from(error: &ServiceError) -> Self {
        ErrorResponse::new(error.to_string())
    }
}

impl From<ServiceError> for ErrorResponse {
    fn from(error: ServiceError) -> Self {
        ErrorResponse::from(&error)
    }
}

/// One product line of an [`OrderSummary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: Option<EntityId>,
    pub name: String,
    pub value: f64,
    pub promoted: bool,
}

/// Flat, serializable view of an order and its totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: Option<EntityId>,
    pub customer: String,
    pub lines: Vec<OrderLine>,
    pub promotion_id: Option<EntityId>,
    pub promotion_type: Option<PromotionType>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        let lines = order
            .products()
            .iter()
            .map(|product| OrderLine {
                product_id: product.id(),
                name: product.name().to_string(),
                value: product.value(),
                promoted: product
                    .id()
                    .map(|id| order.is_product_promoted(id))
                    .unwrap_or(false),
            })
            .collect();

        OrderSummary {
            id: order.id(),
            customer: order.customer().name().to_string(),
            lines,
            promotion_id: order.promotion().and_then(|promotion| promotion.id()),
            promotion_type: order.promotion().map(|promotion| promotion.kind()),
            subtotal: order.subtotal(),
            discount: order.discount_amount(),
            total: order.total(),
        }
    }
}
