pub mod customer_service;
pub mod errors;
pub mod order_service;
pub mod product_service;
pub mod promotion_service;
pub mod storable_service;

pub use customer_service::{validate_customer, CustomerService};
pub use errors::{ResultCode, ServiceError, ServiceResult};
pub use order_service::OrderService;
pub use product_service::{validate_product, ProductService};
pub use promotion_service::PromotionService;
pub use storable_service::StorableService;
