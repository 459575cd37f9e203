pub mod dto;
pub mod health;
pub mod initializer;
pub mod repositories;
pub mod services;

// Re-export key types to avoid naming conflicts
pub use dto::{ErrorResponse, OrderLine, OrderSummary};
pub use health::{HealthCheck, HealthReport, HealthStatus};
pub use initializer::DatabaseInitializer;
pub use repositories::{Repository, RepositoryExt, SharedRepository};
pub use services::{
    CustomerService, OrderService, ProductService, PromotionService, ResultCode, ServiceError,
    ServiceResult, StorableService,
};
