use super::services::{CustomerService, ProductService, PromotionService, ServiceResult};
use serde::Serialize;

/// Health status of the order system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub description: String,
}

impl HealthReport {
    fn new(status: HealthStatus, description: impl Into<String>) -> Self {
        HealthReport {
            status,
            description: description.into(),
        }
    }
}

/// Checks that the catalog stores are reachable and populated
#[derive(Clone)]
pub struct HealthCheck {
    products: ProductService,
    customers: CustomerService,
    promotions: PromotionService,
}

impl HealthCheck {
    pub fn new(products: ProductService, customers: CustomerService, promotions: PromotionService) -> Self {
        HealthCheck {
            products,
            customers,
            promotions,
        }
    }

    pub fn check(&self) -> HealthReport {
        match self.catalog_populated() {
            Ok(true) => HealthReport::new(HealthStatus::Healthy, "A healthy result."),
            Ok(false) => HealthReport::new(
                HealthStatus::Degraded,
                "A degraded result. The database was not initialized.",
            ),
            Err(error) => {
                tracing::warn!("Health check failed: {}", error);
                HealthReport::new(
                    HealthStatus::Unhealthy,
                    format!("An unhealthy result. The health check failed: {}", error),
                )
            }
        }
    }

    fn catalog_populated(&self) -> ServiceResult<bool> {
        Ok(!self.products.get_all()?.is_empty()
            && !self.customers.get_all()?.is_empty()
            && !self.promotions.get_all()?.is_empty())
    }
}
