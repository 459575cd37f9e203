use crate::application::{
    CustomerService, DatabaseInitializer, HealthCheck, OrderService, ProductService,
    PromotionService, SharedRepository,
};
use crate::config::{AppConfig, StorageBackend};
use crate::domain::{Customer, Order, Product, Promotion};
use crate::infrastructure::persistence::{InMemoryRepository, SqliteRepository};
use std::path::Path;
use std::sync::Arc;

/// The four repositories backing the services
pub struct Repositories {
    pub products: SharedRepository<Product>,
    pub customers: SharedRepository<Customer>,
    pub promotions: SharedRepository<Promotion>,
    pub orders: SharedRepository<Order>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Repositories {
            products: Arc::new(InMemoryRepository::<Product>::new()),
            customers: Arc::new(InMemoryRepository::<Customer>::new()),
            promotions: Arc::new(InMemoryRepository::<Promotion>::new()),
            orders: Arc::new(InMemoryRepository::<Order>::new()),
        }
    }

    /// Open one connection per entity table on the same database file
    pub fn sqlite(path: &Path) -> rusqlite::Result<Self> {
        Ok(Repositories {
            products: Arc::new(SqliteRepository::<Product>::new_with_path(path)?),
            customers: Arc::new(SqliteRepository::<Customer>::new_with_path(path)?),
            promotions: Arc::new(SqliteRepository::<Promotion>::new_with_path(path)?),
            orders: Arc::new(SqliteRepository::<Order>::new_with_path(path)?),
        })
    }
}

/// Fully wired application services
#[derive(Clone)]
pub struct AppServices {
    pub products: ProductService,
    pub customers: CustomerService,
    pub promotions: PromotionService,
    pub orders: OrderService,
}

impl AppServices {
    pub fn new(repositories: Repositories) -> Self {
        let Repositories {
            products,
            customers,
            promotions,
            orders,
        } = repositories;

        AppServices {
            products: ProductService::new(products.clone()),
            customers: CustomerService::new(customers.clone()),
            promotions: PromotionService::new(promotions.clone()),
            orders: OrderService::new(orders, products, customers, promotions),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory())
    }

    pub fn sqlite(path: &Path) -> rusqlite::Result<Self> {
        Ok(Self::new(Repositories::sqlite(path)?))
    }

    pub fn from_config(config: &AppConfig) -> rusqlite::Result<Self> {
        match config.storage {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            StorageBackend::Sqlite => {
                tracing::info!("Using SQLite storage at {}", config.database_path.display());
                Self::sqlite(&config.database_path)
            }
        }
    }

    pub fn health_check(&self) -> HealthCheck {
        HealthCheck::new(
            self.products.clone(),
            self.customers.clone(),
            self.promotions.clone(),
        )
    }

    pub fn initializer(&self) -> DatabaseInitializer {
        DatabaseInitializer::new(
            self.products.clone(),
            self.customers.clone(),
            self.promotions.clone(),
        )
    }
}
