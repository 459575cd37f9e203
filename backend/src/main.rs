use anyhow::{Context, Result};
use orders::application::{HealthStatus, OrderSummary};
use orders::config::AppConfig;
use orders::infrastructure::AppServices;
use tracing_subscriber::{fmt, prelude::*};

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let filter = config.env_filter().context("Failed to build log filter")?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    tracing::info!("Starting order service ({:?} storage)", config.storage);

    let services = AppServices::from_config(&config).context("Failed to open storage")?;

    let health = services.health_check();
    if config.seed && health.check().status == HealthStatus::Degraded {
        services
            .initializer()
            .seed()
            .context("Failed to seed the catalog")?;
    }

    let report = health.check();
    tracing::info!("Health: {:?} - {}", report.status, report.description);
    if !report.status.is_healthy() {
        anyhow::bail!("Catalog is not available: {}", report.description);
    }

    // Walk one order through its lifecycle
    let orders = &services.orders;
    let order_id = orders.create_order(1, &[1, 2], None)?;
    orders.add_products_to(order_id, &[3])?;
    orders.apply_promotion_to(order_id, 1)?;
    println!("{}", orders.print(order_id)?);

    orders.apply_promotion_to(order_id, 2)?;
    orders.remove_product_from(order_id, 1)?;
    println!("{}", orders.print(order_id)?);

    if let Some(order) = orders.get(order_id)? {
        let summary = OrderSummary::from(&order);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
