use super::services::{CustomerService, ProductService, PromotionService, ServiceResult};
use crate::domain::{Customer, Product, Promotion};

const CUSTOMERS: i64 = 1;
const PRODUCTS: i64 = 3;
const PROMOTIONS: i64 = 2;

/// Fills empty stores with a small predefined catalog
pub struct DatabaseInitializer {
    products: ProductService,
    customers: CustomerService,
    promotions: PromotionService,
}

impl DatabaseInitializer {
    pub fn new(products: ProductService, customers: CustomerService, promotions: PromotionService) -> Self {
        DatabaseInitializer {
            products,
            customers,
            promotions,
        }
    }

    /// Insert the predefined customers, products and promotions.
    ///
    /// Odd promotions are order-wide (`i * 5`%), even ones target product `i`
    /// (`i * 2`%).
    pub fn seed(&self) -> ServiceResult<()> {
        for index in 1..=CUSTOMERS {
            self.customers.add(Customer::new(format!("Customer-{}", index)))?;
        }

        for index in 1..=PRODUCTS {
            self.products
                .add(Product::new(format!("Product-{}", index), (index * 10) as f64))?;
        }

        for index in 1..=PROMOTIONS {
            let promotion = if index % 2 == 0 {
                let percentage = (index * 2) as i32;
                Promotion::for_product(
                    index,
                    percentage,
                    format!("{}% of discount on product code {}", percentage, index),
                )?
            } else {
                let percentage = (index * 5) as i32;
                Promotion::order_wide(percentage, format!("{}% of discount above total", percentage))?
            };
            self.promotions.add(promotion)?;
        }

        tracing::info!(
            "Seeded {} customer(s), {} product(s), {} promotion(s)",
            CUSTOMERS,
            PRODUCTS,
            PROMOTIONS
        );
        Ok(())
    }
}
