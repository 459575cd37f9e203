/// Value objects for the domain layer
use super::base::{DomainError, DomainResult, ValueObject};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a promotion's discount applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionType {
    /// Discount on a single targeted product
    Product,
    /// Discount on the sum of every product in the order
    Order,
}

impl ValueObject for PromotionType {}

impl fmt::Display for PromotionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromotionType::Product => write!(f, "PRODUCT"),
            PromotionType::Order => write!(f, "ORDER"),
        }
    }
}

/// A discount percentage in the interval 1 ~ 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct DiscountPercentage(u8);

impl DiscountPercentage {
    pub fn new(value: i32) -> DomainResult<Self> {
        if !(1..=100).contains(&value) {
            return Err(DomainError::InvalidValue(format!(
                "Invalid amount of discount {}. Must be between 1 and 100",
                value
            )));
        }
        Ok(DiscountPercentage(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// The percentage as a multiplier (10% => 0.1)
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl ValueObject for DiscountPercentage {}

impl TryFrom<i32> for DiscountPercentage {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        DiscountPercentage::new(value)
    }
}

impl From<DiscountPercentage> for i32 {
    fn from(value: DiscountPercentage) -> Self {
        i32::from(value.0)
    }
}

impl fmt::Display for DiscountPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monetary amount rendered as currency (`$1,234.50`)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Money(f64);

impl Money {
    pub fn new(amount: f64) -> Self {
        Money(amount)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl ValueObject for Money {}

impl From<f64> for Money {
    fn from(amount: f64) -> Self {
        Money(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = (self.0.abs() * 100.0).round() as u64;
        let whole = (cents / 100).to_string();
        let fraction = cents % 100;

        // Group the integer part in thousands
        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (index, digit) in whole.chars().enumerate() {
            if index > 0 && (whole.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        let sign = if self.0 < 0.0 && cents > 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, grouped, fraction)
    }
}
