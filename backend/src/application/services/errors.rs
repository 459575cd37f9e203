use crate::domain::{DomainError, EntityId};
use std::fmt;
use thiserror::Error;

/// Failures reported by the application services
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Invalid product reference")]
    InvalidProduct,

    #[error("Invalid customer reference")]
    InvalidCustomer,

    #[error("Invalid promotion reference")]
    InvalidPromotion,

    #[error("Item was not created")]
    NotCreated,

    #[error("{kind} {id} does not exist in the repository")]
    NotFound { kind: &'static str, id: EntityId },

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ServiceError {
    pub fn not_found(kind: &'static str, id: EntityId) -> Self {
        ServiceError::NotFound { kind, id }
    }

    /// The numeric code a transport layer reports for this failure
    pub fn result_code(&self) -> ResultCode {
        match self {
            ServiceError::InvalidProduct => ResultCode::InvalidProduct,
            ServiceError::InvalidCustomer => ResultCode::InvalidCustomer,
            ServiceError::InvalidPromotion => ResultCode::InvalidPromotion,
            ServiceError::NotCreated => ResultCode::NotCreated,
            ServiceError::Domain(DomainError::EmptyProductList) => ResultCode::InvalidProduct,
            ServiceError::NotFound { .. } | ServiceError::Domain(_) => ResultCode::Undefined,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Negative sentinel codes distinguishing validation failures from a
/// successfully assigned (positive) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ResultCode {
    /// The failure could not be classified
    Undefined = -999,
    InvalidProduct = -1,
    InvalidCustomer = -2,
    InvalidPromotion = -3,
    NotCreated = -4,
}

impl ResultCode {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -999 => Some(ResultCode::Undefined),
            -1 => Some(ResultCode::InvalidProduct),
            -2 => Some(ResultCode::InvalidCustomer),
            -3 => Some(ResultCode::InvalidPromotion),
            -4 => Some(ResultCode::NotCreated),
            _ => None,
        }
    }

    /// Translate the outcome of a create operation into a single integer:
    /// the new id on success, a negative code otherwise.
    pub fn encode(outcome: &ServiceResult<EntityId>) -> i64 {
        match outcome {
            Ok(id) => *id,
            Err(error) => i64::from(error.result_code().code()),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultCode::Undefined => "Undefined",
            ResultCode::InvalidProduct => "InvalidProduct",
            ResultCode::InvalidCustomer => "InvalidCustomer",
            ResultCode::InvalidPromotion => "InvalidPromotion",
            ResultCode::NotCreated => "NotCreated",
        };
        write!(f, "{}", name)
    }
}
