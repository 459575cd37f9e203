pub mod responses;

pub use responses::{ErrorResponse, OrderLine, OrderSummary};
