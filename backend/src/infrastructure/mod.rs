pub mod bootstrap;
pub mod persistence;

pub use bootstrap::{AppServices, Repositories};
