//! Application layer: services and use cases
//!
//! Orchestrates domain logic behind a single service surface.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use services::TaxonomyService;
