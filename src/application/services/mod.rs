//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services are concrete structs, not traits.

mod taxonomy;

pub use taxonomy::TaxonomyService;
