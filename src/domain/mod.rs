//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no persistence,
//! no presentation).

pub mod arena;
pub mod entities;
pub mod error;
pub mod links;
pub mod outline;
pub mod snapshot;

pub use arena::{CategoryArena, PreOrderIter};
pub use entities::{CategoryId, CategoryLink, CategoryNode};
pub use error::{DomainError, DomainResult};
pub use outline::Insertion;
pub use snapshot::CategorySnapshot;
