//! catree: category taxonomy engine
//!
//! Maintains an evolving hierarchy of named categories together with a
//! symmetric, named cross-link relation between arbitrary categories, plus an
//! indentation-driven bulk importer that turns flat text into a subtree.
//!
//! The crate is consumed in-process by a single logical writer; persistence
//! and presentation are collaborators that work against the flattened
//! `(category, depth)` view and the nested snapshot representation.
//!
//! ```
//! use catree::TaxonomyService;
//!
//! let mut taxonomy = TaxonomyService::new();
//! let electronics = taxonomy.add_category(None, "Electronics").unwrap();
//! taxonomy.bulk_upload("Computers\n  Laptops\nPhones", Some(electronics)).unwrap();
//! assert_eq!(taxonomy.flatten().len(), 4);
//! ```

pub mod application;
pub mod domain;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, TaxonomyService};
pub use domain::{
    CategoryArena, CategoryId, CategoryLink, CategoryNode, CategorySnapshot, DomainError,
    DomainResult,
};
