//! Prelude module for convenient imports
//!
//! ```rust
//! use build_core::prelude::*;
//! ```

// Build
pub use crate::character::{CharacterBuild, CharacterStats, PointBalance};
pub use crate::types::{Attribute, StatField};

// Requirements
pub use crate::requirement::{meets_requirements, RawRequirements, Requirement};

// Catalog
pub use crate::catalog::{Catalog, CatalogItem, Category};
pub use crate::favorites::{FavoriteItem, Favorites};

// Storage
pub use crate::persistence::Persistence;
pub use crate::store::{FileStore, KeyValueStore, MemoryStore};

// Config
pub use crate::config::{default_constants, BuildConstants};
