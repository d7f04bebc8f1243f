//! build_core - Character build planner and equipment eligibility engine
//!
//! This library provides:
//! - CharacterBuild: Level and attribute allocation with point-budget reporting
//! - Requirement normalization and evaluation for catalog equipment
//! - Catalog: Equipment data loaded from JSON files
//! - Favorites: Bookmarked catalog items
//! - Persistence: Fire-and-forget snapshot writes over a key-value store

pub mod catalog;
pub mod character;
pub mod config;
pub mod error;
pub mod favorites;
pub mod persistence;
pub mod prelude;
pub mod requirement;
pub mod store;
pub mod types;

// Re-export core types for convenience
pub use catalog::{Catalog, CatalogError, CatalogItem, Category};
pub use character::{BuildPhase, CharacterBuild, CharacterStats, PointBalance};
pub use config::{default_constants, BuildConstants, ConfigError};
pub use error::BuildError;
pub use favorites::{FavoriteItem, Favorites};
pub use persistence::{Persistence, PersistenceError};
pub use requirement::{meets_requirements, RawRequirements, Requirement, UnmetRequirement};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use types::{Attribute, StatField};
