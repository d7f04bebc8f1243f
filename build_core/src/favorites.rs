//! Favorites - A persisted set of bookmarked catalog items

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{CatalogItem, Category};
use crate::persistence::Persistence;

/// A bookmarked catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Category,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FavoriteItem {
    pub fn new(id: impl Into<String>, kind: Category, name: impl Into<String>) -> Self {
        FavoriteItem {
            id: id.into(),
            kind,
            name: name.into(),
            image: None,
        }
    }

    pub fn from_catalog(kind: Category, item: &CatalogItem) -> Self {
        FavoriteItem {
            id: item.id.clone(),
            kind,
            name: item.name.clone(),
            image: item.image.clone(),
        }
    }
}

/// Favorites keyed by item id, in the order they were added
pub struct Favorites {
    items: Vec<FavoriteItem>,
    persistence: Persistence,
    key: String,
}

impl Favorites {
    pub fn new(persistence: Persistence, key: impl Into<String>) -> Self {
        Favorites {
            items: Vec::new(),
            persistence,
            key: key.into(),
        }
    }

    /// Replace the in-memory list with the stored one, if readable
    pub async fn initialize(&mut self) {
        match self.persistence.read_json::<Vec<FavoriteItem>>(&self.key).await {
            Ok(Some(items)) => {
                info!("Loaded {} favorites", items.len());
                self.items = items;
            }
            Ok(None) => debug!("No stored favorites"),
            Err(e) => warn!("Failed to load favorites: {}", e),
        }
    }

    /// Add or remove `item`; returns whether it is a favorite afterwards
    pub fn toggle(&mut self, item: FavoriteItem) -> bool {
        if self.is_favorite(&item.id) {
            self.remove(&item.id);
            false
        } else {
            self.add(item);
            true
        }
    }

    /// Add `item` unless its id is already present
    pub fn add(&mut self, item: FavoriteItem) {
        if self.is_favorite(&item.id) {
            return;
        }
        debug!("Added favorite {}", item.id);
        self.items.push(item);
        self.save();
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|fav| fav.id != id);
        if self.items.len() != before {
            debug!("Removed favorite {}", id);
            self.save();
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.items.iter().any(|fav| fav.id == id)
    }

    pub fn items(&self) -> &[FavoriteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn save(&self) {
        self.persistence.write_json(&self.key, &self.items);
    }
}
