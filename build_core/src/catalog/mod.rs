//! Catalog - Read-only equipment data loaded from JSON files

mod item;

pub use item::{CatalogItem, Category};

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::character::CharacterBuild;

/// Catalog loading error
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Accepted layouts of a category file
#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryFile {
    Items(Vec<CatalogItem>),
    Envelope { data: Vec<CatalogItem> },
}

impl CategoryFile {
    fn into_items(self) -> Vec<CatalogItem> {
        match self {
            CategoryFile::Items(items) => items,
            CategoryFile::Envelope { data } => data,
        }
    }
}

/// All equipment, grouped by category
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<Category, Vec<CatalogItem>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `<category>.json` for every category present in `dir`.
    ///
    /// Missing files leave their category empty.
    pub fn load_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new();

        for category in Category::all() {
            let path = dir.join(format!("{}.json", category.file_stem()));
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!("No data for {} at {}", category.label(), path.display());
                    continue;
                }
                Err(source) => return Err(CatalogError::Io { path, source }),
            };
            let items = Self::parse_category(&content).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;
            catalog.insert(*category, items);
        }

        info!("Loaded {} catalog items from {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// Parse the contents of one category file
    pub fn parse_category(content: &str) -> Result<Vec<CatalogItem>, serde_json::Error> {
        serde_json::from_str::<CategoryFile>(content).map(CategoryFile::into_items)
    }

    pub fn insert(&mut self, category: Category, items: Vec<CatalogItem>) {
        self.items.insert(category, items);
    }

    pub fn items(&self, category: Category) -> &[CatalogItem] {
        self.items.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Items whose name contains `query`, ignoring case
    pub fn search(&self, category: Category, query: &str) -> Vec<&CatalogItem> {
        self.items(category)
            .iter()
            .filter(|item| item.matches_name(query))
            .collect()
    }

    /// Items the build currently meets every requirement of
    pub fn equippable(&self, category: Category, build: &CharacterBuild) -> Vec<&CatalogItem> {
        self.items(category)
            .iter()
            .filter(|item| build.can_equip_item(item))
            .collect()
    }

    /// Look up an item by id across all categories
    pub fn find(&self, id: &str) -> Option<(Category, &CatalogItem)> {
        Category::all().iter().find_map(|category| {
            self.items(*category)
                .iter()
                .find(|item| item.id == id)
                .map(|item| (*category, item))
        })
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildConstants;
    use crate::persistence::Persistence;
    use crate::requirement::Requirement;
    use crate::store::MemoryStore;
    use crate::types::{Attribute, StatField};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_both_layouts() {
        let bare = r#"[{ "id": "a", "name": "Dagger" }]"#;
        let envelope = r#"{ "success": true, "count": 1, "data": [{ "id": "a", "name": "Dagger" }] }"#;

        assert_eq!(Catalog::parse_category(bare).unwrap()[0].name, "Dagger");
        assert_eq!(Catalog::parse_category(envelope).unwrap()[0].name, "Dagger");
        assert!(Catalog::parse_category("{\"oops\": 1}").is_err());
    }

    #[test]
    fn test_load_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("weapons.json"),
            r#"[{ "id": "w1", "name": "Zweihander", "requiredAttributes": [{ "name": "Str", "amount": 19 }] }]"#,
        )
        .unwrap();
        fs::write(
            temp.path().join("sorceries.json"),
            r#"{ "data": [{ "id": "s1", "name": "Rock Sling", "requires": [{ "name": "Intelligence", "amount": 18 }] }] }"#,
        )
        .unwrap();

        let catalog = Catalog::load_dir(temp.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items(Category::Weapons).len(), 1);
        assert!(catalog.items(Category::Armors).is_empty());
        assert_eq!(catalog.find("s1").map(|(c, _)| c), Some(Category::Sorceries));
    }

    #[test]
    fn test_load_dir_reports_bad_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("shields.json"), "not json").unwrap();

        let err = Catalog::load_dir(temp.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { ref path, .. } if path.ends_with("shields.json")));
    }

    #[test]
    fn test_search_ignores_case() {
        let mut catalog = Catalog::new();
        catalog.insert(
            Category::Weapons,
            vec![
                CatalogItem::new("w1", "Rivers of Blood"),
                CatalogItem::new("w2", "Blasphemous Blade"),
                CatalogItem::new("w3", "Moonveil"),
            ],
        );

        let names: Vec<_> = catalog
            .search(Category::Weapons, "BL")
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["Rivers of Blood", "Blasphemous Blade"]);
        assert_eq!(catalog.search(Category::Weapons, "").len(), 3);
    }

    #[tokio::test]
    async fn test_equippable_filter() {
        let mut catalog = Catalog::new();
        catalog.insert(
            Category::Weapons,
            vec![
                CatalogItem::new("w1", "Club"),
                CatalogItem::new("w2", "Greatsword")
                    .with_required_attributes(vec![Requirement::new("Str", Some(31))]),
                CatalogItem::new("w3", "Longsword")
                    .with_required_attributes(vec![Requirement::new("Str", Some(10))]),
            ],
        );

        let persistence = Persistence::spawn(Arc::new(MemoryStore::new()));
        let mut build = CharacterBuild::load(persistence, BuildConstants::default()).await;

        let ids: Vec<_> = catalog
            .equippable(Category::Weapons, &build)
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["w1", "w3"]);

        build.update_stat(StatField::Attribute(Attribute::Strength), 31);
        assert_eq!(catalog.equippable(Category::Weapons, &build).len(), 3);
    }
}
