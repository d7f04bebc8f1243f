//! Catalog item and category types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::requirement::{Requirement, RawRequirements};

/// Equipment category, one data file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Weapons,
    Shields,
    Sorceries,
    Spirits,
    Talismans,
    Incantations,
    Items,
    Ashes,
    Armors,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Weapons,
            Category::Shields,
            Category::Sorceries,
            Category::Spirits,
            Category::Talismans,
            Category::Incantations,
            Category::Items,
            Category::Ashes,
            Category::Armors,
        ]
    }

    /// Base name of the category's data file
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Weapons => "weapons",
            Category::Shields => "shields",
            Category::Sorceries => "sorceries",
            Category::Spirits => "spirits",
            Category::Talismans => "talismans",
            Category::Incantations => "incantations",
            Category::Items => "items",
            Category::Ashes => "ashes",
            Category::Armors => "armors",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Weapons => "Weapons",
            Category::Shields => "Shields",
            Category::Sorceries => "Sorceries",
            Category::Spirits => "Spirit Ashes",
            Category::Talismans => "Talismans",
            Category::Incantations => "Incantations",
            Category::Items => "Items",
            Category::Ashes => "Ashes of War",
            Category::Armors => "Armor",
        }
    }

    /// Whether items in this category carry stat requirements worth showing
    pub fn has_requirements(&self) -> bool {
        matches!(
            self,
            Category::Weapons | Category::Shields | Category::Sorceries | Category::Incantations
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the equipment catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    /// Weapon-style requirement field
    #[serde(default)]
    pub required_attributes: Option<RawRequirements>,
    /// Spell-style requirement field
    #[serde(default)]
    pub requires: Option<RawRequirements>,
    /// Remaining stat blocks (attack, defence, dmgNegation, ...)
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            image: None,
            description: None,
            kind: None,
            effect: None,
            category: None,
            weight: None,
            required_attributes: None,
            requires: None,
            details: Map::new(),
        }
    }

    pub fn with_required_attributes(mut self, requirements: Vec<Requirement>) -> Self {
        self.required_attributes = Some(requirements.into());
        self
    }

    /// The item's requirements, preferring `requiredAttributes` over `requires`
    pub fn requirements(&self) -> Option<&RawRequirements> {
        self.required_attributes.as_ref().or(self.requires.as_ref())
    }

    /// Normalized requirements, empty when the item has none
    pub fn requirement_list(&self) -> Vec<Requirement> {
        self.requirements()
            .map(RawRequirements::normalize)
            .unwrap_or_default()
    }

    /// `"Str: 12, Dex: 10"` style summary, `None` when there is nothing to show
    pub fn requirement_summary(&self) -> Option<String> {
        let list = self.requirement_list();
        if list.is_empty() {
            return None;
        }
        Some(
            list.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}
