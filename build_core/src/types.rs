//! Core types shared by the build and requirement modules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// One of the eight allocatable character attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Vigor,
    Mind,
    Endurance,
    Strength,
    Dexterity,
    Intelligence,
    Faith,
    Arcane,
}

impl Attribute {
    /// Get all attributes in display order
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Vigor,
            Attribute::Mind,
            Attribute::Endurance,
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Intelligence,
            Attribute::Faith,
            Attribute::Arcane,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Vigor => "vigor",
            Attribute::Mind => "mind",
            Attribute::Endurance => "endurance",
            Attribute::Strength => "strength",
            Attribute::Dexterity => "dexterity",
            Attribute::Intelligence => "intelligence",
            Attribute::Faith => "faith",
            Attribute::Arcane => "arcane",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Vigor => "Vigor",
            Attribute::Mind => "Mind",
            Attribute::Endurance => "Endurance",
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Intelligence => "Intelligence",
            Attribute::Faith => "Faith",
            Attribute::Arcane => "Arcane",
        }
    }

    /// Short description shown next to the attribute in the planner
    pub fn description(&self) -> &'static str {
        match self {
            Attribute::Vigor => "Affects HP, fire resistance, and immunity",
            Attribute::Mind => "Affects FP and focus",
            Attribute::Endurance => "Affects stamina, equip load, and robustness",
            Attribute::Strength => "Required for heavy weapons, affects physical attack",
            Attribute::Dexterity => "Required for technique weapons, affects casting speed",
            Attribute::Intelligence => "Required for sorceries, affects magic defense",
            Attribute::Faith => "Required for incantations",
            Attribute::Arcane => "Affects item discovery and arcane scaling",
        }
    }

    /// Resolve a requirement name from catalog data.
    ///
    /// Matching is case-insensitive. Only the five attributes that gate
    /// equipment have aliases; everything else resolves to `None`.
    pub fn from_requirement_alias(name: &str) -> Option<Attribute> {
        match name.to_ascii_lowercase().as_str() {
            "str" | "strength" => Some(Attribute::Strength),
            "dex" | "dexterity" => Some(Attribute::Dexterity),
            "int" | "intelligence" => Some(Attribute::Intelligence),
            "fth" | "fai" | "faith" => Some(Attribute::Faith),
            "arc" | "arcane" => Some(Attribute::Arcane),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mutable field of the character build: level or one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatField {
    Level,
    Attribute(Attribute),
}

impl StatField {
    /// Level first, then every attribute in display order
    pub fn all() -> Vec<StatField> {
        std::iter::once(StatField::Level)
            .chain(Attribute::all().iter().copied().map(StatField::Attribute))
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatField::Level => "level",
            StatField::Attribute(attr) => attr.name(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatField::Level => "Level",
            StatField::Attribute(attr) => attr.label(),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatField::Level => "Overall character level",
            StatField::Attribute(attr) => attr.description(),
        }
    }
}

impl From<Attribute> for StatField {
    fn from(attr: Attribute) -> Self {
        StatField::Attribute(attr)
    }
}

impl FromStr for StatField {
    type Err = BuildError;

    /// Parse a full field name. Abbreviations are not accepted here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "level" {
            return Ok(StatField::Level);
        }
        Attribute::all()
            .iter()
            .find(|attr| attr.name() == lowered)
            .map(|attr| StatField::Attribute(*attr))
            .ok_or_else(|| BuildError::UnknownStat(s.to_string()))
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
