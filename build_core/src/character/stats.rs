//! CharacterStats - The persisted stat allocation

use serde::{Deserialize, Serialize};

use crate::config::BuildConstants;
use crate::types::{Attribute, StatField};

/// Smallest value any stat may hold
pub const MIN_STAT: u32 = 1;

/// Level and the eight attributes of a character build.
///
/// Serialized as a flat JSON object keyed by field name, which is the
/// snapshot format kept in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub level: u32,
    pub vigor: u32,
    pub mind: u32,
    pub endurance: u32,
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub faith: u32,
    pub arcane: u32,
}

impl Default for CharacterStats {
    fn default() -> Self {
        CharacterStats::with_defaults(1, 10)
    }
}

impl CharacterStats {
    /// Build stats with the given level and every attribute set to `attribute`
    pub fn with_defaults(level: u32, attribute: u32) -> Self {
        CharacterStats {
            level,
            vigor: attribute,
            mind: attribute,
            endurance: attribute,
            strength: attribute,
            dexterity: attribute,
            intelligence: attribute,
            faith: attribute,
            arcane: attribute,
        }
    }

    /// Default stats for the configured constants
    pub fn from_constants(constants: &BuildConstants) -> Self {
        CharacterStats::with_defaults(constants.default_level, constants.default_attribute)
    }

    pub fn attribute(&self, attr: Attribute) -> u32 {
        match attr {
            Attribute::Vigor => self.vigor,
            Attribute::Mind => self.mind,
            Attribute::Endurance => self.endurance,
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Faith => self.faith,
            Attribute::Arcane => self.arcane,
        }
    }

    pub fn get(&self, field: StatField) -> u32 {
        match field {
            StatField::Level => self.level,
            StatField::Attribute(attr) => self.attribute(attr),
        }
    }

    /// Set a field, clamping to [`MIN_STAT`].
    ///
    /// Values beyond `u32::MAX` saturate; there is no other upper bound.
    pub fn set(&mut self, field: StatField, value: i64) {
        let clamped = u32::try_from(value.max(MIN_STAT as i64)).unwrap_or(u32::MAX);
        let slot = match field {
            StatField::Level => &mut self.level,
            StatField::Attribute(attr) => match attr {
                Attribute::Vigor => &mut self.vigor,
                Attribute::Mind => &mut self.mind,
                Attribute::Endurance => &mut self.endurance,
                Attribute::Strength => &mut self.strength,
                Attribute::Dexterity => &mut self.dexterity,
                Attribute::Intelligence => &mut self.intelligence,
                Attribute::Faith => &mut self.faith,
                Attribute::Arcane => &mut self.arcane,
            },
        };
        *slot = clamped;
    }

    /// Sum of the eight attributes (level excluded)
    pub fn used_points(&self) -> i64 {
        Attribute::all()
            .iter()
            .map(|attr| self.attribute(*attr) as i64)
            .sum()
    }

    /// Points the build is expected to spend at its level
    pub fn total_points(&self, constants: &BuildConstants) -> i64 {
        constants.base_points + (self.level as i64 - 1) * constants.points_per_level
    }

    /// Unspent points; negative when the allocation overspends
    pub fn available_points(&self, constants: &BuildConstants) -> i64 {
        self.total_points(constants) - self.used_points()
    }

    /// Every field holds at least [`MIN_STAT`]
    pub fn is_valid(&self) -> bool {
        StatField::all().iter().all(|field| self.get(*field) >= MIN_STAT)
    }
}

/// How an allocation compares to its point budget.
///
/// Purely informational: overspending is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointBalance {
    Available(u64),
    Balanced,
    Overspent(u64),
}

impl PointBalance {
    pub fn from_available(available: i64) -> Self {
        match available {
            0 => PointBalance::Balanced,
            n if n > 0 => PointBalance::Available(n.unsigned_abs()),
            n => PointBalance::Overspent(n.unsigned_abs()),
        }
    }

    /// User-facing summary, `None` when balanced
    pub fn message(&self) -> Option<String> {
        match self {
            PointBalance::Available(n) => {
                Some(format!("You have {} points available to spend", n))
            }
            PointBalance::Balanced => None,
            PointBalance::Overspent(n) => {
                Some(format!("You have spent {} more points than available", n))
            }
        }
    }
}
