//! Equipment requirements and eligibility checks
//!
//! Catalog data describes requirements in more than one shape. Everything is
//! converted to a flat list of [`Requirement`] by [`RawRequirements::normalize`]
//! before [`meets_requirements`] looks at it.

mod evaluator;
mod raw;

pub use evaluator::{meets_requirements, unmet_requirements, UnmetRequirement};
pub use raw::RawRequirements;

use std::fmt;

use crate::types::Attribute;

/// Name used by the catalog for "no requirement"
pub const PLACEHOLDER_NAME: &str = "-";

/// A named minimum-stat threshold after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Stat name as spelled in the source data
    pub name: String,
    /// Minimum value, `None` when the source amount was missing or not numeric
    pub amount: Option<i64>,
}

impl Requirement {
    pub fn new(name: impl Into<String>, amount: Option<i64>) -> Self {
        Requirement {
            name: name.into(),
            amount,
        }
    }

    /// The threshold to enforce, or `None` if this entry never constrains.
    ///
    /// Placeholder names and missing or non-positive amounts are skipped.
    pub fn threshold(&self) -> Option<i64> {
        if self.name == PLACEHOLDER_NAME {
            return None;
        }
        self.amount.filter(|amount| *amount > 0)
    }

    /// The attribute this requirement gates, if the name is recognized
    pub fn attribute(&self) -> Option<Attribute> {
        Attribute::from_requirement_alias(&self.name)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount {
            Some(amount) => write!(f, "{}: {}", self.name, amount),
            None => write!(f, "{}: -", self.name),
        }
    }
}
