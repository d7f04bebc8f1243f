//! Requirement evaluation against a stat snapshot

use crate::character::CharacterStats;
use crate::types::Attribute;

use super::Requirement;

/// A requirement the current stats fall short of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmetRequirement {
    pub attribute: Attribute,
    pub required: i64,
    pub current: u32,
}

impl UnmetRequirement {
    pub fn shortfall(&self) -> i64 {
        self.required - self.current as i64
    }
}

/// Check every requirement against `stats`.
///
/// Placeholders and non-positive amounts are skipped and unrecognized stat
/// names pass, so only the five gating attributes can fail a check. An empty
/// list is always met.
pub fn meets_requirements(stats: &CharacterStats, requirements: &[Requirement]) -> bool {
    requirements.iter().all(|req| check(stats, req).is_none())
}

/// The requirements `stats` does not satisfy, in input order
pub fn unmet_requirements(stats: &CharacterStats, requirements: &[Requirement]) -> Vec<UnmetRequirement> {
    requirements.iter().filter_map(|req| check(stats, req)).collect()
}

fn check(stats: &CharacterStats, req: &Requirement) -> Option<UnmetRequirement> {
    let required = req.threshold()?;
    // Fail open on names outside the alias table (e.g. hand counts)
    let attribute = req.attribute()?;
    let current = stats.attribute(attribute);
    if current as i64 >= required {
        None
    } else {
        Some(UnmetRequirement {
            attribute,
            required,
            current,
        })
    }
}
