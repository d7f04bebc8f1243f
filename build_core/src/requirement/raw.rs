//! RawRequirements - Requirement data as it arrives from the catalog

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Requirement;

/// Requirement field of a catalog item, in whichever shape the source used.
///
/// Weapons list `[{ "name": "Str", "amount": 12 }]`, other sources use a
/// `{ "str": 12 }` mapping, and some entries carry values of neither shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRequirements {
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
    Other(Value),
}

impl RawRequirements {
    /// Convert any accepted shape into an ordered list of requirements.
    ///
    /// Sequence elements that are not objects with a non-empty string `name`
    /// are dropped. Mapping values that do not coerce become `0`.
    pub fn normalize(&self) -> Vec<Requirement> {
        match self {
            RawRequirements::Sequence(entries) => entries.iter().filter_map(sequence_entry).collect(),
            RawRequirements::Mapping(map) => map
                .iter()
                .map(|(name, value)| Requirement::new(name.clone(), Some(mapping_amount(value))))
                .collect(),
            RawRequirements::Other(_) => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalize().is_empty()
    }
}

impl From<Vec<Requirement>> for RawRequirements {
    fn from(requirements: Vec<Requirement>) -> Self {
        RawRequirements::Sequence(
            requirements
                .into_iter()
                .map(|req| {
                    let mut entry = Map::new();
                    entry.insert("name".to_string(), Value::String(req.name));
                    entry.insert("amount".to_string(), req.amount.map_or(Value::Null, Value::from));
                    Value::Object(entry)
                })
                .collect(),
        )
    }
}

fn sequence_entry(entry: &Value) -> Option<Requirement> {
    let object = entry.as_object()?;
    let name = object.get("name")?.as_str().filter(|name| !name.is_empty())?;
    let amount = object.get("amount").and_then(sequence_amount);
    Some(Requirement::new(name, amount))
}

/// Amount of a `{ "name", "amount" }` entry.
///
/// Strings must be a numeric literal as a whole, surrounding whitespace
/// aside (`" 18 "`, `"9.5"`); `"12abc"` is `None`. Fractions truncate
/// toward zero. Other JSON types are `None`.
fn sequence_amount(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number_amount(number),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64),
        _ => None,
    }
}

/// Amount of a `{ "str": 12 }` mapping value.
///
/// Strings use their leading integer (`" 12abc"` is 12). Values that yield
/// no integer count as 0.
fn mapping_amount(value: &Value) -> i64 {
    let amount = match value {
        Value::Number(number) => number_amount(number),
        Value::String(text) => leading_integer(text),
        _ => None,
    };
    amount.unwrap_or(0)
}

fn number_amount(number: &serde_json::Number) -> Option<i64> {
    number
        .as_i64()
        .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(rest.len(), |(i, _)| i);
    if digits_end == 0 {
        return None;
    }
    // Digit runs too long for i64 saturate, matching the unbounded stat range
    let magnitude = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
