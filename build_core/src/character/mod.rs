//! CharacterBuild - The player's stat allocation and equipment checks

mod stats;

pub use stats::{CharacterStats, PointBalance, MIN_STAT};

use tracing::{debug, info, warn};

use crate::catalog::CatalogItem;
use crate::config::BuildConstants;
use crate::error::BuildError;
use crate::persistence::Persistence;
use crate::requirement::{meets_requirements, unmet_requirements, RawRequirements, UnmetRequirement};
use crate::types::StatField;

/// Lifecycle of a [`CharacterBuild`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// The stored snapshot has not been read yet
    Uninitialized,
    /// Stats are available, either loaded or default
    Ready,
}

/// Owns the character's stats and persists them after every change.
///
/// Created [`BuildPhase::Uninitialized`]; [`CharacterBuild::initialize`]
/// reads the stored snapshot once and moves it to [`BuildPhase::Ready`].
pub struct CharacterBuild {
    stats: CharacterStats,
    constants: BuildConstants,
    persistence: Persistence,
    phase: BuildPhase,
}

impl CharacterBuild {
    pub fn new(persistence: Persistence, constants: BuildConstants) -> Self {
        CharacterBuild {
            stats: CharacterStats::from_constants(&constants),
            constants,
            persistence,
            phase: BuildPhase::Uninitialized,
        }
    }

    /// Create a build and load its stored snapshot
    pub async fn load(persistence: Persistence, constants: BuildConstants) -> Self {
        let mut build = CharacterBuild::new(persistence, constants);
        build.initialize().await;
        build
    }

    /// Load the stored snapshot, if any. Only the first call has an effect.
    ///
    /// Unreadable or invalid snapshots are logged and leave the current
    /// stats in place.
    pub async fn initialize(&mut self) {
        if self.phase == BuildPhase::Ready {
            return;
        }

        let key = self.constants.stats_key.clone();
        match self.persistence.read_json::<CharacterStats>(&key).await {
            Ok(Some(stored)) if stored.is_valid() => {
                info!("Loaded character stats: level={}", stored.level);
                self.stats = stored;
            }
            Ok(Some(stored)) => {
                warn!("Ignoring stored stats with values below {}: {:?}", MIN_STAT, stored);
            }
            Ok(None) => {
                info!("No stored character stats, using defaults");
            }
            Err(e) => {
                warn!("Failed to load character stats, using defaults: {}", e);
            }
        }

        self.phase = BuildPhase::Ready;
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == BuildPhase::Ready
    }

    pub fn constants(&self) -> &BuildConstants {
        &self.constants
    }

    /// Snapshot of the current stats
    pub fn stats(&self) -> CharacterStats {
        self.stats
    }

    /// Set a field to `max(1, value)` and persist
    pub fn update_stat(&mut self, field: StatField, value: i64) {
        self.stats.set(field, value);
        debug!("Set {} to {}", field.name(), self.stats.get(field));
        self.save();
    }

    /// Like [`CharacterBuild::update_stat`], addressing the field by name
    pub fn update_stat_by_name(&mut self, name: &str, value: i64) -> Result<(), BuildError> {
        let field: StatField = name.parse()?;
        self.update_stat(field, value);
        Ok(())
    }

    pub fn increment(&mut self, field: StatField) {
        let current = self.stats.get(field) as i64;
        self.update_stat(field, current + 1);
    }

    pub fn decrement(&mut self, field: StatField) {
        let current = self.stats.get(field) as i64;
        self.update_stat(field, current - 1);
    }

    /// Restore the default level and attributes and persist
    pub fn reset_stats(&mut self) {
        self.stats = CharacterStats::from_constants(&self.constants);
        debug!("Reset character stats");
        self.save();
    }

    /// Sum of the eight attributes
    pub fn used_points(&self) -> i64 {
        self.stats.used_points()
    }

    /// Budget minus used points; negative means overspent
    pub fn available_points(&self) -> i64 {
        self.stats.available_points(&self.constants)
    }

    pub fn point_balance(&self) -> PointBalance {
        PointBalance::from_available(self.available_points())
    }

    /// Whether the current stats satisfy `requirements`. `None` always passes.
    pub fn can_equip(&self, requirements: Option<&RawRequirements>) -> bool {
        match requirements {
            Some(raw) => meets_requirements(&self.stats, &raw.normalize()),
            None => true,
        }
    }

    pub fn can_equip_item(&self, item: &CatalogItem) -> bool {
        self.can_equip(item.requirements())
    }

    /// Requirements of `item` the current stats fall short of
    pub fn unmet_requirements(&self, item: &CatalogItem) -> Vec<UnmetRequirement> {
        match item.requirements() {
            Some(raw) => unmet_requirements(&self.stats, &raw.normalize()),
            None => Vec::new(),
        }
    }

    fn save(&self) {
        self.persistence.write_json(&self.constants.stats_key, &self.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{KeyValueStore, MemoryStore, StoreError};
    use crate::types::Attribute;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    struct OfflineStore;

    fn offline() -> StoreError {
        std::io::Error::new(std::io::ErrorKind::NotConnected, "offline").into()
    }

    #[async_trait]
    impl KeyValueStore for OfflineStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(offline())
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
            Err(offline())
        }
    }

    const STRENGTH: StatField = StatField::Attribute(Attribute::Strength);

    async fn ready_build(store: Arc<MemoryStore>) -> CharacterBuild {
        CharacterBuild::load(Persistence::spawn(store), BuildConstants::default()).await
    }

    fn raw(value: serde_json::Value) -> RawRequirements {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_lifecycle() {
        let mut build = CharacterBuild::new(
            Persistence::spawn(Arc::new(MemoryStore::new())),
            BuildConstants::default(),
        );
        assert_eq!(build.phase(), BuildPhase::Uninitialized);
        assert_eq!(build.stats(), CharacterStats::default());

        build.initialize().await;
        assert_eq!(build.phase(), BuildPhase::Ready);

        build.initialize().await;
        assert!(build.is_ready());
    }

    #[tokio::test]
    async fn test_update_stat_clamps_negative() {
        let mut build = ready_build(Arc::new(MemoryStore::new())).await;
        build.update_stat(STRENGTH, -5);
        assert_eq!(build.stats().strength, 1);
    }

    #[tokio::test]
    async fn test_returned_stats_are_a_copy() {
        let build = ready_build(Arc::new(MemoryStore::new())).await;
        let mut snapshot = build.stats();
        snapshot.strength = 99;
        assert_eq!(build.stats().strength, 10);
    }

    #[tokio::test]
    async fn test_update_by_name_rejects_unknown_field() {
        let mut build = ready_build(Arc::new(MemoryStore::new())).await;
        let before = build.stats();

        let result = build.update_stat_by_name("luck", 40);
        assert_eq!(result, Err(BuildError::UnknownStat("luck".to_string())));
        assert_eq!(build.stats(), before);

        build.update_stat_by_name("Faith", 30).unwrap();
        assert_eq!(build.stats().faith, 30);
    }

    #[tokio::test]
    async fn test_increment_and_decrement() {
        let mut build = ready_build(Arc::new(MemoryStore::new())).await;
        build.increment(StatField::Level);
        assert_eq!(build.stats().level, 2);
        build.decrement(StatField::Level);
        build.decrement(StatField::Level);
        assert_eq!(build.stats().level, 1);
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let mut build = ready_build(Arc::new(MemoryStore::new())).await;
        build.update_stat(StatField::Level, 40);
        build.update_stat(STRENGTH, 55);

        build.reset_stats();
        let once = build.stats();
        build.reset_stats();

        assert_eq!(build.stats(), once);
        assert_eq!(once, CharacterStats::with_defaults(1, 10));
    }

    #[tokio::test]
    async fn test_point_budget() {
        let mut build = ready_build(Arc::new(MemoryStore::new())).await;
        assert_eq!(build.used_points(), 80);
        assert_eq!(build.available_points(), 0);
        assert_eq!(build.point_balance(), PointBalance::Balanced);

        build.update_stat(StatField::Level, 21);
        assert_eq!(build.available_points(), 20);

        build.update_stat(STRENGTH, 40);
        assert_eq!(build.used_points(), 110);
        assert_eq!(build.available_points(), -10);
        assert_eq!(build.point_balance(), PointBalance::Overspent(10));
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let store = Arc::new(MemoryStore::new());
        let persistence = Persistence::spawn(store.clone());
        let mut build = CharacterBuild::load(persistence.clone(), BuildConstants::default()).await;

        build.update_stat(StatField::Attribute(Attribute::Dexterity), 33);
        persistence.flush().await;

        let stored = store.get("elden_ring_character_stats").await.unwrap().unwrap();
        let stats: CharacterStats = serde_json::from_str(&stored).unwrap();
        assert_eq!(stats.dexterity, 33);

        let reloaded = ready_build(store).await;
        assert_eq!(reloaded.stats().dexterity, 33);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_falls_back_to_defaults() {
        let store = Arc::new(MemoryStore::with_entry("elden_ring_character_stats", "{\"level\":"));
        let build = ready_build(store).await;
        assert!(build.is_ready());
        assert_eq!(build.stats(), CharacterStats::default());
    }

    #[tokio::test]
    async fn test_snapshot_with_zero_stat_is_rejected() {
        let mut stats = serde_json::to_value(CharacterStats::default()).unwrap();
        stats["vigor"] = json!(0);
        let store = Arc::new(MemoryStore::with_entry(
            "elden_ring_character_stats",
            stats.to_string(),
        ));
        let build = ready_build(store).await;
        assert_eq!(build.stats().vigor, 10);
    }

    #[tokio::test]
    async fn test_offline_store_keeps_build_usable() {
        let mut build =
            CharacterBuild::load(Persistence::spawn(Arc::new(OfflineStore)), BuildConstants::default()).await;
        assert!(build.is_ready());

        build.update_stat(StatField::Attribute(Attribute::Arcane), 25);
        build.reset_stats();
        build.update_stat(StatField::Attribute(Attribute::Arcane), 14);
        assert_eq!(build.stats().arcane, 14);
    }

    #[tokio::test]
    async fn test_can_equip_absent_or_empty() {
        let build = ready_build(Arc::new(MemoryStore::new())).await;
        assert!(build.can_equip(None));
        assert!(build.can_equip(Some(&raw(json!([])))));
        assert!(build.can_equip(Some(&raw(json!({})))));
        assert!(build.can_equip(Some(&raw(json!(null)))));
    }

    #[tokio::test]
    async fn test_can_equip_scenarios() {
        let mut build = ready_build(Arc::new(MemoryStore::new())).await;
        build.update_stat(STRENGTH, 20);
        build.update_stat(StatField::Attribute(Attribute::Dexterity), 15);

        let satisfied = raw(json!([
            { "name": "Str", "amount": 18 },
            { "name": "Dex", "amount": 12 },
        ]));
        assert!(build.can_equip(Some(&satisfied)));

        let too_heavy = raw(json!([{ "name": "Str", "amount": 25 }]));
        assert!(!build.can_equip(Some(&too_heavy)));

        let with_placeholder = raw(json!([
            { "name": "-", "amount": 0 },
            { "name": "Str", "amount": 18 },
        ]));
        assert!(build.can_equip(Some(&with_placeholder)));
    }

    #[tokio::test]
    async fn test_can_equip_string_amounts() {
        let build = ready_build(Arc::new(MemoryStore::new())).await;
        assert!(build.can_equip(Some(&raw(json!([{ "name": "Int", "amount": "10" }])))));
        assert!(!build.can_equip(Some(&raw(json!([{ "name": "Int", "amount": "11" }])))));
        assert!(build.can_equip(Some(&raw(json!({ "int": "bogus" })))));
    }

    proptest! {
        #[test]
        fn prop_update_never_drops_below_one(value in any::<i64>(), index in 0usize..9) {
            let field = StatField::all()[index];
            let mut stats = CharacterStats::default();
            stats.set(field, value);
            prop_assert!(stats.get(field) >= MIN_STAT);
            if value >= 1 && value <= u32::MAX as i64 {
                prop_assert_eq!(stats.get(field) as i64, value);
            }
        }

        #[test]
        fn prop_available_points_formula(level in 1i64..500, strength in 1i64..200, faith in 1i64..200) {
            let constants = BuildConstants::default();
            let mut stats = CharacterStats::default();
            stats.set(StatField::Level, level);
            stats.set(STRENGTH, strength);
            stats.set(StatField::Attribute(Attribute::Faith), faith);
            prop_assert_eq!(
                stats.available_points(&constants),
                80 + (level - 1) - stats.used_points()
            );
        }

        #[test]
        fn prop_mapping_and_sequence_agree(
            strength in 1i64..60,
            required_str in -5i64..60,
            required_arc in -5i64..60,
        ) {
            let mut stats = CharacterStats::default();
            stats.set(STRENGTH, strength);

            let sequence = raw(json!([
                { "name": "str", "amount": required_str },
                { "name": "arc", "amount": required_arc },
            ]));
            let mapping = raw(json!({ "str": required_str, "arc": required_arc }));

            prop_assert_eq!(
                meets_requirements(&stats, &sequence.normalize()),
                meets_requirements(&stats, &mapping.normalize())
            );
        }
    }
}
