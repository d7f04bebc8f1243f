//! Application state

use build_core::{
    Catalog, CatalogItem, Category, CharacterBuild, FavoriteItem, Favorites, Persistence,
    StatField,
};
use std::collections::HashSet;
use std::num::IntErrorKind;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Character,
    Weapons,
    Armor,
    Spells,
    Items,
    Favorites,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Character,
            Tab::Weapons,
            Tab::Armor,
            Tab::Spells,
            Tab::Items,
            Tab::Favorites,
            Tab::Help,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Character => "Character",
            Tab::Weapons => "Weapons",
            Tab::Armor => "Armor",
            Tab::Spells => "Spells",
            Tab::Items => "Items",
            Tab::Favorites => "Favorites",
            Tab::Help => "Help",
        }
    }

    /// Catalog categories browsable from this tab
    pub fn categories(&self) -> &'static [Category] {
        match self {
            Tab::Weapons => &[Category::Weapons, Category::Shields],
            Tab::Armor => &[Category::Armors],
            Tab::Spells => &[Category::Sorceries, Category::Incantations],
            Tab::Items => &[
                Category::Items,
                Category::Talismans,
                Category::Spirits,
                Category::Ashes,
            ],
            Tab::Character | Tab::Favorites | Tab::Help => &[],
        }
    }

    pub fn is_catalog(&self) -> bool {
        !self.categories().is_empty()
    }
}

/// What typed characters currently feed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a catalog name filter
    Search,
    /// Typing a value for the selected stat
    StatEntry,
    /// Waiting for `y` to confirm a reset
    ConfirmReset,
}

pub struct App {
    pub current_tab: Tab,
    pub build: CharacterBuild,
    pub favorites: Favorites,
    pub catalog: Catalog,
    persistence: Persistence,
    pub input_mode: InputMode,
    // Character tab
    pub selected_stat: usize,
    pub stat_input: String,
    // Catalog tabs
    pub category_index: usize,
    pub selected_item: usize,
    pub search_query: String,
    pub equippable_only: bool,
    pub expanded: HashSet<String>,
    // Favorites tab
    pub selected_favorite: usize,
    pub status: Option<String>,
}

impl App {
    pub fn new(
        build: CharacterBuild,
        favorites: Favorites,
        catalog: Catalog,
        persistence: Persistence,
    ) -> Self {
        App {
            current_tab: Tab::Character,
            build,
            favorites,
            catalog,
            persistence,
            input_mode: InputMode::Normal,
            selected_stat: 0,
            stat_input: String::new(),
            category_index: 0,
            selected_item: 0,
            search_query: String::new(),
            equippable_only: false,
            expanded: HashSet::new(),
            selected_favorite: 0,
            status: None,
        }
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.switch_to(tabs[next_idx]);
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.switch_to(tabs[prev_idx]);
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.switch_to(tabs[index]);
        }
    }

    fn switch_to(&mut self, tab: Tab) {
        if tab != self.current_tab {
            self.current_tab = tab;
            self.category_index = 0;
            self.selected_item = 0;
            self.search_query.clear();
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    pub fn on_up(&mut self) {
        match self.current_tab {
            Tab::Character => {
                if self.selected_stat > 0 {
                    self.selected_stat -= 1;
                }
            }
            Tab::Favorites => {
                if self.selected_favorite > 0 {
                    self.selected_favorite -= 1;
                }
            }
            tab if tab.is_catalog() => {
                if self.selected_item > 0 {
                    self.selected_item -= 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_down(&mut self) {
        match self.current_tab {
            Tab::Character => {
                if self.selected_stat < StatField::all().len() - 1 {
                    self.selected_stat += 1;
                }
            }
            Tab::Favorites => {
                if self.selected_favorite < self.favorites.len().saturating_sub(1) {
                    self.selected_favorite += 1;
                }
            }
            tab if tab.is_catalog() => {
                if self.selected_item < self.visible_items().len().saturating_sub(1) {
                    self.selected_item += 1;
                }
            }
            _ => {}
        }
    }

    pub fn on_left(&mut self) {
        match self.current_tab {
            Tab::Character => self.build.decrement(self.current_stat()),
            tab if tab.is_catalog() => {
                let count = tab.categories().len();
                self.category_index = (self.category_index + count - 1) % count;
                self.selected_item = 0;
            }
            _ => {}
        }
    }

    pub fn on_right(&mut self) {
        match self.current_tab {
            Tab::Character => self.build.increment(self.current_stat()),
            tab if tab.is_catalog() => {
                let count = tab.categories().len();
                self.category_index = (self.category_index + 1) % count;
                self.selected_item = 0;
            }
            _ => {}
        }
    }

    pub fn on_enter(&mut self) {
        if self.current_tab == Tab::Character {
            self.start_stat_entry();
            return;
        }
        if let Some(id) = self.selected_catalog_item().map(|item| item.id.clone()) {
            if !self.expanded.remove(&id) {
                self.expanded.insert(id);
            }
        }
    }

    /// Currently selected field on the Character tab
    pub fn current_stat(&self) -> StatField {
        let fields = StatField::all();
        fields[self.selected_stat.min(fields.len() - 1)]
    }

    pub fn start_stat_entry(&mut self) {
        if self.current_tab == Tab::Character {
            self.stat_input.clear();
            self.input_mode = InputMode::StatEntry;
        }
    }

    pub fn push_stat_char(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '-' && self.stat_input.is_empty()) {
            self.stat_input.push(c);
        }
    }

    /// Apply the typed value. Overflowing input saturates, anything else
    /// unparsable counts as 1.
    pub fn commit_stat_entry(&mut self) {
        let value = match self.stat_input.parse::<i64>() {
            Ok(value) => value,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => 1,
            },
        };
        self.build.update_stat(self.current_stat(), value);
        self.stat_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_input(&mut self) {
        self.stat_input.clear();
        self.input_mode = InputMode::Normal;
    }

    pub fn request_reset(&mut self) {
        if self.current_tab == Tab::Character {
            self.input_mode = InputMode::ConfirmReset;
            self.status = Some("Reset all stats to default values? [y/N]".to_string());
        }
    }

    pub fn confirm_reset(&mut self) {
        self.build.reset_stats();
        self.input_mode = InputMode::Normal;
        self.status = Some("Character reset".to_string());
    }

    pub fn cancel_reset(&mut self) {
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    pub fn start_search(&mut self) {
        if self.current_tab.is_catalog() {
            self.input_mode = InputMode::Search;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_query.push(c);
        self.selected_item = 0;
    }

    pub fn pop_search_char(&mut self) {
        self.search_query.pop();
        self.selected_item = 0;
    }

    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn toggle_equippable(&mut self) {
        if self.current_tab.is_catalog() {
            self.equippable_only = !self.equippable_only;
            self.selected_item = 0;
        }
    }

    /// Toggle the selected catalog item, or remove the selected favorite
    pub fn toggle_favorite(&mut self) {
        match self.current_tab {
            Tab::Favorites => {
                if let Some(fav) = self.favorites.items().get(self.selected_favorite).cloned() {
                    self.favorites.remove(&fav.id);
                    self.selected_favorite =
                        self.selected_favorite.min(self.favorites.len().saturating_sub(1));
                    self.status = Some(format!("Removed {} from favorites", fav.name));
                }
            }
            _ => {
                let Some(category) = self.current_category() else {
                    return;
                };
                let Some(favorite) = self
                    .selected_catalog_item()
                    .map(|item| FavoriteItem::from_catalog(category, item))
                else {
                    return;
                };
                let name = favorite.name.clone();
                let added = self.favorites.toggle(favorite);
                self.status = Some(if added {
                    format!("Added {} to favorites", name)
                } else {
                    format!("Removed {} from favorites", name)
                });
            }
        }
    }

    pub fn current_category(&self) -> Option<Category> {
        let categories = self.current_tab.categories();
        categories.get(self.category_index.min(categories.len().saturating_sub(1))).copied()
    }

    /// Catalog items shown for the current tab, search and filter
    pub fn visible_items(&self) -> Vec<&CatalogItem> {
        let Some(category) = self.current_category() else {
            return Vec::new();
        };
        self.catalog
            .search(category, &self.search_query)
            .into_iter()
            .filter(|item| !self.equippable_only || self.is_equippable(category, item))
            .collect()
    }

    /// Categories without stat requirements are always equippable
    pub fn is_equippable(&self, category: Category, item: &CatalogItem) -> bool {
        !category.has_requirements() || self.build.can_equip_item(item)
    }

    pub fn selected_catalog_item(&self) -> Option<&CatalogItem> {
        self.visible_items().get(self.selected_item).copied()
    }

    pub fn is_expanded(&self, item: &CatalogItem) -> bool {
        self.expanded.contains(&item.id)
    }

    /// Wait for queued writes and stop the persistence worker
    pub async fn shutdown(&self) {
        self.persistence.flush().await;
        self.persistence.shutdown();
        info!("Application state flushed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use build_core::{BuildConstants, MemoryStore, Requirement};
    use std::sync::Arc;

    async fn app() -> App {
        let persistence = Persistence::spawn(Arc::new(MemoryStore::new()));
        let build = CharacterBuild::load(persistence.clone(), BuildConstants::default()).await;
        let favorites = Favorites::new(persistence.clone(), "favorites");

        let mut catalog = Catalog::new();
        catalog.insert(
            Category::Weapons,
            vec![
                CatalogItem::new("w1", "Dagger"),
                CatalogItem::new("w2", "Greataxe")
                    .with_required_attributes(vec![Requirement::new("Str", Some(30))]),
            ],
        );
        catalog.insert(Category::Shields, vec![CatalogItem::new("s1", "Buckler")]);
        catalog.insert(
            Category::Armors,
            vec![CatalogItem::new("a1", "Bull-Goat Helm")
                .with_required_attributes(vec![Requirement::new("Str", Some(99))])],
        );

        App::new(build, favorites, catalog, persistence)
    }

    #[tokio::test]
    async fn test_tab_cycle() {
        let mut app = app().await;
        app.prev_tab();
        assert_eq!(app.current_tab, Tab::Help);
        app.next_tab();
        assert_eq!(app.current_tab, Tab::Character);
        app.set_tab(1);
        assert_eq!(app.current_tab, Tab::Weapons);
    }

    #[tokio::test]
    async fn test_stat_adjustment() {
        let mut app = app().await;
        app.on_down();
        assert_eq!(app.current_stat().name(), "vigor");
        app.on_right();
        assert_eq!(app.build.stats().vigor, 11);
        app.on_left();
        app.on_left();
        assert_eq!(app.build.stats().vigor, 9);
    }

    #[tokio::test]
    async fn test_stat_entry_commits_clamped_value() {
        let mut app = app().await;
        app.on_enter();
        assert_eq!(app.input_mode, InputMode::StatEntry);
        app.push_stat_char('-');
        app.push_stat_char('7');
        app.commit_stat_entry();
        assert_eq!(app.build.stats().level, 1);

        app.start_stat_entry();
        app.push_stat_char('4');
        app.push_stat_char('x');
        app.push_stat_char('2');
        app.commit_stat_entry();
        assert_eq!(app.build.stats().level, 42);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[tokio::test]
    async fn test_stat_entry_saturates_overflow() {
        let mut app = app().await;
        app.start_stat_entry();
        for _ in 0..25 {
            app.push_stat_char('9');
        }
        app.commit_stat_entry();
        assert_eq!(app.build.stats().level, u32::MAX);

        app.start_stat_entry();
        app.push_stat_char('-');
        for _ in 0..25 {
            app.push_stat_char('9');
        }
        app.commit_stat_entry();
        assert_eq!(app.build.stats().level, 1);
    }

    #[tokio::test]
    async fn test_reset_requires_confirmation() {
        let mut app = app().await;
        app.on_right();
        app.request_reset();
        assert_eq!(app.input_mode, InputMode::ConfirmReset);
        app.cancel_reset();
        assert_eq!(app.build.stats().level, 2);

        app.request_reset();
        app.confirm_reset();
        assert_eq!(app.build.stats().level, 1);
    }

    #[tokio::test]
    async fn test_catalog_navigation_and_filter() {
        let mut app = app().await;
        app.set_tab(1);
        assert_eq!(app.current_category(), Some(Category::Weapons));
        assert_eq!(app.visible_items().len(), 2);

        app.toggle_equippable();
        let names: Vec<_> = app.visible_items().iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Dagger"]);

        app.on_right();
        assert_eq!(app.current_category(), Some(Category::Shields));
        app.on_right();
        assert_eq!(app.current_category(), Some(Category::Weapons));
    }

    #[tokio::test]
    async fn test_equippable_filter_ignores_categories_without_requirements() {
        let mut app = app().await;
        app.set_tab(2);
        assert_eq!(app.current_category(), Some(Category::Armors));
        app.toggle_equippable();

        let visible = app.visible_items();
        assert_eq!(visible.len(), 1);
        assert!(app.is_equippable(Category::Armors, visible[0]));
        assert!(!app.build.can_equip_item(visible[0]));
    }

    #[tokio::test]
    async fn test_search() {
        let mut app = app().await;
        app.set_tab(1);
        app.start_search();
        for c in "AXE".chars() {
            app.push_search_char(c);
        }
        app.finish_search();
        assert_eq!(app.visible_items().len(), 1);
        assert_eq!(app.selected_catalog_item().map(|i| i.id.as_str()), Some("w2"));
    }

    #[tokio::test]
    async fn test_favorite_toggle_and_remove() {
        let mut app = app().await;
        app.set_tab(1);
        app.toggle_favorite();
        assert!(app.favorites.is_favorite("w1"));
        assert_eq!(app.favorites.items()[0].kind, Category::Weapons);

        app.set_tab(5);
        app.toggle_favorite();
        assert!(app.favorites.is_empty());
    }

    #[tokio::test]
    async fn test_expand_details() {
        let mut app = app().await;
        app.set_tab(1);
        app.on_enter();
        assert!(app.expanded.contains("w1"));
        app.on_enter();
        assert!(app.expanded.is_empty());
    }
}
