//! Application state - single source of truth for the list view

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::filter;
use crate::layout::{self, GridLayout};
use crate::scroll::{ScrollMetrics, ScrollTarget, ScrollVisibility, SCROLL_BUTTON_THRESHOLD};
use crate::selection::{CompareMode, SelectionPair};
use crate::sprite::SpriteData;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_FETCH_LIMIT: u32 = 1025;

/// One record of the fetched collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
}

impl PokemonSummary {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Id and types shown by the comparison panel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonTypes {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

/// Startup options copied from the command line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub api_base: String,
    pub fetch_limit: u32,
    pub scroll_threshold: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            scroll_threshold: SCROLL_BUTTON_THRESHOLD,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    #[default]
    Mounted,
    Unmounted,
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "View", label = "Config", debug_fmt)]
    pub config: ViewConfig,

    #[debug(section = "View", label = "Lifecycle", debug_fmt)]
    pub lifecycle: Lifecycle,

    #[debug(section = "View", label = "Terminal", debug_fmt)]
    pub terminal_size: (u16, u16),

    /// Fetched once; stays empty when the fetch fails
    #[debug(skip)]
    pub pokemon: DataResource<Vec<PokemonSummary>>,

    #[debug(section = "Search", label = "Query", debug_fmt)]
    pub search: SearchState,

    /// Index into the filtered list
    #[debug(section = "Grid", label = "Cursor", debug_fmt)]
    pub cursor: usize,

    #[debug(section = "Grid", label = "Offset", debug_fmt)]
    pub scroll_offset: u32,

    #[debug(section = "Grid", label = "Animating", debug_fmt)]
    pub scroll_target: Option<ScrollTarget>,

    #[debug(section = "Compare", label = "Mode", debug_fmt)]
    pub compare_mode: CompareMode,

    #[debug(section = "Compare", label = "Selected", debug_fmt)]
    pub selection: SelectionPair,

    #[debug(skip)]
    pub compare_details: HashMap<String, DataResource<PokemonTypes>>,

    /// Decoded sprites by national dex id
    #[debug(skip)]
    pub sprites: HashMap<u32, DataResource<SpriteData>>,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            lifecycle: Lifecycle::Mounted,
            terminal_size: (80, 24),
            pokemon: DataResource::Empty,
            search: SearchState::default(),
            cursor: 0,
            scroll_offset: 0,
            scroll_target: None,
            compare_mode: CompareMode::Browsing,
            selection: SelectionPair::default(),
            compare_details: HashMap::new(),
            sprites: HashMap::new(),
            message: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// The full collection, empty until loaded (and after a failed load).
    pub fn collection(&self) -> &[PokemonSummary] {
        self.pokemon.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records matching the current search term, in collection order.
    pub fn visible(&self) -> Vec<&PokemonSummary> {
        filter::filter_pokemon(self.collection(), &self.search.query)
    }

    pub fn visible_count(&self) -> usize {
        self.collection()
            .iter()
            .filter(|entry| filter::matches(entry, &self.search.query))
            .count()
    }

    pub fn focused(&self) -> Option<&PokemonSummary> {
        self.visible().get(self.cursor).copied()
    }

    /// The two names to compare; `None` unless comparing with both slots set.
    pub fn comparison(&self) -> Option<(&str, &str)> {
        if !self.compare_mode.is_comparing() {
            return None;
        }
        self.selection.both()
    }

    /// Dex id of a named record, from the collection or a loaded detail.
    pub fn id_of(&self, name: &str) -> Option<u32> {
        self.collection()
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.id)
            .or_else(|| {
                self.compare_details
                    .get(name)
                    .and_then(DataResource::data)
                    .map(|detail| detail.id)
            })
    }

    pub fn sprite(&self, id: u32) -> Option<&SpriteData> {
        self.sprites.get(&id).and_then(DataResource::data)
    }

    pub fn sprite_of(&self, name: &str) -> Option<&DataResource<SpriteData>> {
        self.id_of(name).and_then(|id| self.sprites.get(&id))
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    pub fn compare_panel_visible(&self) -> bool {
        self.compare_mode.is_comparing()
    }

    pub fn grid(&self) -> GridLayout {
        GridLayout::for_width(self.terminal_size.0)
    }

    pub fn viewport_height(&self) -> u32 {
        u32::from(layout::viewport_height(
            self.terminal_size.1,
            self.compare_panel_visible(),
        ))
    }

    pub fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(
            self.scroll_offset,
            self.grid().content_height(self.visible_count()),
            self.viewport_height(),
        )
    }

    pub fn scroll_visibility(&self) -> ScrollVisibility {
        ScrollVisibility::from_metrics(&self.scroll_metrics(), self.config.scroll_threshold)
    }

    /// Pulls offset and cursor back inside the current content.
    pub fn clamp_view(&mut self) {
        let count = self.visible_count();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
        let metrics = self.scroll_metrics();
        self.scroll_offset = metrics.clamp(i64::from(self.scroll_offset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loaded(count: u32) -> AppState {
        let entries = (1..=count)
            .map(|id| PokemonSummary::new(id, format!("mon{id}")))
            .collect();
        AppState {
            pokemon: DataResource::Loaded(entries),
            ..Default::default()
        }
    }

    #[test]
    fn collection_is_empty_before_and_after_failed_load() {
        let mut state = AppState::default();
        assert!(state.collection().is_empty());
        state.pokemon = DataResource::Failed("offline".into());
        assert!(state.collection().is_empty());
        assert!(state.visible().is_empty());
    }

    #[test]
    fn comparison_needs_mode_and_full_pair() {
        let mut state = loaded(3);
        state.selection = SelectionPair {
            slot1: Some("mon1".into()),
            slot2: Some("mon2".into()),
        };
        assert_eq!(state.comparison(), None);
        state.compare_mode = CompareMode::Comparing;
        assert_eq!(state.comparison(), Some(("mon1", "mon2")));
        state.selection.slot2 = None;
        assert_eq!(state.comparison(), None);
    }

    #[test]
    fn metrics_follow_filter_and_terminal() {
        let mut state = loaded(30);
        state.terminal_size = (80, 40);
        // 3 columns, 10 rows
        assert_eq!(state.scroll_metrics().content_height, 10 * 7);
        assert_eq!(state.scroll_metrics().viewport_height, 34);
        state.search.query = "mon3".into();
        // mon3, mon30
        assert_eq!(state.visible_count(), 2);
        assert_eq!(state.scroll_metrics().content_height, 7);
    }

    #[test]
    fn clamp_view_after_content_shrinks() {
        let mut state = loaded(300);
        state.terminal_size = (80, 40);
        state.scroll_offset = 400;
        state.cursor = 250;
        state.search.query = "mon29".into();
        state.clamp_view();
        // mon29, mon290..mon299
        assert_eq!(state.cursor, 10);
        assert_eq!(state.scroll_offset, 0);
    }

    #[test]
    fn id_lookup_falls_back_to_loaded_detail() {
        let mut state = loaded(3);
        assert_eq!(state.id_of("mon2"), Some(2));
        assert_eq!(state.id_of("eevee"), None);
        state.compare_details.insert(
            "eevee".into(),
            DataResource::Loaded(PokemonTypes {
                id: 133,
                name: "eevee".into(),
                types: vec!["normal".into()],
            }),
        );
        assert_eq!(state.id_of("eevee"), Some(133));
        assert!(state.sprite_of("eevee").is_none());
    }
}
