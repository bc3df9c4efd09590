//! Reducer - (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::scroll::{ease_step, ScrollTarget};
use crate::selection::{self, CompareMode};
use crate::state::{AppState, Lifecycle};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    // A torn-down view ignores late task results and input.
    if !state.is_mounted() {
        return DispatchResult::unchanged();
    }

    match action {
        Action::Init => {
            if !state.pokemon.is_empty() {
                return DispatchResult::unchanged();
            }
            state.pokemon = DataResource::Loading;
            state.message = None;
            DispatchResult::changed_with(Effect::LoadPokemon {
                api_base: state.config.api_base.clone(),
                limit: state.config.fetch_limit,
            })
        }

        Action::PokemonDidLoad(entries) => {
            state.pokemon = DataResource::Loaded(entries);
            state.cursor = 0;
            state.clamp_view();
            changed_with(focused_sprite_effects(state))
        }

        Action::PokemonDidError(error) => {
            tracing::error!(%error, "error fetching pokemon data");
            state.message = Some(format!("Could not load Pokémon: {error}"));
            state.pokemon = DataResource::Failed(error);
            state.clamp_view();
            DispatchResult::changed()
        }

        Action::SearchStart => {
            if state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = true;
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            changed_with(query_changed(state))
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            changed_with(query_changed(state))
        }

        Action::SearchSubmit => {
            if !state.search.active {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            if !state.search.active && state.search.query.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.active = false;
            state.search.query.clear();
            changed_with(query_changed(state))
        }

        Action::ScrollBy(delta) => {
            let was_animating = state.scroll_target.take().is_some();
            let metrics = state.scroll_metrics();
            let next = metrics.clamp(i64::from(state.scroll_offset) + i64::from(delta));
            if next == state.scroll_offset && !was_animating {
                return DispatchResult::unchanged();
            }
            state.scroll_offset = next;
            DispatchResult::changed()
        }

        Action::ScrollToTop => start_scroll(state, ScrollTarget::Top),
        Action::ScrollToBottom => start_scroll(state, ScrollTarget::Bottom),

        Action::CursorMove(delta) => {
            let count = state.visible_count();
            if count == 0 {
                return DispatchResult::unchanged();
            }
            let last = (count - 1) as i64;
            let next = (state.cursor as i64 + i64::from(delta)).clamp(0, last) as usize;
            if next == state.cursor {
                return DispatchResult::unchanged();
            }
            state.cursor = next;
            state.scroll_target = None;
            let viewport = state.viewport_height();
            state.scroll_offset = state.grid().reveal(next, state.scroll_offset, viewport);
            changed_with(focused_sprite_effects(state))
        }

        Action::CompareStart => {
            if state.compare_mode == CompareMode::Comparing {
                return DispatchResult::unchanged();
            }
            state.compare_mode = CompareMode::Comparing;
            state.clamp_view();
            tracing::debug!("compare mode started");
            DispatchResult::changed()
        }

        Action::CardActivate(name) => {
            let next = selection::activate(state.compare_mode, &state.selection, &name);
            if next == state.selection {
                return DispatchResult::unchanged();
            }
            let completed = !state.selection.is_full() && next.is_full();
            state.selection = next;
            tracing::debug!(
                %name,
                filled = state.selection.filled(),
                "pokemon selected for comparison"
            );
            if !completed {
                return DispatchResult::changed();
            }
            changed_with(compare_detail_effects(state))
        }

        Action::CompareDetailDidLoad { name, detail } => {
            state
                .compare_details
                .insert(name, DataResource::Loaded(detail));
            DispatchResult::changed()
        }

        Action::CompareDetailDidError { name, error } => {
            tracing::warn!(%name, %error, "comparison detail failed");
            state
                .compare_details
                .insert(name, DataResource::Failed(error));
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { id, sprite } => {
            state.sprites.insert(id, DataResource::Loaded(sprite));
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, error } => {
            tracing::warn!(id, %error, "sprite unavailable");
            state.sprites.insert(id, DataResource::Failed(error));
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            state.clamp_view();
            DispatchResult::changed()
        }

        Action::Tick => {
            let Some(target) = state.scroll_target else {
                return DispatchResult::unchanged();
            };
            let destination = target.offset(&state.scroll_metrics());
            state.scroll_offset = ease_step(state.scroll_offset, destination);
            if state.scroll_offset == destination {
                state.scroll_target = None;
                return DispatchResult::changed();
            }
            DispatchResult::changed_with(Effect::ScheduleTick)
        }

        Action::Quit => {
            state.lifecycle = Lifecycle::Unmounted;
            state.scroll_target = None;
            tracing::info!("list view unmounted");
            DispatchResult::changed()
        }
    }
}

fn changed_with(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

fn query_changed(state: &mut AppState) -> Vec<Effect> {
    state.cursor = 0;
    state.clamp_view();
    focused_sprite_effects(state)
}

fn start_scroll(state: &mut AppState, target: ScrollTarget) -> DispatchResult<Effect> {
    let destination = target.offset(&state.scroll_metrics());
    if state.scroll_offset == destination {
        let was_animating = state.scroll_target.take().is_some();
        return if was_animating {
            DispatchResult::changed()
        } else {
            DispatchResult::unchanged()
        };
    }
    // A running animation already has a tick pending
    let running = state.scroll_target.replace(target).is_some();
    if running {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with(Effect::ScheduleTick)
    }
}

fn focused_sprite_effects(state: &mut AppState) -> Vec<Effect> {
    let id = state.focused().map(|pokemon| pokemon.id);
    sprite_effects(state, id)
}

/// One load per id that has never been requested; failures are not retried.
fn sprite_effects(state: &mut AppState, ids: impl IntoIterator<Item = u32>) -> Vec<Effect> {
    let mut effects = Vec::new();
    for id in ids {
        if state.sprites.contains_key(&id) {
            continue;
        }
        state.sprites.insert(id, DataResource::Loading);
        effects.push(Effect::LoadSprite { id });
    }
    effects
}

/// One load per distinct selected name that has not been requested yet.
fn compare_detail_effects(state: &mut AppState) -> Vec<Effect> {
    let Some((first, second)) = state.selection.both() else {
        return Vec::new();
    };
    let mut names = vec![first.to_string()];
    if second != first {
        names.push(second.to_string());
    }
    let ids: Vec<u32> = names.iter().filter_map(|name| state.id_of(name)).collect();
    let mut effects = Vec::new();
    for name in names {
        if matches!(
            state.compare_details.get(&name),
            Some(DataResource::Loading) | Some(DataResource::Loaded(_))
        ) {
            continue;
        }
        state
            .compare_details
            .insert(name.clone(), DataResource::Loading);
        effects.push(Effect::LoadCompareDetail {
            api_base: state.config.api_base.clone(),
            name,
        });
    }
    effects.extend(sprite_effects(state, ids));
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::SpriteData;
    use crate::state::{PokemonSummary, PokemonTypes};
    use pretty_assertions::assert_eq;

    fn loaded_state(count: u32) -> AppState {
        let entries = (1..=count)
            .map(|id| PokemonSummary::new(id, format!("mon{id}")))
            .collect();
        AppState {
            pokemon: DataResource::Loaded(entries),
            terminal_size: (80, 40),
            ..Default::default()
        }
    }

    #[test]
    fn init_requests_collection_once() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);
        assert!(result.changed);
        assert!(state.pokemon.is_loading());
        assert_eq!(result.effects.len(), 1);
        assert!(matches!(
            &result.effects[0],
            Effect::LoadPokemon { limit: 1025, .. }
        ));

        let again = reducer(&mut state, Action::Init);
        assert!(!again.changed);
        assert!(again.effects.is_empty());
    }

    #[test]
    fn load_stores_collection_verbatim() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        let entries = vec![
            PokemonSummary::new(25, "pikachu"),
            PokemonSummary::new(1, "bulbasaur"),
        ];
        reducer(&mut state, Action::PokemonDidLoad(entries.clone()));
        assert_eq!(state.collection(), entries.as_slice());
    }

    #[test]
    fn failed_load_leaves_collection_empty() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        let result = reducer(&mut state, Action::PokemonDidError("timeout".into()));
        assert!(result.changed);
        assert!(result.effects.is_empty());
        assert!(state.collection().is_empty());
        assert!(state.message.as_deref().unwrap().contains("timeout"));

        // still interactive
        assert!(reducer(&mut state, Action::SearchStart).changed);
        assert!(reducer(&mut state, Action::CompareStart).changed);
        assert!(reducer(&mut state, Action::CardActivate("pikachu".into())).changed);
    }

    #[test]
    fn typing_filters_and_resets_cursor() {
        let mut state = loaded_state(30);
        state.cursor = 20;
        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchInput('3'));
        assert_eq!(state.cursor, 0);
        let names: Vec<_> = state.visible().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["mon3", "mon13", "mon23", "mon30"]);

        reducer(&mut state, Action::SearchBackspace);
        assert_eq!(state.visible_count(), 30);
        assert!(!reducer(&mut state, Action::SearchBackspace).changed);
    }

    #[test]
    fn submit_keeps_query_cancel_clears_it() {
        let mut state = loaded_state(10);
        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchInput('7'));
        reducer(&mut state, Action::SearchSubmit);
        assert!(!state.search.active);
        assert_eq!(state.search.query, "7");

        reducer(&mut state, Action::SearchStart);
        reducer(&mut state, Action::SearchCancel);
        assert!(!state.search.active);
        assert!(state.search.query.is_empty());
    }

    #[test]
    fn scroll_by_clamps_to_content() {
        // 3 columns x 340 rows of cards = 2380 rows, viewport 34
        let mut state = loaded_state(1020);
        reducer(&mut state, Action::ScrollBy(-3));
        assert_eq!(state.scroll_offset, 0);
        reducer(&mut state, Action::ScrollBy(301));
        assert_eq!(state.scroll_offset, 301);
        assert!(state.scroll_visibility().show_top);
        reducer(&mut state, Action::ScrollBy(100_000));
        assert_eq!(state.scroll_offset, 2380 - 34);
        assert!(!state.scroll_visibility().show_bottom);
    }

    #[test]
    fn scroll_to_top_animates_until_reached() {
        let mut state = loaded_state(1020);
        state.scroll_offset = 900;
        let start = reducer(&mut state, Action::ScrollToTop);
        assert!(start.changed);
        assert_eq!(start.effects, vec![Effect::ScheduleTick]);
        assert_eq!(state.scroll_target, Some(ScrollTarget::Top));

        let mut ticks = 0;
        loop {
            let before = state.scroll_offset;
            let result = reducer(&mut state, Action::Tick);
            assert!(result.changed);
            assert!(state.scroll_offset < before);
            ticks += 1;
            assert!(ticks < 100);
            if state.scroll_target.is_none() {
                // the final step schedules nothing
                assert!(result.effects.is_empty());
                break;
            }
            assert_eq!(result.effects, vec![Effect::ScheduleTick]);
        }
        assert_eq!(state.scroll_offset, 0);
        assert!(ticks > 1);
        assert!(!reducer(&mut state, Action::Tick).changed);
    }

    #[test]
    fn restarting_a_running_scroll_keeps_one_tick_chain() {
        let mut state = loaded_state(1020);
        state.scroll_offset = 900;
        reducer(&mut state, Action::ScrollToTop);
        let retarget = reducer(&mut state, Action::ScrollToBottom);
        assert!(retarget.changed);
        assert!(retarget.effects.is_empty());
        assert_eq!(state.scroll_target, Some(ScrollTarget::Bottom));
    }

    #[test]
    fn manual_scroll_cancels_animation() {
        let mut state = loaded_state(1020);
        reducer(&mut state, Action::ScrollToBottom);
        reducer(&mut state, Action::Tick);
        reducer(&mut state, Action::ScrollBy(3));
        assert_eq!(state.scroll_target, None);
    }

    #[test]
    fn cursor_move_reveals_card() {
        let mut state = loaded_state(100);
        // row 20 of a 3-column grid
        reducer(&mut state, Action::CursorMove(60));
        assert_eq!(state.cursor, 60);
        assert_eq!(state.scroll_offset, 20 * 7 + 6 - 34);
        reducer(&mut state, Action::CursorMove(-60));
        assert_eq!(state.scroll_offset, 0);
        assert!(!reducer(&mut state, Action::CursorMove(-1)).changed);
    }

    #[test]
    fn focused_card_sprite_is_requested_once() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        state.terminal_size = (80, 40);
        let entries = (1..=9).map(|id| PokemonSummary::new(id, format!("mon{id}")));
        let loaded = reducer(&mut state, Action::PokemonDidLoad(entries.collect()));
        assert_eq!(loaded.effects, vec![Effect::LoadSprite { id: 1 }]);
        assert!(state.sprites[&1].is_loading());

        let moved = reducer(&mut state, Action::CursorMove(1));
        assert_eq!(moved.effects, vec![Effect::LoadSprite { id: 2 }]);
        let back = reducer(&mut state, Action::CursorMove(-1));
        assert!(back.changed);
        assert!(back.effects.is_empty());
    }

    #[test]
    fn sprite_results_are_cached_by_id() {
        let mut state = loaded_state(3);
        let sprite = SpriteData {
            payload: "iVBORw0KGgo=".into(),
            width: 96,
            height: 96,
        };
        reducer(
            &mut state,
            Action::SpriteDidLoad {
                id: 1,
                sprite: sprite.clone(),
            },
        );
        reducer(
            &mut state,
            Action::SpriteDidError {
                id: 2,
                error: "404".into(),
            },
        );
        assert_eq!(state.sprite(1), Some(&sprite));
        assert!(state.sprites[&2].is_failed());

        // a failed sprite is not fetched again
        let moved = reducer(&mut state, Action::CursorMove(1));
        assert!(moved.effects.is_empty());
    }

    #[test]
    fn completed_pair_requests_both_sprites() {
        let mut state = loaded_state(5);
        reducer(&mut state, Action::CompareStart);
        reducer(&mut state, Action::CardActivate("mon4".into()));
        let result = reducer(&mut state, Action::CardActivate("mon5".into()));
        let sprites: Vec<_> = result
            .effects
            .iter()
            .filter(|effect| matches!(effect, Effect::LoadSprite { .. }))
            .collect();
        assert_eq!(
            sprites,
            vec![&Effect::LoadSprite { id: 4 }, &Effect::LoadSprite { id: 5 }]
        );
        assert_eq!(result.effects.len(), 4);
    }

    #[test]
    fn browsing_activation_changes_nothing() {
        let mut state = loaded_state(3);
        let result = reducer(&mut state, Action::CardActivate("mon1".into()));
        assert!(!result.changed);
        assert_eq!(state.selection, Default::default());
    }

    #[test]
    fn second_selection_requests_details_for_both() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::CompareStart);
        let first = reducer(&mut state, Action::CardActivate("Pikachu".into()));
        assert!(first.changed);
        assert!(first.effects.is_empty());
        assert_eq!(state.comparison(), None);

        let second = reducer(&mut state, Action::CardActivate("Charmander".into()));
        assert_eq!(second.effects.len(), 2);
        assert_eq!(state.comparison(), Some(("Pikachu", "Charmander")));

        let third = reducer(&mut state, Action::CardActivate("Squirtle".into()));
        assert!(!third.changed);
        assert_eq!(state.selection.slot2.as_deref(), Some("Charmander"));
    }

    #[test]
    fn duplicate_pair_loads_detail_once() {
        let mut state = loaded_state(3);
        reducer(&mut state, Action::CompareStart);
        reducer(&mut state, Action::CardActivate("eevee".into()));
        let result = reducer(&mut state, Action::CardActivate("eevee".into()));
        assert_eq!(result.effects.len(), 1);
        assert_eq!(state.comparison(), Some(("eevee", "eevee")));
    }

    #[test]
    fn detail_results_are_stored_by_name() {
        let mut state = loaded_state(3);
        let detail = PokemonTypes {
            id: 4,
            name: "charmander".into(),
            types: vec!["fire".into()],
        };
        reducer(
            &mut state,
            Action::CompareDetailDidLoad {
                name: "charmander".into(),
                detail: detail.clone(),
            },
        );
        reducer(
            &mut state,
            Action::CompareDetailDidError {
                name: "onix".into(),
                error: "404".into(),
            },
        );
        assert_eq!(state.compare_details["charmander"].data(), Some(&detail));
        assert!(state.compare_details["onix"].is_failed());
    }

    #[test]
    fn nothing_mutates_after_quit() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        assert!(reducer(&mut state, Action::Quit).changed);

        let late = reducer(
            &mut state,
            Action::PokemonDidLoad(vec![PokemonSummary::new(1, "bulbasaur")]),
        );
        assert!(!late.changed);
        assert!(state.collection().is_empty());
        assert!(!reducer(&mut state, Action::ScrollBy(10)).changed);
        assert!(!reducer(&mut state, Action::Quit).changed);
    }
}
