//! pokelist - browse, search and compare Pokémon in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

use pokelist::action::Action;
use pokelist::api;
use pokelist::components::list_view::event_response;
use pokelist::components::{Component, PokemonListView, PokemonListViewProps};
use pokelist::effect::Effect;
use pokelist::logging;
use pokelist::reducer::reducer;
use pokelist::scroll::SCROLL_BUTTON_THRESHOLD;
use pokelist::sprite;
use pokelist::sprite_backend::{self, SpriteBackend};
use pokelist::state::{AppState, ViewConfig, DEFAULT_API_BASE, DEFAULT_FETCH_LIMIT};
use pokelist::terminal::TerminalSession;

const TICK_MS: u64 = 16;

/// Searchable Pokémon grid with a compare mode
#[derive(Parser, Debug)]
#[command(name = "pokelist")]
#[command(about = "Browse, search and compare Pokémon from PokeAPI")]
struct Args {
    /// Number of Pokémon to request (minimum 1)
    #[arg(
        long,
        default_value_t = DEFAULT_FETCH_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    limit: u32,

    /// Rows scrolled past before the top/bottom buttons appear
    #[arg(long, default_value_t = SCROLL_BUTTON_THRESHOLD)]
    scroll_threshold: u32,

    /// PokeAPI base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ListComponentId {
    Grid,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ListContext {
    Main,
    Search,
}

impl EventRoutingState<ListComponentId, ListContext> for AppState {
    fn focused(&self) -> Option<ListComponentId> {
        if self.search.active {
            Some(ListComponentId::Search)
        } else {
            Some(ListComponentId::Grid)
        }
    }

    fn modal(&self) -> Option<ListComponentId> {
        if self.search.active {
            Some(ListComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: ListComponentId) -> ListContext {
        match id {
            ListComponentId::Grid => ListContext::Main,
            ListComponentId::Search => ListContext::Search,
        }
    }

    fn default_context(&self) -> ListContext {
        ListContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        limit,
        scroll_threshold,
        api_base,
        log_dir,
        debug: debug_args,
    } = Args::parse();

    let log_dir = log_dir.unwrap_or_else(logging::default_log_dir);
    logging::init(&log_dir)?;

    let debug = DebugSession::new(debug_args);

    let config = ViewConfig {
        api_base,
        fetch_limit: limit,
        scroll_threshold,
    };
    let mut state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(config))
        })
        .await
        .map_err(debug_error)?;
    if let Ok(size) = crossterm::terminal::size() {
        state.terminal_size = size;
    }

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let mut stdout = io::stdout();
    let session = TerminalSession::acquire(&mut stdout, debug.use_alt_screen())?;
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_registry());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if session.is_active() {
        terminal.show_cursor()?;
    }
    session.release()?;

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("pokelist exiting");
    Ok(())
}

struct ListUi {
    view: PokemonListView,
}

impl ListUi {
    fn new() -> Self {
        Self {
            view: PokemonListView::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ListComponentId>,
    ) {
        event_ctx.set_component_area(ListComponentId::Grid, area);
        if state.search.active {
            event_ctx.set_component_area(ListComponentId::Search, area);
        } else {
            event_ctx.component_areas.remove(&ListComponentId::Search);
        }

        let props = PokemonListViewProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = PokemonListViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
        event_response(actions, event, state)
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ListUi::new()));
    let mut bus: EventBus<AppState, Action, ListComponentId, ListContext> = EventBus::new();
    let keybindings: Keybindings<ListContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(ListComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(ListComponentId::Search, move |event, state| {
        ui_search.borrow_mut().handle_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key)
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') =>
        {
            HandlerResponse::action(Action::Quit)
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            // Animation ticks are scheduled by effects, not a standing interval
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut().render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadPokemon { api_base, limit } => {
            ctx.tasks().spawn(TaskKey::new("pokemon"), async move {
                match api::fetch_all_pokemon(&api_base, limit).await {
                    Ok(pokemon) => Action::PokemonDidLoad(pokemon),
                    Err(e) => Action::PokemonDidError(e.to_string()),
                }
            });
        }
        Effect::LoadCompareDetail { api_base, name } => {
            let key = TaskKey::new(format!("compare_{name}"));
            ctx.tasks().spawn(key, async move {
                match api::fetch_pokemon_types(&api_base, &name).await {
                    Ok(detail) => Action::CompareDetailDidLoad { name, detail },
                    Err(e) => Action::CompareDetailDidError {
                        name,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::LoadSprite { id } => {
            ctx.tasks().spawn(TaskKey::new(format!("sprite_{id}")), async move {
                match api::fetch_sprite(id).await {
                    Ok(bytes) => match sprite::decode_sprite(&bytes) {
                        Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                        Err(e) => Action::SpriteDidError {
                            id,
                            error: e.to_string(),
                        },
                    },
                    Err(e) => Action::SpriteDidError {
                        id,
                        error: e.to_string(),
                    },
                }
            });
        }
        Effect::ScheduleTick => {
            ctx.tasks().spawn(TaskKey::new("scroll_tick"), async {
                tokio::time::sleep(Duration::from_millis(TICK_MS)).await;
                Action::Tick
            });
        }
    }
}
