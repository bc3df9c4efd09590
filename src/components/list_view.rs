//! The whole screen: search header, card grid, compare panel, footer.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
    Frame,
};
use crossterm::event::KeyModifiers;
use tui_dispatch::{EventKind, HandlerResponse};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::theme::{
    ACCENT_GOLD, ACCENT_RED, ACCENT_TEAL, BG_BASE, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use super::{
    Component, ComparePanel, ComparePanelProps, PokemonGrid, PokemonGridProps, SearchBar,
    SearchBarProps,
};
use crate::action::Action;
use crate::api::sprite_url;
use crate::layout::{COMPARE_PANEL_HEIGHT, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::sprite_backend;
use crate::state::AppState;

const COMPARE_BUTTON_WIDTH: u16 = 24;

pub struct PokemonListViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

pub struct PokemonListView {
    search_bar: SearchBar,
    grid: PokemonGrid,
    compare: ComparePanel,
    status_bar: StatusBar,
}

impl PokemonListView {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar,
            grid: PokemonGrid::new(),
            compare: ComparePanel,
            status_bar: StatusBar::new(),
        }
    }
}

impl Default for PokemonListView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component<Action> for PokemonListView {
    type Props<'a> = PokemonListViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if !props.is_focused {
            return Vec::new();
        }
        if state.search.active {
            return self
                .search_bar
                .handle_event(
                    event,
                    SearchBarProps {
                        query: &state.search.query,
                        active: true,
                    },
                )
                .into_iter()
                .collect();
        }
        let entries = state.visible();
        self.grid
            .handle_event(
                event,
                PokemonGridProps {
                    entries: &entries,
                    grid: state.grid(),
                    cursor: state.cursor,
                    offset: state.scroll_offset,
                    viewport: state.viewport_height(),
                    selection: &state.selection,
                    focused_sprite: None,
                    visibility: state.scroll_visibility(),
                    loading: state.pokemon.is_loading(),
                    query: &state.search.query,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        sprite_backend::clear_sprites();
        Block::default()
            .style(Style::default().bg(BG_BASE))
            .render(area, frame.buffer_mut());

        let panel_height = if state.compare_panel_visible() {
            COMPARE_PANEL_HEIGHT
        } else {
            0
        };
        let chunks = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(panel_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

        let header = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(COMPARE_BUTTON_WIDTH),
        ])
        .split(chunks[0]);
        self.search_bar.render(
            frame,
            header[0],
            SearchBarProps {
                query: &state.search.query,
                active: state.search.active,
            },
        );
        render_compare_button(frame, header[1], state);

        let entries = state.visible();
        self.grid.render(
            frame,
            chunks[1],
            PokemonGridProps {
                entries: &entries,
                grid: state.grid(),
                cursor: state.cursor,
                offset: state.scroll_offset,
                viewport: u32::from(chunks[1].height),
                selection: &state.selection,
                focused_sprite: state.focused().and_then(|pokemon| state.sprite(pokemon.id)),
                visibility: state.scroll_visibility(),
                loading: state.pokemon.is_loading(),
                query: &state.search.query,
                is_focused: props.is_focused && !state.search.active,
            },
        );

        if state.compare_panel_visible() {
            self.compare.render(
                frame,
                chunks[2],
                ComparePanelProps {
                    comparison: state.comparison(),
                    selection: &state.selection,
                    details: &state.compare_details,
                    sprites: state
                        .comparison()
                        .map(|(first, second)| [state.sprite_of(first), state.sprite_of(second)])
                        .unwrap_or_default(),
                },
            );
        }

        render_footer(frame, chunks[3], state, &mut self.status_bar);
    }
}

/// Wraps component output for the event bus.
///
/// The search bar is modal and swallows unhandled keys, except control
/// chords, which must still reach the global Ctrl+C handler.
pub fn event_response(
    actions: Vec<Action>,
    event: &EventKind,
    state: &AppState,
) -> HandlerResponse<Action> {
    let control_chord = matches!(
        event,
        EventKind::Key(key) if key.modifiers.contains(KeyModifiers::CONTROL)
    );
    if actions.is_empty() && (!state.search.active || control_chord) {
        return HandlerResponse::ignored();
    }
    HandlerResponse {
        actions,
        consumed: true,
        needs_render: false,
    }
}

fn render_compare_button(frame: &mut Frame, area: Rect, state: &AppState) {
    let (label, style) = if state.compare_mode.is_comparing() {
        (
            format!("Comparing {}/2", state.selection.filled()),
            Style::default()
                .fg(TEXT_MAIN)
                .bg(BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            "[c] Compare Pokémon".to_string(),
            Style::default().fg(ACCENT_GOLD).bg(BG_PANEL),
        )
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(TEXT_DIM))
        .style(style);
    frame.render_widget(
        Paragraph::new(Line::from(label))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let (status, color) = match (&state.message, state.focused()) {
        (Some(message), _) => (message.clone(), ACCENT_RED),
        (None, Some(pokemon)) => (sprite_url(pokemon.id), TEXT_DIM),
        (None, None) if state.pokemon.is_loading() => ("Loading...".to_string(), ACCENT_GOLD),
        (None, None) => (String::new(), TEXT_DIM),
    };
    let status_items = [StatusBarItem::span(Span::styled(
        status.as_str(),
        Style::default().fg(color),
    ))];
    let hints = status_hints(state);

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::empty(),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Keep"),
            StatusBarHint::new("Esc", "Clear"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    let mut hints = vec![
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("hjkl", "Move"),
    ];
    if state.compare_mode.is_comparing() {
        if !state.selection.is_full() {
            hints.push(StatusBarHint::new("Enter", "Pick"));
        }
    } else {
        hints.push(StatusBarHint::new("c", "Compare"));
    }
    let visibility = state.scroll_visibility();
    if visibility.show_top {
        hints.push(StatusBarHint::new("g", "Top"));
    }
    if visibility.show_bottom {
        hints.push(StatusBarHint::new("G", "Bottom"));
    }
    hints.push(StatusBarHint::new("q", "Quit"));
    hints
}
