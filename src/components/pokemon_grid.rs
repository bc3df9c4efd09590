use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_TEAL, BG_PANEL, TEXT_DIM};
use super::{Component, PokemonCard, PokemonCardProps};
use crate::action::Action;
use crate::layout::{GridLayout, ROW_PITCH};
use crate::scroll::{ScrollVisibility, WHEEL_STEP};
use crate::selection::SelectionPair;
use crate::sprite::SpriteData;
use crate::state::PokemonSummary;

pub const TOP_BUTTON: &str = "[\u{21e7} top]";
pub const BOTTOM_BUTTON: &str = "[bottom \u{21e9}]";

pub struct PokemonGridProps<'a> {
    pub entries: &'a [&'a PokemonSummary],
    pub grid: GridLayout,
    pub cursor: usize,
    pub offset: u32,
    pub viewport: u32,
    pub selection: &'a SelectionPair,
    /// Sprite of the card under the cursor, once loaded
    pub focused_sprite: Option<&'a SpriteData>,
    pub visibility: ScrollVisibility,
    pub loading: bool,
    pub query: &'a str,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct PokemonGrid {
    card: PokemonCard,
}

impl PokemonGrid {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for PokemonGrid {
    type Props<'a> = PokemonGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let columns = i32::from(props.grid.columns);
        let page = props.viewport.max(1) as i32;
        match event {
            // Control chords belong to the global handlers (Ctrl+C quits)
            EventKind::Key(key) if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            EventKind::Key(key) => match key.code {
                KeyCode::Left | KeyCode::Char('h') => Some(Action::CursorMove(-1)),
                KeyCode::Right | KeyCode::Char('l') => Some(Action::CursorMove(1)),
                KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorMove(-columns)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorMove(columns)),
                KeyCode::PageUp => Some(Action::ScrollBy(-page)),
                KeyCode::PageDown => Some(Action::ScrollBy(page)),
                KeyCode::Enter | KeyCode::Char(' ') => props
                    .entries
                    .get(props.cursor)
                    .map(|entry| Action::CardActivate(entry.name.clone())),
                // Hidden buttons cannot be pressed
                KeyCode::Home | KeyCode::Char('g') if props.visibility.show_top => {
                    Some(Action::ScrollToTop)
                }
                KeyCode::End | KeyCode::Char('G') if props.visibility.show_bottom => {
                    Some(Action::ScrollToBottom)
                }
                KeyCode::Char('c') => Some(Action::CompareStart),
                KeyCode::Char('/') => Some(Action::SearchStart),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            EventKind::Scroll { delta, .. } if *delta != 0 => {
                Some(Action::ScrollBy((*delta).signum() as i32 * WHEEL_STEP))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.render_widget(
            Block::default().style(Style::default().bg(BG_PANEL)),
            area,
        );

        if props.entries.is_empty() {
            let message = if props.loading {
                "Loading Pokémon...".to_string()
            } else if props.query.is_empty() {
                "No Pokémon to show.".to_string()
            } else {
                format!("No Pokémon match \"{}\".", props.query)
            };
            let line = Line::styled(message, Style::default().fg(TEXT_DIM));
            let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
            frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
            return;
        }

        let first_row = props.offset / ROW_PITCH;
        let first = first_row as usize * usize::from(props.grid.columns);
        for (index, pokemon) in props.entries.iter().copied().enumerate().skip(first) {
            let Some(rect) = props.grid.card_rect(area, index, props.offset) else {
                if props.grid.card_top(index) > props.offset + u32::from(area.height) {
                    break;
                }
                continue;
            };
            self.card.render(
                frame,
                rect,
                PokemonCardProps {
                    pokemon,
                    selected: props.selection.contains(&pokemon.name),
                    focused: props.is_focused && index == props.cursor,
                    sprite: props.focused_sprite.filter(|_| index == props.cursor),
                },
            );
        }

        render_scroll_buttons(frame, area, props.visibility);
    }
}

fn render_scroll_buttons(frame: &mut Frame, area: Rect, visibility: ScrollVisibility) {
    let style = Style::default()
        .fg(ACCENT_TEAL)
        .bg(BG_PANEL)
        .add_modifier(Modifier::BOLD);
    let row = area.bottom() - 1;
    if visibility.show_top {
        let width = (TOP_BUTTON.chars().count() as u16).min(area.width);
        frame.render_widget(
            Paragraph::new(Line::styled(TOP_BUTTON, style)),
            Rect::new(area.x, row, width, 1),
        );
    }
    if visibility.show_bottom {
        let width = (BOTTOM_BUTTON.chars().count() as u16).min(area.width);
        frame.render_widget(
            Paragraph::new(Line::styled(BOTTOM_BUTTON, style)),
            Rect::new(area.right() - width, row, width, 1),
        );
    }
}
