use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::theme::{ACCENT_TEAL, BG_SEARCH, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;

pub const PLACEHOLDER: &str = "Search for Pokémon...";

#[derive(Clone, Copy)]
pub struct SearchBarProps<'a> {
    pub query: &'a str,
    /// Receiving keystrokes
    pub active: bool,
}

#[derive(Default)]
pub struct SearchBar;

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.active {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchSubmit),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_style = if props.active {
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" / ")
            .style(Style::default().bg(BG_SEARCH).fg(TEXT_MAIN));
        let inner = block.inner(area);

        let line = if props.query.is_empty() {
            Line::from(Span::styled(PLACEHOLDER, Style::default().fg(TEXT_DIM)))
        } else {
            Line::from(Span::raw(props.query))
        };
        frame.render_widget(Paragraph::new(line).block(block), area);

        if props.active && inner.width > 0 && inner.height > 0 {
            let typed = props.query.chars().count() as u16;
            let x = inner.x + typed.min(inner.width - 1);
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }
}
