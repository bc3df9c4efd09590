use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::theme::{ACCENT_GOLD, ACCENT_TEAL, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::Component;
use crate::action::Action;
use crate::layout::CARD_HEIGHT;
use crate::sprite::{self, SpriteData};
use crate::sprite_backend;
use crate::state::PokemonSummary;

pub const SELECTED_MARKER: &str = "\u{2605}";
/// kitty image id of the sprite drawn in the focused card
pub const CARD_IMAGE_ID: u32 = 1;

#[derive(Clone, Copy)]
pub struct PokemonCardProps<'a> {
    pub pokemon: &'a PokemonSummary,
    /// Name is in one of the compare slots
    pub selected: bool,
    /// Card under the keyboard cursor
    pub focused: bool,
    pub sprite: Option<&'a SpriteData>,
}

#[derive(Default)]
pub struct PokemonCard;

impl Component<Action> for PokemonCard {
    type Props<'a> = PokemonCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border_style = if props.focused {
            Style::default().fg(ACCENT_TEAL).add_modifier(Modifier::BOLD)
        } else if props.selected {
            Style::default().fg(ACCENT_GOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let bg = if props.focused { BG_HIGHLIGHT } else { BG_PANEL };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if props.selected {
                BorderType::Double
            } else {
                BorderType::Rounded
            })
            .border_style(border_style)
            .style(Style::default().bg(bg).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Clipped cards scroll under the header; the image would overflow them
        let sprite = props.sprite.filter(|_| area.height >= CARD_HEIGHT);
        let text_area = match sprite {
            Some(sprite) => {
                let (cols, _) = sprite::sprite_fit(sprite, inner.width / 2, inner.height);
                let [text_area, sprite_area] =
                    Layout::horizontal([Constraint::Min(0), Constraint::Length(cols)])
                        .areas(inner);
                sprite_backend::place_centered(sprite, sprite_area, CARD_IMAGE_ID);
                text_area
            }
            None => inner,
        };

        let mut name = vec![Span::styled(
            format_name(&props.pokemon.name),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if props.selected {
            name.insert(
                0,
                Span::styled(format!("{SELECTED_MARKER} "), Style::default().fg(ACCENT_GOLD)),
            );
        }
        let text = Text::from(vec![
            Line::from(name),
            Line::from(Span::styled(
                format!("#{:03}", props.pokemon.id),
                Style::default().fg(TEXT_DIM),
            )),
        ]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), text_area);
    }
}

/// `mr-mime` -> `Mr Mime`
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
