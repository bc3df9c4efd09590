use std::collections::HashMap;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_dispatch::DataResource;

use super::theme::{ACCENT_BLUE, ACCENT_GOLD, ACCENT_RED, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use super::{format_name, Component};
use crate::action::Action;
use crate::selection::SelectionPair;
use crate::sprite::SpriteData;
use crate::sprite_backend;
use crate::state::PokemonTypes;

pub const VERSUS: &str = "VS";
/// kitty image ids of the left and right sprites
pub const COMPARE_IMAGE_IDS: [u32; 2] = [2, 3];
const SPRITE_COLUMNS: u16 = 12;

#[derive(Clone, Copy)]
pub struct ComparePanelProps<'a> {
    /// Both names; `Some` only for a complete pair while comparing
    pub comparison: Option<(&'a str, &'a str)>,
    pub selection: &'a SelectionPair,
    pub details: &'a HashMap<String, DataResource<PokemonTypes>>,
    /// Sprite state of each side, by position in the pair
    pub sprites: [Option<&'a DataResource<SpriteData>>; 2],
}

#[derive(Default)]
pub struct ComparePanel;

impl Component<Action> for ComparePanel {
    type Props<'a> = ComparePanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .title(" Compare Pokémon ")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match props.comparison {
            Some(pair) => render_comparison(frame, inner, pair, props.details, props.sprites),
            None => render_pick_hint(frame, inner, props.selection),
        }
    }
}

fn render_pick_hint(frame: &mut Frame, area: Rect, selection: &SelectionPair) {
    let remaining = 2usize.saturating_sub(selection.filled());
    let mut lines = vec![Line::from(Span::styled(
        format!("Pick {remaining} more with Enter"),
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
    ))];
    if let Some(first) = selection.slot1.as_deref() {
        lines.push(Line::from(Span::styled(
            format!("First: {}", format_name(first)),
            Style::default().fg(TEXT_DIM),
        )));
    }
    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        area,
    );
}

fn render_comparison(
    frame: &mut Frame,
    area: Rect,
    (first, second): (&str, &str),
    details: &HashMap<String, DataResource<PokemonTypes>>,
    sprites: [Option<&DataResource<SpriteData>>; 2],
) {
    let [left, versus, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_side(frame, left, first, details.get(first), sprites[0], COMPARE_IMAGE_IDS[0]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            VERSUS,
            Style::default().fg(ACCENT_RED).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        versus,
    );
    render_side(frame, right, second, details.get(second), sprites[1], COMPARE_IMAGE_IDS[1]);
}

fn render_side(
    frame: &mut Frame,
    area: Rect,
    name: &str,
    detail: Option<&DataResource<PokemonTypes>>,
    sprite: Option<&DataResource<SpriteData>>,
    image_id: u32,
) {
    let [sprite_area, text_area] =
        Layout::horizontal([Constraint::Length(SPRITE_COLUMNS), Constraint::Fill(1)]).areas(area);
    match sprite {
        Some(DataResource::Loaded(sprite)) => {
            sprite_backend::place_centered(sprite, sprite_area, image_id);
        }
        other => {
            let placeholder = if matches!(other, Some(DataResource::Failed(_))) {
                "[no sprite]"
            } else {
                "[loading]"
            };
            let row = Rect::new(
                sprite_area.x,
                sprite_area.y + sprite_area.height / 2,
                sprite_area.width,
                sprite_area.height.min(1),
            );
            frame.render_widget(
                Paragraph::new(Span::styled(placeholder, Style::default().fg(TEXT_DIM)))
                    .alignment(Alignment::Center),
                row,
            );
        }
    }
    frame.render_widget(side_text(name, detail), text_area);
}

fn side_text(
    name: &str,
    detail: Option<&DataResource<PokemonTypes>>,
) -> Paragraph<'static> {
    let mut lines = vec![Line::from(Span::styled(
        format_name(name),
        Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
    ))];
    match detail {
        Some(DataResource::Loaded(detail)) => {
            lines.push(Line::from(Span::styled(
                format!("#{:03}", detail.id),
                Style::default().fg(TEXT_DIM),
            )));
            let types = detail
                .types
                .iter()
                .map(|name| format_name(name))
                .collect::<Vec<_>>()
                .join(" / ");
            lines.push(Line::from(format!("Type: {types}")));
        }
        Some(DataResource::Failed(error)) => {
            lines.push(Line::from(Span::styled(
                format!("Unavailable: {error}"),
                Style::default().fg(ACCENT_RED),
            )));
        }
        _ => {
            lines.push(Line::from(Span::styled(
                "Loading...",
                Style::default().fg(TEXT_DIM),
            )));
        }
    }
    Paragraph::new(Text::from(lines)).alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn render(props: ComparePanelProps<'_>) -> String {
        let mut harness = RenderHarness::new(60, 8);
        let mut panel = ComparePanel;
        harness.render_to_string_plain(|frame| panel.render(frame, frame.area(), props))
    }

    fn square_sprite() -> DataResource<SpriteData> {
        DataResource::Loaded(SpriteData {
            payload: String::new(),
            width: 96,
            height: 96,
        })
    }

    #[test]
    fn partial_pair_shows_hint_not_comparison() {
        let selection = SelectionPair {
            slot1: Some("pikachu".into()),
            slot2: None,
        };
        let details = HashMap::new();
        let output = render(ComparePanelProps {
            comparison: None,
            selection: &selection,
            details: &details,
            sprites: [None, None],
        });
        assert!(output.contains("Pick 1 more"), "{output}");
        assert!(output.contains("First: Pikachu"), "{output}");
        assert!(!output.contains(VERSUS), "{output}");
    }

    #[test]
    fn full_pair_shows_both_sides() {
        let selection = SelectionPair {
            slot1: Some("charmander".into()),
            slot2: Some("squirtle".into()),
        };
        let mut details = HashMap::new();
        details.insert(
            "charmander".to_string(),
            DataResource::Loaded(PokemonTypes {
                id: 4,
                name: "charmander".into(),
                types: vec!["fire".into()],
            }),
        );
        details.insert("squirtle".to_string(), DataResource::Loading);
        let sprite = square_sprite();
        let failed = DataResource::Failed("404".to_string());
        let output = render(ComparePanelProps {
            comparison: selection.both(),
            selection: &selection,
            details: &details,
            sprites: [Some(&sprite), Some(&failed)],
        });
        assert!(output.contains(VERSUS), "{output}");
        assert!(output.contains("Charmander"));
        assert!(output.contains("Type: Fire"), "{output}");
        assert!(output.contains("Squirtle"));
        assert!(output.contains("Loading..."));
        assert!(output.contains("[no sprite]"), "{output}");
        assert!(!output.contains("[loading]"));
    }
}
