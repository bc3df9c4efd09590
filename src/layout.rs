//! Grid geometry shared by the reducer (scroll math) and the renderer

use ratatui::layout::Rect;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;
pub const COMPARE_PANEL_HEIGHT: u16 = 8;

pub const CARD_MIN_WIDTH: u16 = 20;
pub const CARD_HEIGHT: u16 = 6;
pub const ROW_GAP: u16 = 1;
pub const COLUMN_GAP: u16 = 2;
pub const GRID_MARGIN: u16 = 1;

/// Rows from the top of one card row to the top of the next.
pub const ROW_PITCH: u32 = (CARD_HEIGHT + ROW_GAP) as u32;

/// Height left for the card grid once header, footer and compare panel are placed.
pub fn viewport_height(terminal_height: u16, compare_panel: bool) -> u16 {
    let panel = if compare_panel { COMPARE_PANEL_HEIGHT } else { 0 };
    terminal_height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + panel)
}

/// Auto-fit column layout: as many columns of at least `CARD_MIN_WIDTH` as fit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: u16,
    pub card_width: u16,
}

impl GridLayout {
    pub fn for_width(width: u16) -> Self {
        let usable = width.saturating_sub(GRID_MARGIN * 2);
        let columns = ((usable + COLUMN_GAP) / (CARD_MIN_WIDTH + COLUMN_GAP)).max(1);
        let gaps = COLUMN_GAP * (columns - 1);
        let card_width = (usable.saturating_sub(gaps) / columns).max(1);
        Self {
            columns,
            card_width,
        }
    }

    pub fn rows(&self, count: usize) -> u32 {
        let columns = usize::from(self.columns);
        count.div_ceil(columns) as u32
    }

    pub fn content_height(&self, count: usize) -> u32 {
        self.rows(count) * ROW_PITCH
    }

    pub fn row_of(&self, index: usize) -> u32 {
        (index / usize::from(self.columns)) as u32
    }

    pub fn column_of(&self, index: usize) -> u16 {
        (index % usize::from(self.columns)) as u16
    }

    /// Content-space top row of the card at `index`.
    pub fn card_top(&self, index: usize) -> u32 {
        self.row_of(index) * ROW_PITCH
    }

    /// Screen rect of the card at `index`, clipped to `area`; `None` when scrolled out.
    pub fn card_rect(&self, area: Rect, index: usize, offset: u32) -> Option<Rect> {
        let top = i64::from(area.y) + i64::from(self.card_top(index)) - i64::from(offset);
        let bottom = top + i64::from(CARD_HEIGHT);
        let clip_top = top.max(i64::from(area.y));
        let clip_bottom = bottom.min(i64::from(area.bottom()));
        if clip_bottom <= clip_top {
            return None;
        }
        let x = area.x
            + GRID_MARGIN
            + self.column_of(index) * (self.card_width + COLUMN_GAP);
        if x >= area.right() {
            return None;
        }
        let width = self.card_width.min(area.right() - x);
        Some(Rect::new(
            x,
            clip_top as u16,
            width,
            (clip_bottom - clip_top) as u16,
        ))
    }

    /// Smallest offset change that brings the card at `index` fully into view.
    pub fn reveal(&self, index: usize, offset: u32, viewport: u32) -> u32 {
        let top = self.card_top(index);
        let bottom = top + u32::from(CARD_HEIGHT);
        if top < offset {
            top
        } else if bottom > offset + viewport {
            bottom.saturating_sub(viewport)
        } else {
            offset
        }
    }
}
