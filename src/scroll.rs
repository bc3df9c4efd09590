//! Scroll metrics, navigation-button visibility and the scroll animation

use serde::{Deserialize, Serialize};

/// Distance (in rows) past which the top/bottom buttons appear.
pub const SCROLL_BUTTON_THRESHOLD: u32 = 300;

/// Rows moved by one mouse-wheel notch.
pub const WHEEL_STEP: i32 = 3;

/// Snapshot of the scrollable grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub offset: u32,
    pub content_height: u32,
    pub viewport_height: u32,
}

impl ScrollMetrics {
    pub fn new(offset: u32, content_height: u32, viewport_height: u32) -> Self {
        Self {
            offset,
            content_height,
            viewport_height,
        }
    }

    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Rows of content below the bottom edge of the viewport.
    ///
    /// Signed: an offset past the end (content shrank) gives a negative value.
    pub fn remaining_below(&self) -> i64 {
        i64::from(self.content_height) - i64::from(self.offset) - i64::from(self.viewport_height)
    }

    pub fn clamp(&self, offset: i64) -> u32 {
        offset.clamp(0, i64::from(self.max_offset())) as u32
    }
}

/// Visibility of the two navigation buttons.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollVisibility {
    pub show_top: bool,
    pub show_bottom: bool,
}

impl ScrollVisibility {
    pub fn from_metrics(metrics: &ScrollMetrics, threshold: u32) -> Self {
        Self {
            show_top: metrics.offset > threshold,
            show_bottom: metrics.remaining_below() > i64::from(threshold),
        }
    }
}

/// Which extreme an animated scroll is heading for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollTarget {
    Top,
    Bottom,
}

impl ScrollTarget {
    pub fn offset(self, metrics: &ScrollMetrics) -> u32 {
        match self {
            ScrollTarget::Top => 0,
            ScrollTarget::Bottom => metrics.max_offset(),
        }
    }
}

/// Next offset of an ease-out scroll from `current` toward `target`.
///
/// Covers a quarter of the remaining distance per step, never less than one row.
pub fn ease_step(current: u32, target: u32) -> u32 {
    if current == target {
        return current;
    }
    let distance = current.abs_diff(target);
    let step = (distance / 4).max(1);
    if current < target {
        current + step
    } else {
        current - step
    }
}
