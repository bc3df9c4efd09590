//! Sprite decoding and kitty graphics encoding

use base64::{engine::general_purpose, Engine as _};
use image::GenericImageView;
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;
const CHUNK_SIZE: usize = 4096;
/// kitty `f=100`: the payload is a whole PNG file
const FORMAT_PNG: u32 = 100;

/// A decoded sprite, kept as base64 PNG ready for the kitty protocol.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteData {
    pub payload: String,
    pub width: u32,
    pub height: u32,
}

pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteData, image::ImageError> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = image.dimensions();
    Ok(SpriteData {
        payload: general_purpose::STANDARD.encode(bytes),
        width,
        height,
    })
}

/// Escape sequence that transmits and displays `sprite` scaled to `cols` x `rows` cells.
pub fn kitty_sequence(sprite: &SpriteData, cols: u16, rows: u16, image_id: u32) -> String {
    let chunks: Vec<&[u8]> = sprite.payload.as_bytes().chunks(CHUNK_SIZE).collect();
    let last = chunks.len().saturating_sub(1);
    let mut sequence = String::new();
    for (index, chunk) in chunks.iter().enumerate() {
        let more = u8::from(index < last);
        // base64 is ASCII, so the lossy conversion never substitutes
        let data = String::from_utf8_lossy(chunk);
        if index == 0 {
            let params = format!(
                "f={FORMAT_PNG},s={},v={},a=T,t=d,i={image_id},c={cols},r={rows},m={more}",
                sprite.width, sprite.height
            );
            sequence.push_str(&format!("\x1b_G{params};{data}\x1b\\"));
        } else {
            sequence.push_str(&format!("\x1b_Gm={more};{data}\x1b\\"));
        }
    }
    sequence
}

/// Largest cell box inside `max_cols` x `max_rows` that keeps the sprite's aspect ratio.
pub fn sprite_fit(sprite: &SpriteData, max_cols: u16, max_rows: u16) -> (u16, u16) {
    if max_cols == 0 || max_rows == 0 || sprite.height == 0 {
        return (max_cols, max_rows);
    }
    let ratio = sprite.width as f32 / sprite.height as f32;
    let cols_at_full_height = ratio * f32::from(max_rows) * CELL_ASPECT;
    if cols_at_full_height <= f32::from(max_cols) {
        let cols = cols_at_full_height.round().max(1.0) as u16;
        return (cols, max_rows);
    }
    let rows = (f32::from(max_cols) / (ratio * CELL_ASPECT)).round().max(1.0) as u16;
    (max_cols, rows.min(max_rows))
}

/// Fitted box for `sprite`, centered in `area`.
pub fn centered_fit(sprite: &SpriteData, area: Rect) -> Rect {
    let (cols, rows) = sprite_fit(sprite, area.width, area.height);
    Rect::new(
        area.x + area.width.saturating_sub(cols) / 2,
        area.y + area.height.saturating_sub(rows) / 2,
        cols,
        rows,
    )
}
