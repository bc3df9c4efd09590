//! Crossterm backend that overlays kitty graphics after each draw
//!
//! Components register escape sequences for the frame being drawn; the
//! backend deletes last frame's images and prints the new ones once the
//! cell diff is flushed.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Rect, Size};

use crate::sprite::{self, SpriteData};

/// Deletes every image placed on screen.
const DELETE_ALL_IMAGES: &str = "\x1b_Ga=d,d=a\x1b\\";

/// Sequences to print, keyed by top-left cell.
#[derive(Default, Debug, Clone)]
pub struct SpriteRegistry {
    placements: BTreeMap<(u16, u16), String>,
}

impl SpriteRegistry {
    pub fn place(&mut self, x: u16, y: u16, sequence: String) {
        self.placements.insert((x, y), sequence);
    }

    pub fn clear(&mut self) {
        self.placements.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placements(&self) -> Vec<((u16, u16), String)> {
        self.placements
            .iter()
            .map(|(pos, sequence)| (*pos, sequence.clone()))
            .collect()
    }
}

pub fn sprite_registry() -> Arc<Mutex<SpriteRegistry>> {
    static REGISTRY: OnceLock<Arc<Mutex<SpriteRegistry>>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| Arc::new(Mutex::new(SpriteRegistry::default())))
        .clone()
}

fn lock(registry: &Mutex<SpriteRegistry>) -> MutexGuard<'_, SpriteRegistry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Forget every placement; called at the start of each frame.
pub fn clear_sprites() {
    lock(&sprite_registry()).clear();
}

pub fn place_sprite(x: u16, y: u16, sequence: String) {
    lock(&sprite_registry()).place(x, y, sequence);
}

/// Registers `sprite` centered in `area` for the next draw.
pub fn place_centered(sprite: &SpriteData, area: Rect, image_id: u32) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let fit = sprite::centered_fit(sprite, area);
    let sequence = sprite::kitty_sequence(sprite, fit.width, fit.height, image_id);
    place_sprite(fit.x, fit.y, sequence);
}

pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    registry: Arc<Mutex<SpriteRegistry>>,
    images_on_screen: bool,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, registry: Arc<Mutex<SpriteRegistry>>) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            registry,
            images_on_screen: false,
        }
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)?;
        let placements = lock(&self.registry).placements();
        if self.images_on_screen {
            queue!(self.inner, Print(DELETE_ALL_IMAGES))?;
        }
        for ((x, y), sequence) in &placements {
            queue!(self.inner, MoveTo(*x, *y), Print(sequence))?;
        }
        self.images_on_screen = !placements.is_empty();
        Ok(())
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}
