//! Terminal session guard
//!
//! Raw mode, the alternate screen and mouse capture (wheel scrolling) are held
//! for the lifetime of the guard and released on drop, including early returns.

use std::io::{self, Stdout};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

pub struct TerminalSession {
    active: bool,
}

impl TerminalSession {
    /// Takes over the terminal when `enabled`; otherwise a no-op guard
    /// (render-once / replay runs draw to stdout directly).
    pub fn acquire(stdout: &mut Stdout, enabled: bool) -> io::Result<Self> {
        if enabled {
            enable_raw_mode()?;
            if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
                let _ = disable_raw_mode();
                return Err(err);
            }
        }
        Ok(Self { active: enabled })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Releases the terminal now, reporting failures instead of swallowing them.
    pub fn release(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let raw = disable_raw_mode();
        execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
        raw
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_session_touches_nothing() {
        let mut stdout = io::stdout();
        let session = TerminalSession::acquire(&mut stdout, false).unwrap();
        assert!(!session.is_active());
        session.release().unwrap();
    }
}
