use opencv::highgui;
use opencv::prelude::*;

pub const ESCAPE_KEY: i32 = 27;
pub const DEFAULT_WINDOW: &str = "Face Detection";

const POLL_DELAY_MS: i32 = 1;

/// Whether a key code returned by highgui is Escape.
///
/// Only the low byte is significant, some backends set modifier bits above it.
pub fn is_escape(key: i32) -> bool {
    key >= 0 && key & 0xFF == ESCAPE_KEY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWait {
    Poll,
    Hold,
}

impl KeyWait {
    fn delay_ms(&self) -> i32 {
        match self {
            KeyWait::Poll => POLL_DELAY_MS,
            KeyWait::Hold => 0,
        }
    }
}

pub trait Viewer {
    fn show(&self, frame: &Mat) -> anyhow::Result<()>;

    /// True when the user asked to stop.
    fn cancelled(&self) -> anyhow::Result<bool>;
}

/// Viewer window. All highgui windows are destroyed when dropped.
pub struct Window {
    name: String,
    key_wait: KeyWait,
}

impl Window {
    pub fn new(name: &str, key_wait: KeyWait) -> anyhow::Result<Self> {
        highgui::named_window_def(name)?;
        Ok(Self {
            name: name.to_string(),
            key_wait,
        })
    }
}

impl Viewer for Window {
    fn show(&self, frame: &Mat) -> anyhow::Result<()> {
        highgui::imshow(&self.name, frame)?;
        Ok(())
    }

    fn cancelled(&self) -> anyhow::Result<bool> {
        Ok(is_escape(highgui::wait_key(self.key_wait.delay_ms())?))
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Err(err) = highgui::destroy_all_windows() {
            tracing::warn!(%err, window = %self.name, "failed to close windows");
        }
    }
}
