use rh_core::RehostError;

use crate::adapter::SharedAdapter;

pub const DEFAULT_WIDTH: u32 = 854;
pub const DEFAULT_HEIGHT: u32 = 480;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

// The windowing layer, reduced to the capability the core needs: open a
// titled window with a placeholder sized to the config, then swap the
// adapter in as its content. Implementations own the event loop and are
// expected to end the process when the window is closed.
pub trait WindowShell {
    fn create_window(&mut self, config: &WindowConfig) -> Result<(), RehostError>;
    fn set_content(&mut self, adapter: &SharedAdapter) -> Result<(), RehostError>;
}
