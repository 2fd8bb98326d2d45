//! Page shell state: whether the booking overlay is mounted.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShellState {
    pub overlay_open: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellEvent {
    OpenOverlay,
    CloseOverlay,
}

impl ShellState {
    /// Apply an event. Opening an open overlay and closing a closed one are no-ops.
    #[must_use]
    pub const fn apply(self, event: ShellEvent) -> Self {
        match event {
            ShellEvent::OpenOverlay => Self { overlay_open: true },
            ShellEvent::CloseOverlay => Self {
                overlay_open: false,
            },
        }
    }
}
