use ratatui::layout::{Constraint, Direction, Layout, Rect};
use thiserror::Error;

/// Rows taken by the bordered input box.
pub const INPUT_HEIGHT: u16 = 3;

/// Rows taken by the conversation title.
pub const TITLE_HEIGHT: u16 = 1;

pub const MIN_WIDTH: u16 = 10;
pub const MIN_HEIGHT: u16 = INPUT_HEIGHT + TITLE_HEIGHT;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error(
        "terminal is {width}x{height}, but the chat screen needs at least {min_width}x{min_height}"
    )]
    TerminalTooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Fail fast when the screen cannot host the conversation view and the
/// input box side by side.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), SetupError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(SetupError::TerminalTooSmall {
            width,
            height,
            min_width: MIN_WIDTH,
            min_height: MIN_HEIGHT,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatLayout {
    /// Title plus transcript.
    pub conversation: Rect,
    pub input: Rect,
}

impl ChatLayout {
    pub fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(INPUT_HEIGHT)])
            .split(area);
        Self {
            conversation: chunks[0],
            input: chunks[1],
        }
    }

    /// Width and height available to transcript lines.
    pub fn transcript_viewport(&self) -> (u16, u16) {
        (
            self.conversation.width,
            self.conversation.height.saturating_sub(TITLE_HEIGHT),
        )
    }
}
