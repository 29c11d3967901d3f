//! Key bindings for the chat form.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tui_textarea::Input;

use crate::ui::input_field::EditAction;

/// Lines moved by a single Up/Down press.
const SCROLL_STEP: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollAction {
    Up(u16),
    Down(u16),
    PageUp,
    PageDown,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Submit,
    Edit(EditAction),
    Scroll(ScrollAction),
    Quit,
    Ignore,
}

fn forward(key: KeyEvent) -> FormAction {
    FormAction::Edit(EditAction::Key(Input::from(key)))
}

/// The submittable part of the screen: turns terminal input into actions
/// for the input field, the conversation view or the controller.
#[derive(Debug, Clone, Default)]
pub struct ChatForm;

impl ChatForm {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent) -> FormAction {
        if key.kind == KeyEventKind::Release {
            return FormAction::Ignore;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => FormAction::Quit,
            KeyCode::Char('u') if ctrl => FormAction::Edit(EditAction::ClearAll),
            KeyCode::Char('w') if ctrl => FormAction::Edit(EditAction::DeleteWord),
            KeyCode::Char('a' | 'e') if ctrl => forward(key),
            KeyCode::Char(_) if ctrl => FormAction::Ignore,
            KeyCode::Char(_) => forward(key),
            KeyCode::Esc => FormAction::Quit,
            KeyCode::Enter => FormAction::Submit,
            KeyCode::End if ctrl => FormAction::Scroll(ScrollAction::Bottom),
            KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Home
            | KeyCode::End => forward(key),
            KeyCode::Up => FormAction::Scroll(ScrollAction::Up(SCROLL_STEP)),
            KeyCode::Down => FormAction::Scroll(ScrollAction::Down(SCROLL_STEP)),
            KeyCode::PageUp => FormAction::Scroll(ScrollAction::PageUp),
            KeyCode::PageDown => FormAction::Scroll(ScrollAction::PageDown),
            _ => FormAction::Ignore,
        }
    }

    pub fn handle_paste(&self, text: String) -> FormAction {
        FormAction::Edit(EditAction::Paste(text))
    }
}
