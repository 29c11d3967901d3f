//! Single-line text input backed by a `tui_textarea::TextArea`.

use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::{Input, Key, TextArea};

use crate::utils::input::sanitize_single_line;

pub const INPUT_TITLE: &str = "Type your message (Enter to send, Esc to quit)";

#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    /// Key forwarded to the text area's own bindings.
    Key(Input),
    Paste(String),
    DeleteWord,
    ClearAll,
}

#[derive(Debug, Clone)]
pub struct InputField {
    textarea: TextArea<'static>,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

fn configured(mut textarea: TextArea<'static>) -> TextArea<'static> {
    textarea.set_block(Block::default().borders(Borders::ALL).title(INPUT_TITLE));
    textarea.set_style(Style::default().fg(Color::Cyan));
    textarea.set_cursor_line_style(Style::default());
    textarea
}

impl InputField {
    pub fn new() -> Self {
        Self {
            textarea: configured(TextArea::default()),
        }
    }

    /// Whatever the field currently holds, untrimmed.
    pub fn value(&self) -> String {
        self.textarea.lines().join("")
    }

    /// Cursor column in characters.
    pub fn cursor(&self) -> usize {
        self.textarea.cursor().1
    }

    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(|line| line.is_empty())
    }

    pub fn clear(&mut self) {
        self.textarea = configured(TextArea::default());
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn apply(&mut self, action: EditAction) {
        match action {
            // The field never holds more than one line.
            EditAction::Key(Input {
                key: Key::Enter, ..
            })
            | EditAction::Key(Input {
                key: Key::Char('m' | 'j'),
                ctrl: true,
                ..
            }) => {}
            EditAction::Key(Input {
                key: Key::Char(c), ..
            }) if c.is_control() => {}
            EditAction::Key(input) => {
                self.textarea.input(input);
            }
            EditAction::Paste(text) => {
                self.textarea.insert_str(sanitize_single_line(&text));
            }
            EditAction::DeleteWord => {
                self.textarea.delete_word();
            }
            EditAction::ClearAll => self.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> EditAction {
        EditAction::Key(Input::from(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn typed(text: &str) -> InputField {
        let mut field = InputField::new();
        for c in text.chars() {
            field.apply(key(KeyCode::Char(c)));
        }
        field
    }

    #[test]
    fn typing_appends_at_cursor() {
        let mut field = typed("helo");
        field.apply(key(KeyCode::Left));
        field.apply(key(KeyCode::Char('l')));
        assert_eq!(field.value(), "hello");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn backspace_and_delete_respect_bounds() {
        let mut field = typed("ab");
        field.apply(key(KeyCode::Delete));
        assert_eq!(field.value(), "ab");
        field.apply(key(KeyCode::Backspace));
        assert_eq!(field.value(), "a");
        field.apply(key(KeyCode::Home));
        field.apply(key(KeyCode::Backspace));
        assert_eq!(field.value(), "a");
        field.apply(key(KeyCode::Delete));
        assert!(field.is_empty());
    }

    #[test]
    fn multibyte_characters_edit_cleanly() {
        let mut field = typed("café!");
        field.apply(key(KeyCode::Left));
        field.apply(key(KeyCode::Backspace));
        assert_eq!(field.value(), "caf!");
    }

    #[test]
    fn paste_flattens_newlines() {
        let mut field = typed("> ");
        field.apply(EditAction::Paste("line one\nline two\r\n".to_string()));
        assert_eq!(field.value(), "> line one line two ");
        assert_eq!(field.textarea().lines().len(), 1);
    }

    #[test]
    fn enter_and_control_characters_are_not_inserted() {
        let mut field = typed("a");
        field.apply(key(KeyCode::Enter));
        field.apply(key(KeyCode::Char('\u{7}')));
        field.apply(EditAction::Key(Input::from(KeyEvent::new(
            KeyCode::Char('m'),
            KeyModifiers::CONTROL,
        ))));
        assert_eq!(field.value(), "a");
        assert_eq!(field.textarea().lines().len(), 1);
    }

    #[test]
    fn delete_word_removes_previous_word_and_spaces() {
        let mut field = typed("hello big   world");
        field.apply(EditAction::DeleteWord);
        assert_eq!(field.value(), "hello big   ");
        field.apply(EditAction::DeleteWord);
        assert_eq!(field.value(), "hello ");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut field = typed("  padded  ");
        field.apply(EditAction::ClearAll);
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor(), 0);
        assert!(field.is_empty());
    }

    #[test]
    fn home_and_end_move_the_cursor() {
        let mut field = typed("abc");
        field.apply(key(KeyCode::Home));
        assert_eq!(field.cursor(), 0);
        field.apply(key(KeyCode::End));
        assert_eq!(field.cursor(), 3);
    }
}
