//! Append-only conversation view with its scroll state.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::Options;
use unicode_width::UnicodeWidthStr;

use crate::core::message::{Message, Sender};
use crate::utils::input::sanitize_display_text;

/// Lines scrolled per PageUp/PageDown when the viewport is empty.
const MIN_PAGE: u16 = 1;

fn base_style(sender: Sender) -> Style {
    match sender {
        Sender::User => Style::default().fg(Color::Cyan),
        Sender::Bot => Style::default(),
    }
}

/// Build the display lines for one message, wrapped to `width` columns.
/// A width of zero disables wrapping.
pub fn message_lines(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = base_style(message.sender);
    let prefix = message.sender.prefix();
    let text = format!("{prefix}{}", sanitize_display_text(&message.text));
    let width = usize::from(width);

    let indent_width = prefix.width();
    let indent = if width > indent_width * 2 {
        " ".repeat(indent_width)
    } else {
        String::new()
    };

    let mut lines = Vec::new();
    for (index, raw_line) in text.split('\n').enumerate() {
        if raw_line.trim().is_empty() {
            lines.push(Line::from(""));
            continue;
        }

        let wrapped: Vec<String> = if width == 0 {
            vec![raw_line.to_string()]
        } else {
            let initial = if index == 0 { "" } else { indent.as_str() };
            let options = Options::new(width)
                .break_words(true)
                .initial_indent(initial)
                .subsequent_indent(&indent);
            textwrap::wrap(raw_line, options)
                .into_iter()
                .map(|piece| piece.into_owned())
                .collect()
        };

        for (piece_index, piece) in wrapped.into_iter().enumerate() {
            let rest = if index == 0 && piece_index == 0 {
                piece.strip_prefix(prefix).map(str::to_string)
            } else {
                None
            };
            match rest {
                Some(rest) => lines.push(Line::from(vec![
                    Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                    Span::styled(rest, style),
                ])),
                None => lines.push(Line::from(Span::styled(piece, style))),
            }
        }
    }

    // Spacer between entries
    lines.push(Line::from(""));
    lines
}

/// Wrapped lines for every entry at one width. Appending wraps only the new
/// entry; a width change rewraps everything.
#[derive(Debug, Clone, Default)]
struct PrewrapCache {
    width: u16,
    per_message: Vec<Vec<Line<'static>>>,
    total_lines: usize,
}

impl PrewrapCache {
    fn push(&mut self, message: &Message) {
        let lines = message_lines(message, self.width);
        self.total_lines += lines.len();
        self.per_message.push(lines);
    }

    fn rebuild(&mut self, messages: &[Message], width: u16) {
        self.width = width;
        self.per_message.clear();
        self.total_lines = 0;
        for message in messages {
            self.push(message);
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConversationView {
    messages: Vec<Message>,
    prewrap: PrewrapCache,
    height: u16,
    scroll_offset: usize,
    pinned: bool,
}

impl Default for ConversationView {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationView {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            prewrap: PrewrapCache::default(),
            height: 0,
            scroll_offset: 0,
            pinned: true,
        }
    }

    /// Add an entry at the end. Earlier entries are never touched.
    pub fn append(&mut self, message: Message) {
        self.prewrap.push(&message);
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Record the area the view is drawn into. A view pinned to the bottom
    /// stays pinned across resizes.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if self.prewrap.width == width && self.height == height {
            return;
        }
        if self.prewrap.width != width {
            self.prewrap.rebuild(&self.messages, width);
        }
        self.height = height;
        if self.pinned {
            self.scroll_to_bottom();
        } else {
            self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        }
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.prewrap.width, self.height)
    }

    /// The wrapped lines that fit in the viewport at the current offset.
    pub fn visible_lines(&self) -> Vec<Line<'static>> {
        self.prewrap
            .per_message
            .iter()
            .flatten()
            .skip(self.scroll_offset)
            .take(usize::from(self.height))
            .cloned()
            .collect()
    }

    pub fn wrapped_line_count(&self) -> usize {
        self.prewrap.total_lines
    }

    pub fn max_scroll_offset(&self) -> usize {
        self.wrapped_line_count()
            .saturating_sub(usize::from(self.height))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn is_at_bottom(&self) -> bool {
        self.scroll_offset >= self.max_scroll_offset()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.max_scroll_offset();
        self.pinned = true;
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(usize::from(lines));
        self.pinned = self.is_at_bottom();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self
            .scroll_offset
            .saturating_add(usize::from(lines))
            .min(self.max_scroll_offset());
        self.pinned = self.is_at_bottom();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(MIN_PAGE));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(MIN_PAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn filled_view(count: usize, width: u16, height: u16) -> ConversationView {
        let mut view = ConversationView::new();
        view.set_viewport(width, height);
        for i in 0..count {
            view.append(Message::user(format!("message {i}")));
            view.scroll_to_bottom();
        }
        view
    }

    #[test]
    fn user_lines_carry_prefix_and_spacer() {
        let lines = message_lines(&Message::user("hello"), 40);
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[0]), "You: hello");
        assert_eq!(lines[0].spans[0].content, "You: ");
        assert_eq!(line_text(&lines[1]), "");
    }

    #[test]
    fn long_text_wraps_with_indent() {
        let lines = message_lines(&Message::bot("one two three four five six"), 14);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts[0], "Bot: one two");
        assert!(texts[1].starts_with("     "));
        assert!(texts.iter().all(|text| text.width() <= 14));
    }

    #[test]
    fn long_words_are_broken() {
        let lines = message_lines(&Message::bot("x".repeat(30)), 12);
        assert!(lines.iter().all(|line| line_text(line).width() <= 12));
        let joined: String = lines.iter().map(line_text).collect::<String>().replace(' ', "");
        assert_eq!(joined, format!("Bot:{}", "x".repeat(30)));
    }

    #[test]
    fn multi_line_replies_keep_blank_lines() {
        let lines = message_lines(&Message::bot("first\n\nsecond"), 40);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(texts, vec!["Bot: first", "", "     second", ""]);
    }

    #[test]
    fn control_characters_do_not_reach_the_terminal() {
        let message = Message::bot("\x1b[2Jcleared");
        let lines = message_lines(&message, 40);
        assert_eq!(line_text(&lines[0]), "Bot: [2Jcleared");
        assert_eq!(message.text, "\x1b[2Jcleared");
    }

    #[test]
    fn zero_width_disables_wrapping() {
        let lines = message_lines(&Message::user("a fairly long line of text"), 0);
        assert_eq!(line_text(&lines[0]), "You: a fairly long line of text");
    }

    #[test]
    fn entries_stay_in_append_order() {
        let mut view = ConversationView::new();
        view.append(Message::user("hello"));
        view.append(Message::bot("hi there"));
        view.append(Message::user("again"));

        let texts: Vec<&str> = view.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "hi there", "again"]);
    }

    #[test]
    fn max_offset_accounts_for_viewport() {
        let view = filled_view(5, 40, 4);
        assert_eq!(view.wrapped_line_count(), 10);
        assert_eq!(view.max_scroll_offset(), 6);
        assert_eq!(view.scroll_offset(), 6);
    }

    #[test]
    fn short_transcripts_do_not_scroll() {
        let view = filled_view(1, 40, 10);
        assert_eq!(view.max_scroll_offset(), 0);
        assert!(view.is_at_bottom());
    }

    #[test]
    fn manual_scroll_is_clamped() {
        let mut view = filled_view(5, 40, 4);
        view.scroll_up(100);
        assert_eq!(view.scroll_offset(), 0);
        assert!(!view.is_at_bottom());

        view.scroll_down(100);
        assert_eq!(view.scroll_offset(), view.max_scroll_offset());
        assert!(view.is_at_bottom());
    }

    #[test]
    fn paging_moves_by_viewport_height() {
        let mut view = filled_view(10, 40, 4);
        let bottom = view.scroll_offset();
        view.page_up();
        assert_eq!(view.scroll_offset(), bottom - 4);
        view.page_down();
        assert_eq!(view.scroll_offset(), bottom);
    }

    #[test]
    fn pinned_view_follows_resize() {
        let mut view = filled_view(10, 40, 4);
        view.set_viewport(40, 8);
        assert_eq!(view.scroll_offset(), view.max_scroll_offset());

        view.set_viewport(40, 2);
        assert_eq!(view.scroll_offset(), view.max_scroll_offset());
    }

    #[test]
    fn unpinned_view_keeps_position_on_resize() {
        let mut view = filled_view(10, 40, 4);
        view.scroll_up(3);
        let offset = view.scroll_offset();
        view.set_viewport(40, 5);
        assert_eq!(view.scroll_offset(), offset);
    }

    #[test]
    fn visible_lines_are_cut_to_the_viewport() {
        let mut view = filled_view(5, 40, 4);
        let texts: Vec<String> = view.visible_lines().iter().map(line_text).collect();
        assert_eq!(texts, vec!["You: message 3", "", "You: message 4", ""]);

        view.scroll_up(6);
        let texts: Vec<String> = view.visible_lines().iter().map(line_text).collect();
        assert_eq!(texts[0], "You: message 0");
    }

    #[test]
    fn width_change_rewraps_cached_lines() {
        let mut view = ConversationView::new();
        view.set_viewport(40, 10);
        view.append(Message::bot("one two three four five six"));
        assert_eq!(view.wrapped_line_count(), 2);

        view.set_viewport(14, 10);
        assert!(view.wrapped_line_count() > 2);
        assert!(view
            .visible_lines()
            .iter()
            .all(|line| line_text(line).width() <= 14));

        view.set_viewport(40, 10);
        assert_eq!(view.wrapped_line_count(), 2);
    }

    #[test]
    fn offsets_are_not_capped_at_u16() {
        let mut view = ConversationView::new();
        view.set_viewport(40, 10);
        for i in 0..40_000 {
            view.append(Message::user(format!("m{i}")));
        }
        view.scroll_to_bottom();
        assert_eq!(view.wrapped_line_count(), 80_000);
        assert_eq!(view.scroll_offset(), 80_000 - 10);
        let texts: Vec<String> = view.visible_lines().iter().map(line_text).collect();
        assert_eq!(texts[8], "You: m39999");
    }
}
