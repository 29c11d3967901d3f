//! Text sanitization for anything that reaches the terminal.

/// Make text safe to draw in the conversation view.
///
/// Tabs become four spaces, carriage returns become newlines and all other
/// control characters (escape sequences included) are dropped. Newlines are
/// kept so multi-line replies keep their shape.
pub fn sanitize_display_text(text: &str) -> String {
    let mut sanitized = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\t' => sanitized.push_str("    "),
            '\r' => sanitized.push('\n'),
            '\n' => sanitized.push(c),
            _ if !c.is_control() => sanitized.push(c),
            _ => {}
        }
    }

    sanitized
}

/// Flatten text for the single-line input field: line breaks collapse into
/// one space each, and everything else goes through [`sanitize_display_text`].
pub fn sanitize_single_line(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    sanitize_display_text(&normalized).replace('\n', " ")
}

/// Trim a submission. Byte-order marks count as whitespace, so a pasted
/// BOM on its own is still blank.
pub fn trim_submission(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}
