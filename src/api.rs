//! Wire payloads for the form-encoded chat endpoint.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Name of the single form field the endpoint reads.
pub const MESSAGE_FIELD: &str = "message";

/// Characters left unescaped by `encodeURIComponent`. Everything else,
/// including space, is percent-encoded.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Build the request body for one exchange.
///
/// ```
/// use formchat::api::encode_form_body;
///
/// assert_eq!(encode_form_body("a b&c"), "message=a%20b%26c");
/// ```
pub fn encode_form_body(message: &str) -> String {
    format!("{MESSAGE_FIELD}={}", encode_uri_component(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_ampersands_are_escaped() {
        assert_eq!(encode_form_body("a b&c"), "message=a%20b%26c");
    }

    #[test]
    fn unreserved_marks_pass_through() {
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_uri_component("a+b=c?d/e#f"), "a%2Bb%3Dc%3Fd%2Fe%23f");
    }

    #[test]
    fn multibyte_text_is_utf8_escaped() {
        assert_eq!(encode_uri_component("café"), "caf%C3%A9");
        assert_eq!(encode_uri_component("👋"), "%F0%9F%91%8B");
    }

    #[test]
    fn reply_requires_response_field() {
        let reply: ChatReply = serde_json::from_str(r#"{"response":"hi there"}"#).unwrap();
        assert_eq!(reply.response, "hi there");
        assert!(serde_json::from_str::<ChatReply>(r#"{"answer":"hi"}"#).is_err());
        assert!(serde_json::from_str::<ChatReply>(r#"{"response":42}"#).is_err());
    }

    #[test]
    fn reply_ignores_extra_fields() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"response":"ok","model":"demo"}"#).unwrap();
        assert_eq!(reply.response, "ok");
    }
}
