//! Endpoint URL handling.

use reqwest::Url;

/// Parse a chat endpoint, accepting only absolute `http`/`https` URLs.
///
/// Surrounding whitespace is ignored.
///
/// # Examples
///
/// ```
/// use formchat::utils::url::parse_endpoint;
///
/// let url = parse_endpoint(" http://127.0.0.1:8080/chat ").unwrap();
/// assert_eq!(url.path(), "/chat");
/// assert!(parse_endpoint("ftp://example.com/chat").is_err());
/// ```
pub fn parse_endpoint(raw: &str) -> Result<Url, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("endpoint is empty".to_string());
    }

    let url = Url::parse(trimmed).map_err(|err| err.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{other}', expected http or https")),
    }
    if url.host_str().is_none() {
        return Err("endpoint has no host".to_string());
    }
    Ok(url)
}
