use std::borrow::Cow;

/// Decode a datagram payload as UTF-8, replacing invalid sequences.
pub fn decode_payload(payload: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(payload)
}

/// Split decoded text into records.
///
/// CRLF and lone CR count as line breaks. Empty and whitespace-only
/// segments are dropped; the remaining segments keep their own
/// surrounding whitespace.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\r', '\n'])
        .filter(|segment| !segment.trim().is_empty())
        .map(str::to_owned)
        .collect()
}
