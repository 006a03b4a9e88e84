//! Shared utility functions

use sha2::{Digest, Sha256};

/// Shorten `text` to at most `max_chars` characters for log lines.
///
/// Counts characters rather than bytes so multi-byte text is never split
/// mid-character. Appends "..." when something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Short, non-reversible identifier for a credential.
///
/// First 8 hex chars of SHA-256, so logs can tell keys apart without ever
/// containing one.
pub fn key_fingerprint(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    digest.iter().take(4).map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_shorter_than_max() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn test_preview_truncates_ascii() {
        assert_eq!(preview("hello world", 5), "hello...");
    }

    #[test]
    fn test_preview_counts_characters() {
        // Each character is 3 bytes in UTF-8
        assert_eq!(preview("日本語", 2), "日本...");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn test_key_fingerprint_is_stable_and_short() {
        let a = key_fingerprint("key-one");
        assert_eq!(a.len(), 8);
        assert_eq!(a, key_fingerprint("key-one"));
        assert_ne!(a, key_fingerprint("key-two"));
        assert!(!a.contains("key"));
    }
}
