//! Table formatting utilities for CLI output.

use chrono::{DateTime, FixedOffset, Local};
use indicatif::HumanBytes;

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use ochat_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("llama3", 10), "llama3");
/// assert_eq!(truncate_string("mixtral:8x7b-instruct", 10), "mixtral...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

pub fn format_size(bytes: u64) -> String {
    HumanBytes(bytes).to_string()
}

/// Modification time in the local timezone.
pub fn format_modified(at: &DateTime<FixedOffset>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_string("modèle-très-long", 8), "modèl...");
        assert_eq!(truncate_string("", 4), "");
    }

    #[test]
    fn test_format_size_is_human_readable() {
        assert_eq!(format_size(4_661_224_676), "4.34 GiB");
        assert_eq!(format_size(512), "512 B");
    }

    #[test]
    fn test_format_modified_shape() {
        let at = DateTime::parse_from_rfc3339("2024-05-01T10:15:30-07:00").unwrap();
        let text = format_modified(&at);
        assert_eq!(text.len(), "2024-05-01 10:15".len());
        assert!(text.starts_with("2024-05-0"));
    }
}
