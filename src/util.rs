//! Shared helpers

/// Truncate a string to at most `max_chars` Unicode characters.
///
/// If truncated, appends "..." so the total character count is ≤ `max_chars`.
/// Never panics on multi-byte characters (unlike byte-index slicing).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars < 3 {
        return s.chars().take(max_chars).collect();
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("Uploading", 20), "Uploading");
    }

    #[test]
    fn test_truncate_exact_length() {
        assert_eq!(truncate("Idle", 4), "Idle");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("Uploaded 12 replays", 10), "Uploade...");
    }

    #[test]
    fn test_truncate_tiny_limit() {
        assert_eq!(truncate("Uploading", 2), "Up");
        assert_eq!(truncate("Uploading", 0), "");
    }

    #[test]
    fn test_truncate_unicode() {
        let result = truncate("Lúcio Kael'thas Li-Ming", 8);
        assert_eq!(result, "Lúcio...");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_truncate_never_panics(s in ".*", max in 0usize..200) {
            let _ = truncate(&s, max);
        }

        #[test]
        fn prop_truncate_respects_max_chars(s in ".{0,100}", max in 0usize..100) {
            prop_assert!(truncate(&s, max).chars().count() <= max);
        }

        #[test]
        fn prop_truncate_short_identity(s in ".{0,10}") {
            prop_assert_eq!(truncate(&s, 100), s);
        }
    }
}
