//! Excerpt refinement for the subsection analysis.

/// Longest excerpt kept before truncation kicks in, in characters.
pub const MAX_EXCERPT_CHARS: usize = 1000;

/// Flatten a section body into one line and cap its length.
///
/// Newlines become spaces and the result is trimmed. Text longer than
/// [`MAX_EXCERPT_CHARS`] is cut to that many characters, then back to the
/// last period inside the cut (if there is one), and a period is appended.
pub fn refine_text(body: &str) -> String {
    let flattened = body.replace('\n', " ");
    let cleaned = flattened.trim();

    let window = match cleaned.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((byte_idx, _)) => &cleaned[..byte_idx],
        None => return cleaned.to_string(),
    };

    let kept = match window.rfind('.') {
        Some(pos) => &window[..pos],
        None => window,
    };
    format!("{}.", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_flattened_and_trimmed() {
        assert_eq!(
            refine_text("  Falafel wrap\nRatatouille bowl\n"),
            "Falafel wrap Ratatouille bowl"
        );
        assert_eq!(refine_text(""), "");
    }

    #[test]
    fn test_exactly_max_length_is_untouched() {
        let text = "a".repeat(MAX_EXCERPT_CHARS);
        assert_eq!(refine_text(&text), text);
    }

    #[test]
    fn test_long_text_cuts_at_last_period() {
        let sentence = "Mix well. ";
        let text = sentence.repeat(150); // 1500 chars
        let refined = refine_text(&text);

        assert!(refined.ends_with('.'));
        assert!(refined.chars().count() <= MAX_EXCERPT_CHARS);
        // The 1000-char window ends with "Mix well. " so the cut lands on the
        // 100th period, which is then restored.
        assert_eq!(refined, sentence.repeat(100).trim_end().to_string());
    }

    #[test]
    fn test_long_text_without_period_keeps_full_window() {
        let text = "b".repeat(1200);
        let refined = refine_text(&text);
        assert_eq!(refined.chars().count(), MAX_EXCERPT_CHARS + 1);
        assert_eq!(refined, format!("{}.", "b".repeat(MAX_EXCERPT_CHARS)));
    }

    #[test]
    fn test_period_after_window_is_ignored() {
        let text = format!("Start. {}.", "c".repeat(1100));
        let refined = refine_text(&text);
        assert_eq!(refined, "Start.");
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = "é".repeat(1001);
        let refined = refine_text(&text);
        assert_eq!(refined, format!("{}.", "é".repeat(1000)));
    }

    #[test]
    fn test_trailing_space_inside_window_is_kept() {
        // Window ends in "x .", cutting at that period leaves "x " intact.
        let text = format!("{} .{}", "x".repeat(997), "y".repeat(100));
        let refined = refine_text(&text);
        assert_eq!(refined, format!("{} .", "x".repeat(997)));
    }
}
