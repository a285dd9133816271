const CSS_FENCE: &str = "```css";
const FENCE: &str = "```";

pub const DEFAULT_EXPLANATION: &str = "Generated custom CSS based on your description.";

/// Strip markdown code fences from a vendor reply, returning the trimmed
/// CSS body. Prefers a `css`-tagged fence over a generic one; text without
/// fences passes through unchanged. Idempotent.
pub fn clean_css(text: &str) -> String {
    if let Some((_, after)) = text.split_once(CSS_FENCE) {
        let inner = after.split(FENCE).next().unwrap_or(after);
        return inner.trim().to_string();
    }

    if text.contains(FENCE) {
        let mut parts = text.split(FENCE);
        parts.next();
        if let Some(inner) = parts.next() {
            return inner.trim().to_string();
        }
    }

    text.trim().to_string()
}

/// Split a combined "EXPLANATION: ... CSS: ..." reply. The split happens at
/// the first `CSS:` occurrence only, so later occurrences (inside a CSS
/// comment, say) stay in the css body. Replies that don't follow the format
/// are treated entirely as css with a canned explanation.
pub fn split_explanation_and_css(content: &str) -> (String, String) {
    if content.contains("EXPLANATION:") && content.contains("CSS:") {
        if let Some((head, tail)) = content.split_once("CSS:") {
            let explanation = head.replace("EXPLANATION:", "").trim().to_string();
            return (explanation, clean_css(tail));
        }
    }

    (DEFAULT_EXPLANATION.to_string(), clean_css(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_css_tagged_fence() {
        let reply = "Here you go:\n```css\n.pixelpage { color: red; }\n```\nEnjoy!";
        assert_eq!(clean_css(reply), ".pixelpage { color: red; }");
    }

    #[test]
    fn extracts_generic_fence() {
        let reply = "```\n.profile-bio { padding: 8px; }\n```";
        assert_eq!(clean_css(reply), ".profile-bio { padding: 8px; }");
    }

    #[test]
    fn passes_unfenced_text_through_trimmed() {
        assert_eq!(clean_css("  .widget { margin: 0; }\n"), ".widget { margin: 0; }");
    }

    #[test]
    fn prefers_css_fence_over_generic() {
        let reply = "```\nnot this\n```\n```css\n.guestbook { border: 0; }\n```";
        assert_eq!(clean_css(reply), ".guestbook { border: 0; }");
    }

    #[test]
    fn clean_css_is_idempotent() {
        let inputs = [
            "```css\n.pixelpage { color: red; }\n```",
            "```\n.pixelpage { color: red; }\n```",
            ".pixelpage { color: red; }",
            "```css\n.unterminated { color: blue; }",
            "",
        ];
        for input in inputs {
            let once = clean_css(input);
            assert_eq!(clean_css(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn splits_explanation_and_css() {
        let reply = "EXPLANATION: A moody synthwave palette.\nCSS:\n.pixelpage { color: purple; }";
        let (explanation, css) = split_explanation_and_css(reply);
        assert_eq!(explanation, "A moody synthwave palette.");
        assert_eq!(css, ".pixelpage { color: purple; }");
    }

    #[test]
    fn splits_on_first_css_marker_only() {
        let reply = "EXPLANATION: Uses layered glows.\nCSS:\n/* CSS: main theme */\n.pixelpage { color: cyan; }";
        let (explanation, css) = split_explanation_and_css(reply);
        assert_eq!(explanation, "Uses layered glows.");
        assert_eq!(css, "/* CSS: main theme */\n.pixelpage { color: cyan; }");
    }

    #[test]
    fn splits_fenced_css_section() {
        let reply = "EXPLANATION: Neon grid.\nCSS:\n```css\n.top-friends { gap: 8px; }\n```";
        let (explanation, css) = split_explanation_and_css(reply);
        assert_eq!(explanation, "Neon grid.");
        assert_eq!(css, ".top-friends { gap: 8px; }");
    }

    #[test]
    fn falls_back_when_markers_are_missing() {
        let reply = "```css\n.music-player { width: 100%; }\n```";
        let (explanation, css) = split_explanation_and_css(reply);
        assert_eq!(explanation, DEFAULT_EXPLANATION);
        assert_eq!(css, ".music-player { width: 100%; }");
    }

    #[test]
    fn round_trips_well_formed_replies() {
        let explanation = "Dark vaporwave with magenta accents.";
        let css = ".pixelpage { background: black; }";
        let reply = format!("EXPLANATION: {explanation}\nCSS:\n{css}");
        let (parsed_explanation, parsed_css) = split_explanation_and_css(&reply);
        assert_eq!(parsed_explanation, explanation);
        assert_eq!(parsed_css, css);
    }
}
