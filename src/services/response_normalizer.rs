//! Cleans provider output before it is returned to clients.
//!
//! Models sometimes wrap the whole answer in a code fence or double-escape
//! the math delimiters, even when told not to. Both are undone here; the
//! function never fails and leaves everything else untouched.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```markdown\s*\n").expect("valid regex"));
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```\s*\n").expect("valid regex"));
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n```\s*$").expect("valid regex"));
static QUADRUPLE_ESCAPED_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\{4}([\[\]()])").expect("valid regex"));
static DOUBLE_ESCAPED_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\{2}([\[\]()])").expect("valid regex"));

pub fn normalize(raw: &str) -> String {
    let unfenced = strip_outer_fence(raw.trim());
    unescape_math_delimiters(&unfenced)
}

/// Only a fence wrapping the whole text is removed; fences inside the body
/// stay as they are.
fn strip_outer_fence(text: &str) -> String {
    let opener: &Regex = if text.starts_with("```markdown") {
        &MARKDOWN_FENCE_OPEN
    } else if text.starts_with("```") {
        &FENCE_OPEN
    } else {
        return text.to_string();
    };

    let without_open = opener.replace(text, "");
    FENCE_CLOSE.replace(&without_open, "").into_owned()
}

/// `\\\\[` becomes `\\[` and then `\[`, so one or two layers of escaping both
/// end up as a single backslash.
fn unescape_math_delimiters(text: &str) -> String {
    let once = QUADRUPLE_ESCAPED_DELIMITER.replace_all(text, |caps: &regex::Captures| {
        format!(r"\\{}", &caps[1])
    });
    DOUBLE_ESCAPED_DELIMITER
        .replace_all(&once, |caps: &regex::Captures| format!(r"\{}", &caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_markdown_is_only_trimmed() {
        assert_eq!(normalize("  # Title\n\nBody  \n"), "# Title\n\nBody");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n "), "");
    }

    #[test]
    fn test_strips_markdown_fence() {
        let raw = "```markdown\n# Fractions\n\nA fraction has a numerator.\n```";
        assert_eq!(normalize(raw), "# Fractions\n\nA fraction has a numerator.");
    }

    #[test]
    fn test_strips_bare_fence() {
        let raw = "```\n# Fractions\n```  ";
        assert_eq!(normalize(raw), "# Fractions");
    }

    #[test]
    fn test_fence_with_trailing_spaces_after_language() {
        let raw = "```markdown   \n## Step 1\n```\n";
        assert_eq!(normalize(raw), "## Step 1");
    }

    #[test]
    fn test_inner_fences_are_kept() {
        let raw = "# Example\n\n```\nlet x = 1;\n```\n\nDone.";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_unterminated_fence_only_loses_opener() {
        let raw = "```markdown\n# Title\nBody";
        assert_eq!(normalize(raw), "# Title\nBody");
    }

    #[test]
    fn test_collapses_double_escaped_delimiters() {
        let raw = r"The formula \\[ x^2 \\] and inline \\( y \\).";
        assert_eq!(normalize(raw), r"The formula \[ x^2 \] and inline \( y \).");
    }

    #[test]
    fn test_collapses_quadruple_escaped_delimiters() {
        let raw = r"\\\\[ a + b \\\\]";
        assert_eq!(normalize(raw), r"\[ a + b \]");
    }

    #[test]
    fn test_single_escapes_are_untouched() {
        let raw = r"\[ x = \frac{-b \pm \sqrt{b^2 - 4ac}}{2a} \] and \( D \)";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_other_double_backslashes_are_untouched() {
        let raw = r"Matrix rows: a \\ b";
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_fence_and_escapes_together() {
        let raw = "```markdown\n## Step 1\n\\\\[ D = b^2 - 4ac \\\\]\n```";
        assert_eq!(normalize(raw), "## Step 1\n\\[ D = b^2 - 4ac \\]");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "```markdown\n# T\n\\\\\\\\( x \\\\\\\\)\n```",
            "```\nbody\n```",
            r"\\[ x \\]",
            "plain",
            "",
        ];

        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
