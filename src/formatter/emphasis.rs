use once_cell::sync::Lazy;
use regex::Regex;

struct EmphasisRule {
    pattern: Regex,
    replacement: &'static str,
}

// Strong rules run first so `**x**` is not read as two mild spans.
static EMPHASIS_RULES: Lazy<[EmphasisRule; 4]> = Lazy::new(|| {
    let rule = |pattern: &str, replacement| EmphasisRule {
        pattern: Regex::new(pattern).expect("emphasis rule is a valid regex pattern"),
        replacement,
    };

    [
        rule(r"\*\*([^*\n]+?)\*\*", "<strong>${1}</strong>"),
        rule(r"__([^_\n]+?)__", "<strong>${1}</strong>"),
        rule(r"\*([^*\n]+?)\*", "<em>${1}</em>"),
        rule(r"_([^_\n]+?)_", "<em>${1}</em>"),
    ]
});

/// Rewrites markdown emphasis into inline markup. Spans never cross a line.
pub fn rewrite_emphasis(text: &str) -> String {
    let mut rewritten = text.to_string();
    for rule in EMPHASIS_RULES.iter() {
        rewritten = rule
            .pattern
            .replace_all(&rewritten, rule.replacement)
            .into_owned();
    }
    rewritten
}
