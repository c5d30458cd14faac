use crate::error::Result;
use crate::rules::rewriter::RewriteRule;
use std::sync::LazyLock;

/// The forward rewrite chain as `(name, pattern, replacement)`.
///
/// Order is load-bearing: every entry matches against the output of the
/// entries before it. `%` is escaped first so the escapes introduced later
/// are never escaped again, and `^` is escaped before any marker (`^/`) is
/// inserted so markers cannot collide with user content.
pub const REWRITE_PATTERNS: &[(&str, &str, &str)] = &[
	// escape the escape character itself
	("percent", "%", "%25"),
	// characters fine in URIs but reserved for bookkeeping here
	("caret", r"\^", "%5E"),
	("dollar", r"\$", "%24"),
	("pipe", r"\|", "%7C"),
	("star", r"\*", "%2A"),
	("ampersand", "&", "%26"),
	// uuid-like or year-like prefix
	("hex-prefix", "([0-9a-f]{4,}-)", "${1}^/"),
	// month-day, only right after a split year
	("month-day", r"\^/([0-9]{2}-[0-9]{2})", "^/${1}^/"),
	// Thh:mm: stays together, ss[.mmm]TZ gets its own segment
	(
		"time",
		r"(T[0-9]{2}):([0-9]{2}):([0-9]{2}(?:\.[0-9]{3})?(?:[+-][0-9][0-9]?[0-9]{2}|Z))",
		"${1}%3A${2}%3A^/${3}",
	),
	// structural delimiters, including runs of slashes
	("split", "((?:/{2,}|[@:?!#])+)", "${1}^/"),
	// delimiters left over after splitting
	("colon", ":", "%3A"),
	("bang", "!", "%21"),
	("question", r"\?", "%3F"),
	("hash", "#", "%23"),
	// doubled slashes; brittle for pathological authorities
	("double-slash", "//", "%2F%2F"),
	("slash-marker", r"/\^", "%2F^"),
];

static RULE_TABLE: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
	compile_rules(REWRITE_PATTERNS).expect("built-in rewrite patterns are valid regexes")
});

/// Compile a pattern table into rewrite rules, preserving order.
pub fn compile_rules(patterns: &[(&'static str, &str, &'static str)]) -> Result<Vec<RewriteRule>> {
	patterns
		.iter()
		.map(|&(name, pattern, replacement)| RewriteRule::new(name, pattern, replacement))
		.collect()
}

/// The process-wide rule table, compiled on first use.
pub fn rule_table() -> &'static [RewriteRule] {
	&RULE_TABLE
}
