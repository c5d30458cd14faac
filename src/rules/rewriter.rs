use crate::error::{Result, UrifsError};
use regex::Regex;
use std::borrow::Cow;

/// A single compiled rewrite step of the rule table.
#[derive(Debug)]
pub struct RewriteRule {
	/// Short label used in trace output.
	pub name: &'static str,

	/// The pattern to match.
	pub pattern: Regex,

	/// The replacement template (`${n}` refers to capture groups).
	pub replacement: &'static str,
}

impl RewriteRule {
	/// Compile a rule from its pattern and replacement template.
	pub fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Self> {
		let pattern = Regex::new(pattern).map_err(|source| UrifsError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(RewriteRule {
			name,
			pattern,
			replacement,
		})
	}

	/// Apply this rule to every non-overlapping match in `input`.
	///
	/// Returns `Cow::Borrowed` when nothing matched.
	pub fn apply<'t>(&self, input: &'t str) -> Cow<'t, str> {
		self.pattern.replace_all(input, self.replacement)
	}
}

/// Fold `input` through `rules` in order, each rule seeing the previous
/// rule's output.
pub fn apply_rules(rules: &[RewriteRule], input: &str) -> String {
	let mut text = input.to_string();
	for rule in rules {
		let rewritten = match rule.apply(&text) {
			Cow::Borrowed(_) => continue,
			Cow::Owned(rewritten) => rewritten,
		};
		tracing::trace!(rule = rule.name, from = %text, to = %rewritten, "rewrite");
		text = rewritten;
	}
	text
}
