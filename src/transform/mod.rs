//! URI to path mapping and back.
//!
//! The forward direction folds a URI through the rule table, which escapes
//! reserved characters and inserts `^/` markers at structural points, then
//! splits on `/` and joins with the chosen separator. The reverse direction
//! splits on the separator, percent-decodes each segment, joins with `/`
//! and deletes every marker.
//!
//! Both directions are total. `reverse(forward(uri)) == uri` holds for URIs;
//! paths that were not produced by `forward` may map to anything.

pub mod tree;

pub use tree::{render_tree, render_tree_for};

use crate::error::{Result, UrifsError};
use crate::rules::{apply_rules, rule_table};
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt;
use std::str::FromStr;

/// Split marker inserted by the forward transform.
pub const MARKER: &str = "^/";

/// Separator used by the rule table between segments.
pub const GENERIC_SEPARATOR: char = '/';

/// A single-character path separator.
///
/// ASCII alphanumerics and `%` are rejected: they appear inside percent
/// escapes, so splitting on them would cut escapes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Separator(char);

impl Separator {
	/// The generic `/` separator.
	pub const GENERIC: Separator = Separator(GENERIC_SEPARATOR);

	/// The separator of the platform this binary was built for.
	pub fn platform() -> Self {
		Separator(std::path::MAIN_SEPARATOR)
	}

	/// Parse a separator from user input (CLI flag or config value).
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = |reason: &'static str| UrifsError::InvalidSeparator {
			separator: input.to_string(),
			reason,
		};

		let mut chars = input.chars();
		let c = chars.next().ok_or_else(|| invalid("separator is empty"))?;
		if chars.next().is_some() {
			return Err(invalid("separator must be a single character"));
		}
		if c.is_ascii_alphanumeric() {
			return Err(invalid("alphanumeric separators collide with percent escapes"));
		}
		if c == '%' {
			return Err(invalid("'%' is the escape character"));
		}

		Ok(Separator(c))
	}

	pub fn as_char(self) -> char {
		self.0
	}
}

impl Default for Separator {
	fn default() -> Self {
		Separator::platform()
	}
}

impl fmt::Display for Separator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for Separator {
	type Err = UrifsError;

	fn from_str(s: &str) -> Result<Self> {
		Separator::parse(s)
	}
}

/// Apply the rule table to a URI, keeping `/` as the segment separator.
pub fn uri_to_path(uri: &str) -> String {
	apply_rules(rule_table(), uri)
}

/// Map a URI to its path segments for the given separator.
///
/// Markers stay embedded as a trailing `^` on the segment that precedes
/// them.
pub fn segments(uri: &str, separator: Separator) -> Vec<String> {
	uri_to_path(uri)
		.split(GENERIC_SEPARATOR)
		.map(|segment| escape_separator(segment, separator))
		.collect()
}

/// Percent-escape literal occurrences of a non-generic separator.
///
/// With `/` this never fires: splitting already consumed every `/`.
fn escape_separator(segment: &str, separator: Separator) -> String {
	let sep = separator.as_char();
	if sep == GENERIC_SEPARATOR || !segment.contains(sep) {
		return segment.to_string();
	}

	let mut buf = [0u8; 4];
	let escaped = utf8_percent_encode(sep.encode_utf8(&mut buf), NON_ALPHANUMERIC).to_string();
	segment.replace(sep, &escaped)
}

/// Map a URI to a path using the platform separator.
pub fn forward(uri: &str) -> String {
	forward_with(uri, Separator::platform())
}

/// Map a URI to a path joined with `separator`.
pub fn forward_with(uri: &str, separator: Separator) -> String {
	let mut buf = [0u8; 4];
	let sep: &str = separator.as_char().encode_utf8(&mut buf);
	segments(uri, separator).join(sep)
}

/// Recover a URI from already split path segments.
///
/// Each segment is decoded on its own before joining, and markers are
/// stripped only after decoding.
pub fn reverse_segments<'a, I>(segments: I) -> String
where
	I: IntoIterator<Item = &'a str>,
{
	let decoded: Vec<String> = segments
		.into_iter()
		.map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
		.collect();

	decoded.join("/").replace(MARKER, "")
}

/// Recover a URI from a path that uses the platform separator.
pub fn reverse(path: &str) -> String {
	reverse_with(path, Separator::platform())
}

/// Recover a URI from a path joined with `separator`.
pub fn reverse_with(path: &str, separator: Separator) -> String {
	reverse_segments(path.split(separator.as_char()))
}

#[cfg(test)]
mod tests {
	use super::*;

	const CORPUS: &[&str] = &[
		"0f7d48e4-2292-11e0-95ee-002332c94cb6",
		"urn:uuid:0f7d48e4-2292-11e0-95ee-002332c94cb6",
		"http://abc/def:ghi/jkl@mno",
		"item@2011-02-12T16:32:00-0100/data?rev=1&l=100#main",
		"http://example.org/publ/abc:xyz/r@2011-02-12T16:32:00.000Z/data?rev=1&l=100#main",
		"http://example.org/some%20escapes%20(%3F%)",
		"https://user@example.org:8080/a/b/?q=1&r=2!#frag",
		"tag:example.org,2011:entry/1",
		"mailto:someone@example.org",
		"http://example.org/$price|*wild*",
		"http://example.org/caf%C3%A9/\u{e9}t\u{e9}",
		"http://abc",
		"http:///abc",
		"http:////abc",
		"http://///abc",
		"http:///://abc",
		"file:/etc/hosts",
		"abcd-/x",
		"x/@/y",
		"/leading/and/trailing/",
		"",
	];

	#[test]
	fn test_uuid_vector() {
		let uri = "0f7d48e4-2292-11e0-95ee-002332c94cb6";
		assert_eq!(
			segments(uri, Separator::GENERIC),
			vec!["0f7d48e4-^", "2292-^", "11e0-^", "95ee-^", "002332c94cb6"]
		);
		let path = forward_with(uri, Separator::GENERIC);
		assert_eq!(path, "0f7d48e4-^/2292-^/11e0-^/95ee-^/002332c94cb6");
		assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
	}

	#[test]
	fn test_http_vector() {
		let uri = "http://abc/def:ghi/jkl@mno";
		let path = forward_with(uri, Separator::GENERIC);
		assert_eq!(path, "http%3A%2F%2F^/abc/def%3A^/ghi/jkl@^/mno");
		assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
	}

	#[test]
	fn test_timestamp_vector() {
		let uri = "item@2011-02-12T16:32:00-0100/data?rev=1&l=100#main";
		let path = forward_with(uri, Separator::GENERIC);
		assert_eq!(
			path,
			"item@^/2011-^/02-12^/T16%3A32%3A^/00-0100/data%3F^/rev=1%26l=100%23^/main"
		);
		assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
	}

	#[test]
	fn test_timestamp_with_millis_vector() {
		let uri = "http://example.org/publ/abc:xyz/r@2011-02-12T16:32:00.000Z/data?rev=1&l=100#main";
		let path = forward_with(uri, Separator::GENERIC);
		assert_eq!(
			path,
			"http%3A%2F%2F^/example.org/publ/abc%3A^/xyz/r@^/2011-^/02-12^/T16%3A32%3A^/00.000Z/data%3F^/rev=1%26l=100%23^/main"
		);
		assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
	}

	#[test]
	fn test_literal_percent_vector() {
		let uri = "http://example.org/some%20escapes%20(%3F%)";
		let path = forward_with(uri, Separator::GENERIC);
		assert_eq!(
			path,
			"http%3A%2F%2F^/example.org/some%2520escapes%2520(%253F%25)"
		);
		assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
	}

	#[test]
	fn test_multi_slash_vectors() {
		let vectors = [
			("http://abc", "http%3A%2F%2F^/abc"),
			("http:///abc", "http%3A%2F%2F%2F^/abc"),
			("http:////abc", "http%3A%2F%2F%2F%2F^/abc"),
			("http://///abc", "http%3A%2F%2F%2F%2F%2F^/abc"),
			("http:///://abc", "http%3A%2F%2F/%3A%2F%2F^/abc"),
		];
		for (uri, expected) in vectors {
			let path = forward_with(uri, Separator::GENERIC);
			assert_eq!(path, expected, "forward of {uri}");
			assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
		}
	}

	#[test]
	fn test_round_trip_corpus() {
		for uri in CORPUS {
			assert_eq!(reverse(&forward(uri)), *uri, "platform round trip of {uri}");
			for sep in ['/', '\\', '.', '^', ':', '|'] {
				let sep = Separator::parse(&sep.to_string()).unwrap();
				let path = forward_with(uri, sep);
				assert_eq!(reverse_with(&path, sep), *uri, "round trip of {uri} with {sep}");
			}
		}
	}

	#[test]
	fn test_concurrent_callers_agree() {
		let expected: Vec<String> = CORPUS
			.iter()
			.map(|uri| forward_with(uri, Separator::GENERIC))
			.collect();

		std::thread::scope(|scope| {
			let handles: Vec<_> = (0..8)
				.map(|_| {
					scope.spawn(|| {
						CORPUS
							.iter()
							.map(|uri| {
								let path = forward_with(uri, Separator::GENERIC);
								assert_eq!(reverse_with(&path, Separator::GENERIC), *uri);
								path
							})
							.collect::<Vec<_>>()
					})
				})
				.collect();

			for handle in handles {
				assert_eq!(handle.join().unwrap(), expected);
			}
		});
	}

	#[test]
	fn test_segments_never_contain_separator() {
		let uris = CORPUS.iter().copied().chain(["a\\b/c.d", "x|y^z"]);
		for uri in uris {
			for sep in ['/', '\\', '.', '|'] {
				let sep = Separator::parse(&sep.to_string()).unwrap();
				for segment in segments(uri, sep) {
					assert!(
						!segment.contains(sep.as_char()),
						"segment {segment:?} of {uri} contains {sep}"
					);
				}
			}
		}
	}

	#[test]
	fn test_backslash_separator_escapes_backslash() {
		let sep = Separator::parse("\\").unwrap();
		let path = forward_with("a\\b/c", sep);
		assert_eq!(path, "a%5Cb\\c");
		assert_eq!(reverse_with(&path, sep), "a\\b/c");
	}

	#[test]
	fn test_dot_separator() {
		let sep = Separator::parse(".").unwrap();
		let path = forward_with("http://example.org/x", sep);
		assert_eq!(path, "http%3A%2F%2F^.example%2Eorg.x");
		assert_eq!(reverse_with(&path, sep), "http://example.org/x");
	}

	#[test]
	fn test_generic_separator_matches_rule_table() {
		for uri in CORPUS {
			assert_eq!(forward_with(uri, Separator::GENERIC), uri_to_path(uri));
		}
	}

	#[test]
	fn test_reverse_leaves_malformed_escapes() {
		assert_eq!(reverse_with("100%/%zz/%4", Separator::GENERIC), "100%/%zz/%4");
	}

	#[test]
	fn test_reverse_foreign_path_is_total() {
		// not produced by forward, but still yields a string
		assert_eq!(reverse_with("a^/b", Separator::GENERIC), "ab");
		assert_eq!(reverse_with("%FF", Separator::GENERIC), "\u{fffd}");
	}

	#[test]
	fn test_caret_before_slash_is_known_limitation() {
		let path = forward_with("a^/b", Separator::GENERIC);
		assert_eq!(path, "a%5E/b");
		assert_eq!(reverse_with(&path, Separator::GENERIC), "ab");
	}

	#[test]
	fn test_empty_uri() {
		assert_eq!(forward_with("", Separator::GENERIC), "");
		assert_eq!(reverse_with("", Separator::GENERIC), "");
	}

	#[test]
	fn test_separator_parse() {
		assert_eq!(Separator::parse("/").unwrap(), Separator::GENERIC);
		assert_eq!("\\".parse::<Separator>().unwrap().as_char(), '\\');
		assert_eq!(Separator::default(), Separator::platform());
		assert_eq!(Separator::GENERIC.to_string(), "/");
	}

	#[test]
	fn test_separator_parse_rejects() {
		for input in ["", "//", "a", "7", "%"] {
			let result = Separator::parse(input);
			match result {
				Err(UrifsError::InvalidSeparator { separator, .. }) => {
					assert_eq!(separator, input);
				}
				other => panic!("Expected InvalidSeparator for {input:?}, got {other:?}"),
			}
		}
	}
}
