use crate::transform::{Separator, segments};

/// Render path segments as an indented directory tree.
///
/// Each level is indented two more spaces than its parent, and every line
/// but the last ends with the separator to mark it as a directory.
pub fn render_tree<S: AsRef<str>>(segments: &[S], separator: Separator) -> String {
	let mut out = String::new();
	for (depth, segment) in segments.iter().enumerate() {
		if depth > 0 {
			out.push(separator.as_char());
			out.push('\n');
		}
		out.push_str(&"  ".repeat(depth + 1));
		out.push_str(segment.as_ref());
	}
	out
}

/// Map a URI and render the resulting tree.
pub fn render_tree_for(uri: &str, separator: Separator) -> String {
	render_tree(&segments(uri, separator), separator)
}
