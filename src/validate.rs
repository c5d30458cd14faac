//! Strict checks layered around the transforms.
//!
//! The transforms accept any string. Callers that want to refuse input the
//! mapping cannot faithfully represent go through these functions instead;
//! the rule table itself is never changed by them.

use crate::error::{Result, UrifsError};
use crate::transform::{Separator, forward_with, reverse_with};

/// Reject URIs containing raw control characters.
pub fn check_uri(uri: &str) -> Result<()> {
	match uri.chars().position(char::is_control) {
		Some(position) => Err(UrifsError::ControlCharacter {
			uri: uri.to_string(),
			position,
		}),
		None => Ok(()),
	}
}

/// Map `uri` forward and confirm the path maps back to it.
///
/// Returns the path on success.
pub fn check_round_trip(uri: &str, separator: Separator) -> Result<String> {
	let path = forward_with(uri, separator);
	let recovered = reverse_with(&path, separator);

	if recovered != uri {
		return Err(UrifsError::RoundTripMismatch {
			uri: uri.to_string(),
			path,
			recovered,
		});
	}

	Ok(path)
}

/// Forward mapping that rejects anything the mapping would not preserve.
pub fn forward_checked(uri: &str, separator: Separator) -> Result<String> {
	check_uri(uri)?;
	check_round_trip(uri, separator)
}

/// Reverse mapping restricted to paths the forward mapping produces.
pub fn reverse_checked(path: &str, separator: Separator) -> Result<String> {
	let uri = reverse_with(path, separator);
	let expected = forward_with(&uri, separator);

	if expected != path {
		return Err(UrifsError::NonCanonicalPath {
			path: path.to_string(),
			expected,
		});
	}

	Ok(uri)
}
