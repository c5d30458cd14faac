use std::path::PathBuf;

/// Library-level structured errors for urifs.
///
/// The transforms themselves are total and never produce these. They come
/// from the layers around the core: configuration, the strict validation
/// layer and the file-system store. The CLI binary wraps them with `anyhow`.
#[derive(Debug, thiserror::Error)]
pub enum UrifsError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid path separator {separator:?}: {reason}")]
	InvalidSeparator {
		separator: String,
		reason: &'static str,
	},

	#[error("Invalid regex pattern in rule table: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("URI contains a control character at position {position}: {uri:?}")]
	ControlCharacter { uri: String, position: usize },

	#[error("URI does not survive the round trip: {uri:?} maps to {path:?} which recovers {recovered:?}")]
	RoundTripMismatch {
		uri: String,
		path: String,
		recovered: String,
	},

	#[error("Path was not produced by the forward mapping: {path:?} (expected {expected:?})")]
	NonCanonicalPath { path: String, expected: String },

	#[error("URI cannot be stored: {uri:?} ({reason})")]
	UnstorableUri { uri: String, reason: &'static str },

	#[error("Store I/O failed: {path}")]
	StoreIo {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Stored path is not valid UTF-8: {path}")]
	NonUtf8Path { path: PathBuf },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using UrifsError.
pub type Result<T> = std::result::Result<T, UrifsError>;
