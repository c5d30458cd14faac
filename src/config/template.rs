/// Starter `.urifs.toml` written by `urifs --init`.
pub fn generate_init_template() -> String {
	r#"# urifs configuration
#
# Settings are looked up from the working directory upwards, then in
# ~/.urifs.toml. The most specific file wins for each key.

# Stop looking in parent directories after this file.
root = true

# Skip ~/.urifs.toml when this environment variable is truthy.
# user-config-disable-env-var = "CI"

# Single character joining path segments (defaults to the platform separator).
# separator = "/"

# Reject URIs that would not survive the round trip.
strict = false

# Default directory for `urifs list`, relative to this file.
# store = "archive"
"#
	.to_string()
}
