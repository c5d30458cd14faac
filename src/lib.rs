//! urifs - reversible mapping between hierarchical URIs and file system paths.
//!
//! URIs that share structural prefixes (schemes, hosts, UUID groups, dates)
//! are laid out as a readable, nested directory tree, and the tree can be
//! read back into the exact original URIs.
//!
//! This library provides:
//! - The ordered rule table that drives the forward mapping
//! - The forward and reverse transforms
//! - A strict validation layer around the transforms
//! - A file-system store laid out by the mapping
//! - `.urifs.toml` configuration discovery
//!
//! # Example
//!
//! ```
//! use urifs::transform::{Separator, forward_with, reverse_with};
//!
//! let uri = "http://abc/def:ghi/jkl@mno";
//! let path = forward_with(uri, Separator::GENERIC);
//! assert_eq!(path, "http%3A%2F%2F^/abc/def%3A^/ghi/jkl@^/mno");
//! assert_eq!(reverse_with(&path, Separator::GENERIC), uri);
//! ```

pub mod config;
pub mod error;
pub mod rules;
pub mod store;
pub mod transform;
pub mod validate;

pub use error::{Result, UrifsError};
pub use store::Store;
pub use transform::{Separator, forward, forward_with, reverse, reverse_with};
