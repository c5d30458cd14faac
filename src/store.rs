//! A file-system content store laid out by the forward mapping.
//!
//! Every object lives at `root/<segments of forward(uri)>`, so the store is
//! a readable directory tree that can be listed back into URIs. All I/O in
//! the crate happens here; the transforms stay pure.

use crate::error::{Result, UrifsError};
use crate::transform::{Separator, reverse_segments, segments};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Content store rooted at a directory.
#[derive(Debug, Clone)]
pub struct Store {
	root: PathBuf,
}

impl Store {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Store { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// File path an object with this URI is stored at.
	///
	/// Fails for URIs whose mapping has an empty or dot segment, since those
	/// would resolve to a directory or outside the root.
	pub fn path_for(&self, uri: &str) -> Result<PathBuf> {
		let unstorable = |reason: &'static str| UrifsError::UnstorableUri {
			uri: uri.to_string(),
			reason,
		};

		let mut path = self.root.clone();
		for segment in segments(uri, Separator::platform()) {
			if segment.is_empty() {
				return Err(unstorable("mapping has an empty path segment"));
			}
			if segment == "." || segment == ".." {
				return Err(unstorable("dot segments would leave the store root"));
			}
			path.push(segment);
		}

		Ok(path)
	}

	/// Write `contents` for `uri`, creating directories as needed.
	pub fn put(&self, uri: &str, contents: impl AsRef<[u8]>) -> Result<PathBuf> {
		let path = self.path_for(uri)?;
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).map_err(io_error(parent))?;
		}
		fs::write(&path, contents).map_err(io_error(&path))?;

		tracing::debug!(uri, path = %path.display(), "stored object");
		Ok(path)
	}

	/// Read the contents stored for `uri`.
	pub fn get(&self, uri: &str) -> Result<Vec<u8>> {
		let path = self.path_for(uri)?;
		fs::read(&path).map_err(io_error(&path))
	}

	/// Whether an object is stored for `uri`.
	pub fn contains(&self, uri: &str) -> bool {
		self.path_for(uri).is_ok_and(|path| path.is_file())
	}

	/// Delete the object stored for `uri`. Empty directories are kept.
	pub fn remove(&self, uri: &str) -> Result<()> {
		let path = self.path_for(uri)?;
		fs::remove_file(&path).map_err(io_error(&path))?;

		tracing::debug!(uri, path = %path.display(), "removed object");
		Ok(())
	}

	/// Recover the URIs of every stored object, sorted.
	pub fn uris(&self) -> Result<Vec<String>> {
		let mut uris = Vec::new();
		if !self.root.exists() {
			tracing::debug!(root = %self.root.display(), "store root does not exist");
			return Ok(uris);
		}

		for entry in WalkDir::new(&self.root).min_depth(1) {
			let entry = entry.map_err(walk_error(&self.root))?;
			if !entry.file_type().is_file() {
				continue;
			}

			// entries always lie under the walk root
			let Ok(relative) = entry.path().strip_prefix(&self.root) else {
				continue;
			};
			let segments = relative
				.components()
				.map(|component| {
					component.as_os_str().to_str().ok_or_else(|| UrifsError::NonUtf8Path {
						path: entry.path().to_path_buf(),
					})
				})
				.collect::<Result<Vec<&str>>>()?;

			uris.push(reverse_segments(segments));
		}

		uris.sort();
		Ok(uris)
	}
}

fn walk_error(root: &Path) -> impl FnOnce(walkdir::Error) -> UrifsError + '_ {
	move |err| {
		let path = err.path().unwrap_or(root).to_path_buf();
		let message = err.to_string();
		let source = err
			.into_io_error()
			.unwrap_or_else(|| std::io::Error::other(message));
		UrifsError::StoreIo { path, source }
	}
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> UrifsError + '_ {
	move |source| UrifsError::StoreIo {
		path: path.to_path_buf(),
		source,
	}
}
