//! Query resource lookup.
//!
//! Query files (`highlights.scm` and friends) ship next to the grammar under
//! the package's `queries/` directory. A missing query file is not an error:
//! it resolves to an empty query, so callers can probe for optional queries.
//! Every other failure while reading an existing resource is reported.

use std::path::{Path, PathBuf};
use std::{fs, io, str};

use include_dir::{Dir, include_dir};
use thiserror::Error;
use tracing::trace;

use crate::config::QUERIES_DIR;

/// Query files compiled into the crate from its `queries/` directory.
static PACKAGED_QUERIES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/queries");

/// Outcome of reading a resource from a [`ResourceRoot`].
#[derive(Debug, Error)]
pub enum ResourceError {
	/// Nothing exists at the requested path.
	#[error("resource not found: {}", .path.display())]
	NotFound {
		/// Path that was looked up.
		path: PathBuf,
	},

	/// The resource exists but reading it failed.
	#[error("I/O error reading {}: {source}", .path.display())]
	Io {
		/// Path of the resource.
		path: PathBuf,
		/// The underlying I/O error.
		source: io::Error,
	},

	/// The resource is not valid UTF-8.
	#[error("resource {} is not valid UTF-8: {source}", .path.display())]
	Decode {
		/// Path of the resource.
		path: PathBuf,
		/// The decoding error.
		source: str::Utf8Error,
	},
}

/// Errors returned by [`QueryResolver::get_query`].
///
/// A missing resource never produces one of these.
#[derive(Debug, Error)]
pub enum QueryError {
	/// The query file exists but could not be read.
	#[error("failed to read query {}: {source}", .path.display())]
	Io {
		/// Path of the query file.
		path: PathBuf,
		/// The underlying I/O error.
		source: io::Error,
	},

	/// The query file is not valid UTF-8.
	#[error("query {} is not valid UTF-8: {source}", .path.display())]
	Decode {
		/// Path of the query file.
		path: PathBuf,
		/// The decoding error.
		source: str::Utf8Error,
	},
}

impl QueryError {
	/// Returns the path of the query that failed.
	pub fn path(&self) -> &Path {
		match self {
			Self::Io { path, .. } | Self::Decode { path, .. } => path,
		}
	}
}

/// Reads text resources by path relative to a package root.
///
/// Implementations must report a missing resource as
/// [`ResourceError::NotFound`] and nothing else as such.
pub trait ResourceRoot {
	/// Reads the resource at `path`, relative to the root.
	fn read_text(&self, path: &Path) -> Result<String, ResourceError>;
}

/// Resources compiled into the crate.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedRoot {
	queries: &'static Dir<'static>,
}

impl EmbeddedRoot {
	/// Returns the root holding this crate's packaged query files.
	pub fn packaged() -> Self {
		Self {
			queries: &PACKAGED_QUERIES,
		}
	}
}

impl ResourceRoot for EmbeddedRoot {
	fn read_text(&self, path: &Path) -> Result<String, ResourceError> {
		let not_found = || ResourceError::NotFound {
			path: path.to_path_buf(),
		};
		// Only the queries directory is embedded.
		let relative = path.strip_prefix(QUERIES_DIR).map_err(|_| not_found())?;
		let file = self.queries.get_file(relative).ok_or_else(not_found)?;

		str::from_utf8(file.contents())
			.map(str::to_owned)
			.map_err(|source| ResourceError::Decode {
				path: path.to_path_buf(),
				source,
			})
	}
}

/// Resources in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirRoot {
	root: PathBuf,
}

impl DirRoot {
	/// Creates a root at `root`, which should contain a `queries/` directory.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// Returns the root directory.
	pub fn path(&self) -> &Path {
		&self.root
	}
}

impl ResourceRoot for DirRoot {
	fn read_text(&self, path: &Path) -> Result<String, ResourceError> {
		let full = self.root.join(path);
		let bytes = fs::read(&full).map_err(|source| match source.kind() {
			io::ErrorKind::NotFound => ResourceError::NotFound { path: full.clone() },
			_ => ResourceError::Io {
				path: full.clone(),
				source,
			},
		})?;

		String::from_utf8(bytes).map_err(|e| ResourceError::Decode {
			path: full,
			source: e.utf8_error(),
		})
	}
}

/// Returns the package-relative path of a query file.
pub fn query_path(filename: &str) -> PathBuf {
	Path::new(QUERIES_DIR).join(filename)
}

/// Resolves query files against a [`ResourceRoot`].
///
/// Nothing is cached; every call reads from the root.
#[derive(Debug, Clone)]
pub struct QueryResolver<R = EmbeddedRoot> {
	root: R,
}

impl QueryResolver<EmbeddedRoot> {
	/// Resolver over the query files packaged with this crate.
	pub fn packaged() -> Self {
		Self::new(EmbeddedRoot::packaged())
	}
}

impl QueryResolver<DirRoot> {
	/// Resolver over an on-disk package root containing `queries/`.
	pub fn from_dir(root: impl Into<PathBuf>) -> Self {
		Self::new(DirRoot::new(root))
	}
}

impl<R: ResourceRoot> QueryResolver<R> {
	/// Creates a resolver over `root`.
	pub fn new(root: R) -> Self {
		Self { root }
	}

	/// Returns the underlying resource root.
	pub fn root(&self) -> &R {
		&self.root
	}

	/// Returns the text of `queries/<filename>`, or `""` if it does not exist.
	///
	/// `name` scopes the lookup for logging; all scopes currently share the
	/// one `queries/` directory.
	pub fn get_query(&self, name: &str, filename: &str) -> Result<String, QueryError> {
		let path = query_path(filename);
		match self.root.read_text(&path) {
			Ok(text) => {
				trace!(name, filename, bytes = text.len(), "Resolved query");
				Ok(text)
			}
			Err(ResourceError::NotFound { path }) => {
				trace!(name, filename, path = %path.display(), "Query not present, using empty query");
				Ok(String::new())
			}
			Err(ResourceError::Io { path, source }) => Err(QueryError::Io { path, source }),
			Err(ResourceError::Decode { path, source }) => Err(QueryError::Decode { path, source }),
		}
	}
}
