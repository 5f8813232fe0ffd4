//! Grammar loading.
//!
//! The Sindarin grammar is a compiled tree-sitter parser shipped as a shared
//! library. [`language`] loads it once per process and hands out the same
//! [`GrammarHandle`] on every later call. [`GrammarLoader`] does the actual
//! locating and loading and can be configured directly by hosts that keep the
//! library somewhere else.

use std::fmt;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing::{debug, info, warn};
use tree_sitter::Grammar;

use crate::config::{
	NAME, grammar_search_paths, language_symbol, library_file_names, library_override,
};

/// Errors that can occur when loading the compiled grammar.
///
/// These are fatal for the caller: the artifact is static, so retrying yields
/// the same result.
#[derive(Error, Debug)]
pub enum InitializationError {
	/// No grammar library exists at any of the searched locations.
	#[error("grammar library not found (searched {} location(s))", .searched.len())]
	NotFound {
		/// Directories searched, or the explicit library path.
		searched: Vec<PathBuf>,
	},

	/// The library exists but could not be loaded: not a shared library,
	/// wrong architecture, missing language symbol, or incompatible ABI.
	#[error("failed to load grammar library {}: {reason}", .path.display())]
	Load {
		/// The library that failed to load.
		path: PathBuf,
		/// Reason reported by the dynamic loader or the bindings.
		reason: String,
	},
}

/// A loaded, immutable reference to the compiled Sindarin grammar.
#[derive(Clone)]
pub struct GrammarHandle {
	grammar: Grammar,
	library: PathBuf,
}

impl GrammarHandle {
	/// Returns the grammar to hand to the parsing engine.
	pub fn grammar(&self) -> Grammar {
		self.grammar
	}

	/// Returns the shared library the grammar was loaded from.
	pub fn library_path(&self) -> &Path {
		&self.library
	}

	/// Returns the grammar name.
	pub fn name(&self) -> &'static str {
		NAME
	}
}

impl fmt::Debug for GrammarHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("GrammarHandle")
			.field("name", &NAME)
			.field("library", &self.library)
			.finish_non_exhaustive()
	}
}

/// Process-wide grammar, loaded on first successful [`language`] call.
static LANGUAGE: OnceCell<GrammarHandle> = OnceCell::new();

/// Returns the Sindarin grammar, loading it on first use.
///
/// The library is located with [`GrammarLoader::from_env`]. Once loaded, the
/// same handle is returned for the rest of the process and the library is
/// never unloaded. A failed load is not remembered; the next call tries again.
pub fn language() -> Result<&'static GrammarHandle, InitializationError> {
	LANGUAGE.get_or_try_init(|| {
		GrammarLoader::from_env()
			.load()
			.inspect_err(|e| warn!(grammar = NAME, error = %e, "Failed to load grammar"))
	})
}

/// Locates and loads the compiled grammar library.
///
/// An explicit library path takes precedence over the search paths; when it is
/// set, nothing else is tried.
#[derive(Debug, Clone, Default)]
pub struct GrammarLoader {
	library: Option<PathBuf>,
	search_paths: Vec<PathBuf>,
}

impl GrammarLoader {
	/// Creates a loader with no library and no search paths.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a loader from the environment and the default search paths.
	///
	/// See [`crate::config::LIBRARY_ENV`] and [`grammar_search_paths`].
	pub fn from_env() -> Self {
		Self {
			library: library_override(),
			search_paths: grammar_search_paths(),
		}
	}

	/// Loads exactly this library file, skipping the search paths.
	pub fn with_library(mut self, path: impl Into<PathBuf>) -> Self {
		self.library = Some(path.into());
		self
	}

	/// Appends a directory to search.
	pub fn with_search_path(mut self, dir: impl Into<PathBuf>) -> Self {
		self.search_paths.push(dir.into());
		self
	}

	/// Returns the explicit library path, if any.
	pub fn library(&self) -> Option<&Path> {
		self.library.as_deref()
	}

	/// Returns the search directories in order.
	pub fn search_paths(&self) -> &[PathBuf] {
		&self.search_paths
	}

	/// Finds the grammar library without loading it.
	pub fn locate(&self) -> Result<PathBuf, InitializationError> {
		if let Some(library) = &self.library {
			return if library.is_file() {
				Ok(library.clone())
			} else {
				Err(InitializationError::NotFound {
					searched: vec![library.clone()],
				})
			};
		}

		let names = library_file_names();
		for dir in &self.search_paths {
			for name in &names {
				let candidate = dir.join(name);
				if candidate.is_file() {
					return Ok(candidate);
				}
			}
		}

		Err(InitializationError::NotFound {
			searched: self.search_paths.clone(),
		})
	}

	/// Locates and loads the grammar library.
	///
	/// Every call opens the library again; use [`language`] for the shared,
	/// process-wide handle.
	pub fn load(&self) -> Result<GrammarHandle, InitializationError> {
		let path = self.locate()?;
		debug!(
			grammar = NAME,
			symbol = %language_symbol(),
			path = %path.display(),
			"Loading grammar library"
		);

		// SAFETY: the library is expected to be a tree-sitter grammar exporting
		// `tree_sitter_sindarin`; the bindings check the symbol and ABI version.
		let grammar = unsafe { Grammar::new(NAME, &path) }.map_err(|e| {
			InitializationError::Load {
				path: path.clone(),
				reason: e.to_string(),
			}
		})?;

		info!(grammar = NAME, path = %path.display(), "Loaded grammar");
		Ok(GrammarHandle {
			grammar,
			library: path,
		})
	}
}
