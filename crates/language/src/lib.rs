// Grammar loading is a library concern - report through tracing, not stderr
#![deny(clippy::print_stderr)]

//! Sindarin grammar for tree-sitter
//!
//! This crate hands out the compiled Sindarin grammar and the query files that
//! ship with it.
//!
//! # Architecture
//!
//! * [`grammar`]: Loads the compiled grammar library once per process
//! * [`query`]: Reads packaged query files, treating missing ones as empty
//! * [`config`]: Package names and where the grammar library is looked for
//!
//! # Usage
//!
//! ```no_run
//! let grammar = tree_sitter_sindarin::language()?.grammar();
//! let highlights = tree_sitter_sindarin::get_query("sindarin", "highlights.scm")?;
//! let folds = tree_sitter_sindarin::get_query("sindarin", "folds.scm")?;
//! assert!(folds.is_empty());
//! # let _ = (grammar, highlights);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod grammar;
pub mod query;

pub use config::NAME;
pub use grammar::{GrammarHandle, GrammarLoader, InitializationError, language};
pub use query::{
	DirRoot, EmbeddedRoot, QueryError, QueryResolver, ResourceError, ResourceRoot, query_path,
};

/// The syntax highlighting query shipped with the grammar.
pub const HIGHLIGHTS_QUERY: &str = include_str!("../queries/highlights.scm");

/// Returns the packaged query `queries/<filename>`, or `""` if there is none.
///
/// Only a missing file yields `""`; any other read failure is returned as a
/// [`QueryError`]. See [`QueryResolver::get_query`].
pub fn get_query(name: &str, filename: &str) -> Result<String, QueryError> {
	QueryResolver::packaged().get_query(name, filename)
}
