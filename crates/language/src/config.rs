//! Package names and grammar search configuration.
//!
//! The compiled grammar is located at runtime. An explicit library path can be
//! given through [`LIBRARY_ENV`]; otherwise a fixed list of install and cache
//! directories is searched in order.

use std::path::PathBuf;

/// Grammar name, as exported by the compiled parser (`tree_sitter_sindarin`).
pub const NAME: &str = "sindarin";

/// Package-relative directory holding the query files.
pub const QUERIES_DIR: &str = "queries";

/// Environment variable naming the compiled grammar library to load.
///
/// When set to a non-empty value, only that file is considered.
pub const LIBRARY_ENV: &str = "TREE_SITTER_SINDARIN_LIBRARY";

/// Directory name used under install prefixes and the local data directory.
const PACKAGE_DIR: &str = "tree-sitter-sindarin";

/// Symbol the compiled grammar exports to hand out its language table.
pub fn language_symbol() -> String {
	format!("tree_sitter_{}", NAME.replace('-', "_"))
}

/// Returns the explicit library path from [`LIBRARY_ENV`], if set.
pub fn library_override() -> Option<PathBuf> {
	std::env::var_os(LIBRARY_ENV)
		.filter(|value| !value.is_empty())
		.map(PathBuf::from)
}

/// Returns the directories searched for the compiled grammar, in order.
///
/// 1. `<exe dir>/grammars`
/// 2. `<exe dir>/../share/tree-sitter-sindarin/grammars`
/// 3. `<data local dir>/tree-sitter-sindarin/grammars`
/// 4. `<cache dir>/tree-sitter/lib`, where the tree-sitter CLI caches builds
pub fn grammar_search_paths() -> Vec<PathBuf> {
	let mut paths = Vec::new();

	if let Ok(exe) = std::env::current_exe()
		&& let Some(exe_dir) = exe.parent()
	{
		paths.push(exe_dir.join("grammars"));
		paths.push(
			exe_dir
				.join("..")
				.join("share")
				.join(PACKAGE_DIR)
				.join("grammars"),
		);
	}

	if let Some(data) = dirs::data_local_dir() {
		paths.push(data.join(PACKAGE_DIR).join("grammars"));
	}

	if let Some(cache) = dirs::cache_dir() {
		paths.push(cache.join("tree-sitter").join("lib"));
	}

	paths
}

/// File names the compiled grammar may have inside a search directory.
///
/// Grammar build pipelines name the output `lib<name>.<ext>`; the tree-sitter
/// CLI cache uses `<name>.<ext>`.
pub fn library_file_names() -> [String; 2] {
	let safe_name = NAME.replace('-', "_");
	let ext = library_extension();
	[format!("lib{safe_name}.{ext}"), format!("{safe_name}.{ext}")]
}

#[cfg(target_os = "windows")]
fn library_extension() -> &'static str {
	"dll"
}

#[cfg(target_os = "macos")]
fn library_extension() -> &'static str {
	"dylib"
}

#[cfg(all(not(target_os = "windows"), not(target_os = "macos")))]
fn library_extension() -> &'static str {
	"so"
}
