#![allow(unused_crate_dependencies)]

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tree_sitter_sindarin::{HIGHLIGHTS_QUERY, NAME, QueryError, QueryResolver, get_query};

fn write_query(root: &Path, filename: &str, contents: &str) {
	let queries = root.join("queries");
	fs::create_dir_all(&queries).expect("must create queries dir");
	fs::write(queries.join(filename), contents).expect("must write query");
}

#[test]
fn package_with_highlights_only() {
	let _ = tracing_subscriber::fmt::try_init();
	let pkg = tempfile::tempdir().expect("must create tempdir");
	write_query(pkg.path(), "highlights.scm", "(identifier) @variable");

	let resolver = QueryResolver::from_dir(pkg.path());
	assert_eq!(
		resolver.get_query("sindarin", "highlights.scm").expect("highlights"),
		"(identifier) @variable"
	);
	assert_eq!(resolver.get_query("sindarin", "folds.scm").expect("folds"), "");
}

#[test]
fn distinct_files_do_not_interfere() {
	let pkg = tempfile::tempdir().expect("must create tempdir");
	write_query(pkg.path(), "highlights.scm", "(string) @string\n");
	write_query(pkg.path(), "locals.scm", "(block) @local.scope\n");

	let resolver = QueryResolver::from_dir(pkg.path());
	let highlights = resolver.get_query(NAME, "highlights.scm").expect("highlights");
	let locals = resolver.get_query(NAME, "locals.scm").expect("locals");
	let highlights_again = resolver.get_query(NAME, "highlights.scm").expect("highlights");

	assert_eq!(highlights, "(string) @string\n");
	assert_eq!(locals, "(block) @local.scope\n");
	assert_eq!(highlights_again, highlights);
}

#[test]
fn rereads_after_file_changes() {
	let pkg = tempfile::tempdir().expect("must create tempdir");
	let resolver = QueryResolver::from_dir(pkg.path());
	assert_eq!(resolver.get_query(NAME, "indents.scm").expect("indents"), "");

	write_query(pkg.path(), "indents.scm", "(block) @indent\n");
	assert_eq!(resolver.get_query(NAME, "indents.scm").expect("indents"), "(block) @indent\n");
}

#[test]
fn unreadable_resource_is_distinct_from_absent() {
	let pkg = tempfile::tempdir().expect("must create tempdir");
	fs::create_dir_all(pkg.path().join("queries").join("tags.scm")).expect("must create dir");

	let resolver = QueryResolver::from_dir(pkg.path());
	let err = resolver.get_query(NAME, "tags.scm").unwrap_err();
	assert!(matches!(err, QueryError::Io { .. }), "unexpected error: {err}");
	assert_eq!(resolver.get_query(NAME, "textobjects.scm").expect("absent"), "");
}

#[test]
fn packaged_queries() {
	assert_eq!(get_query(NAME, "highlights.scm").expect("highlights"), HIGHLIGHTS_QUERY);
	assert!(HIGHLIGHTS_QUERY.contains("(identifier) @variable"));
	for filename in ["folds.scm", "injections.scm", "nonexistent.scm"] {
		assert_eq!(get_query(NAME, filename).expect("absent"), "", "{filename}");
	}
}
