//! Materializes an Obsidian Base (a declarative definition of tables
//! over a Markdown note vault) into a Markdown table.
//!
//! The core of the crate is a sandboxed evaluator for the JS-flavored
//! expression language used by Bases: source rewriting and parsing in
//! [`exp`], the dynamic value domain in [`val`], builtin functions in
//! [`fnc`], per-file scope assembly with formula memoization in
//! [`scope`], filter trees in [`base`], and column materialization in
//! [`tbl`]. The evaluator has no host escape hatches: only whitelisted
//! bindings are reachable from an expression, and user source can never
//! construct new callables.

pub mod base;
pub mod err;
pub mod eval;
pub mod exp;
pub mod fnc;
pub mod scope;
pub mod tbl;
pub mod val;
pub mod vault;

use std::path::Path;

pub use err::Error;

/// Read a base file, load the vault, and materialize one view as a
/// Markdown document.
pub fn materialize_path(
	base_path: &Path,
	vault_root: &Path,
	view: Option<&str>,
) -> Result<String, Error> {
	let source = std::fs::read_to_string(base_path).map_err(|e| Error::Read {
		path: base_path.display().to_string(),
		message: e.to_string(),
	})?;
	let base = base::BaseDef::parse(&source)?;
	let vault = vault::load(vault_root)?;
	let out = tbl::materialize(&base, view, &vault)?;
	Ok(tbl::render(&out.view_name, &out.rows))
}
