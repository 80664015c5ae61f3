//! Per-file scope assembly and the memoizing formula proxy.

use std::cell::RefCell;

use indexmap::IndexMap;

use crate::err::Error;
use crate::eval;
use crate::exp::ExprCache;
use crate::fnc::{globals, namespaces};
use crate::val::{FileId, Object, Value};
use crate::vault::Vault;

/// Names a frontmatter key must not shadow when promoted to a top-level
/// binding. `if` is included because the pre-parse rewrite of `if(`
/// calls depends on it staying a global.
const RESERVED: &[&str] = &[
	"arguments",
	"eval",
	"prototype",
	"constructor",
	"__proto__",
	"super",
	"globalThis",
	"window",
	"if",
];

fn is_valid_identifier(name: &str) -> bool {
	let mut chars = name.chars();
	match chars.next() {
		Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
		_ => return false,
	}
	chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

enum FormulaSlot {
	InProgress,
	Done(Value),
}

/// The evaluation scope for a single file.
///
/// Immutable after construction, apart from the formula memo table.
/// Bindings are inserted in precedence order and the first insertion of
/// a key wins.
pub struct Scope<'a> {
	vault: &'a Vault,
	file: FileId,
	bindings: IndexMap<String, Value>,
	formulas: &'a IndexMap<String, String>,
	cache: &'a ExprCache,
	memo: RefCell<IndexMap<String, FormulaSlot>>,
}

impl<'a> Scope<'a> {
	pub fn new(
		vault: &'a Vault,
		file: FileId,
		formulas: &'a IndexMap<String, String>,
		cache: &'a ExprCache,
	) -> Self {
		let note = vault.get(file);
		let mut bindings: IndexMap<String, Value> = IndexMap::new();
		let mut bind = |name: &str, value: Value| {
			if !bindings.contains_key(name) {
				bindings.insert(name.to_string(), value);
			}
		};

		// The file object
		bind("file", Value::File(file));

		// Frontmatter and property aliases; `metadata` is reserved and
		// always empty
		bind("frontmatter", Value::Object(note.frontmatter.clone()));
		bind("metadata", Value::Object(Object::default()));
		bind("note", Value::Object(note.frontmatter.clone()));
		bind("properties", Value::Object(note.properties.clone()));

		// Global functions and their aliases
		for (name, function) in globals::all() {
			bind(name, Value::Function(function));
		}

		// Builtin namespaces
		for (name, value) in namespaces::all() {
			bind(name, value);
		}

		// Promoted frontmatter identifiers
		for (key, value) in note.frontmatter.iter() {
			if is_valid_identifier(key) && !RESERVED.contains(&key.as_str()) {
				bind(key.as_str(), value.clone());
			}
		}

		Self {
			vault,
			file,
			bindings,
			formulas,
			cache,
			memo: RefCell::new(IndexMap::new()),
		}
	}

	pub fn vault(&self) -> &Vault {
		self.vault
	}

	pub fn file(&self) -> FileId {
		self.file
	}

	pub fn lookup(&self, name: &str) -> Option<Value> {
		self.bindings.get(name).cloned()
	}

	pub fn has_binding(&self, name: &str) -> bool {
		self.bindings.contains_key(name)
	}

	/// Access a formula result through the memoizing proxy.
	///
	/// The formula body is evaluated at most once per file; re-entrant
	/// access while it is still evaluating is a circular reference.
	pub fn formula(&self, name: &str) -> Result<Value, Error> {
		let Some(source) = self.formulas.get(name) else {
			return Ok(Value::Undefined);
		};
		match self.memo.borrow().get(name) {
			Some(FormulaSlot::Done(value)) => return Ok(value.clone()),
			Some(FormulaSlot::InProgress) => {
				return Err(Error::FormulaCycle(name.to_string()));
			}
			None => {}
		}
		self.memo.borrow_mut().insert(name.to_string(), FormulaSlot::InProgress);
		let result = self
			.cache
			.parse(source)
			.and_then(|expr| eval::evaluate(&expr, self))
			.map_err(|e| e.context(format!("formula \"{name}\"")));
		match result {
			Ok(value) => {
				self.memo
					.borrow_mut()
					.insert(name.to_string(), FormulaSlot::Done(value.clone()));
				Ok(value)
			}
			Err(e) => {
				// Drop the in-progress marker so a later access retries
				// rather than reporting a bogus cycle
				self.memo.borrow_mut().shift_remove(name);
				Err(e)
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::exp;
	use crate::vault::Note;

	fn vault_with_frontmatter(entries: Vec<(&str, Value)>) -> Vault {
		let frontmatter: Object =
			entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
		let note = Note {
			relative_path: "a.md".to_string(),
			name: "a".to_string(),
			folder: ".".to_string(),
			ext: "md".to_string(),
			properties: frontmatter.clone(),
			frontmatter,
			..Default::default()
		};
		Vault::new(vec![note])
	}

	fn eval_str(source: &str, scope: &Scope) -> Result<Value, Error> {
		eval::evaluate(&exp::parse(source).unwrap(), scope)
	}

	#[test]
	fn promotes_valid_identifiers() {
		let vault = vault_with_frontmatter(vec![
			("status", Value::from("open")),
			("two words", Value::from("skipped")),
			("if", Value::from("reserved")),
		]);
		let formulas = IndexMap::new();
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);

		assert!(eval_str("status", &scope).unwrap().strict_equal(&Value::from("open")));
		assert!(eval_str("two", &scope).is_err());
		// The reserved key stays reachable through the frontmatter map
		assert!(eval_str("frontmatter[\"if\"]", &scope)
			.unwrap()
			.strict_equal(&Value::from("reserved")));
		assert!(eval_str("if(true, 1, 2)", &scope).unwrap().strict_equal(&Value::from(1i64)));
	}

	#[test]
	fn frontmatter_does_not_shadow_file() {
		let vault = vault_with_frontmatter(vec![("file", Value::from("nope"))]);
		let formulas = IndexMap::new();
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);
		assert!(eval_str("file.name", &scope).unwrap().strict_equal(&Value::from("a")));
	}

	#[test]
	fn file_file_is_self_referential() {
		let vault = vault_with_frontmatter(vec![]);
		let formulas = IndexMap::new();
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);
		assert!(eval_str("file.file.file.name", &scope).unwrap().strict_equal(&Value::from("a")));
	}

	#[test]
	fn formula_is_memoized() {
		let vault = vault_with_frontmatter(vec![("n", Value::from(2i64))]);
		let mut formulas = IndexMap::new();
		formulas.insert("double".to_string(), "n * 2".to_string());
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);

		assert!(scope.formula("double").unwrap().strict_equal(&Value::from(4i64)));
		assert!(scope.formula("double").unwrap().strict_equal(&Value::from(4i64)));
		assert!(scope.formula("missing").unwrap().is_undefined());
	}

	#[test]
	fn formula_cycle_is_detected() {
		let vault = vault_with_frontmatter(vec![]);
		let mut formulas = IndexMap::new();
		formulas.insert("a".to_string(), "formula.b + 1".to_string());
		formulas.insert("b".to_string(), "formula.a + 1".to_string());
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);

		let err = scope.formula("a").unwrap_err();
		let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
		assert!(chain
			.iter()
			.any(|m| m.contains("Circular formula reference detected for \"a\"")
				|| m.contains("Circular formula reference detected for \"b\"")));
	}

	#[test]
	fn formulas_can_reference_other_formulas() {
		let vault = vault_with_frontmatter(vec![("n", Value::from(3i64))]);
		let mut formulas = IndexMap::new();
		formulas.insert("double".to_string(), "n * 2".to_string());
		formulas.insert("quad".to_string(), "formula.double * 2".to_string());
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);

		assert!(scope.formula("quad").unwrap().strict_equal(&Value::from(12i64)));
	}
}
