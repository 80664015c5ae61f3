//! The compositional filter algebra: and/or/not trees over expression
//! strings.

use crate::err::Error;
use crate::eval;
use crate::exp::ExprCache;
use crate::scope::Scope;

/// A filter tree from a base or view definition.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
	/// A raw expression source string
	Expr(String),
	/// A compound node; a missing group is vacuously satisfied
	Group {
		and: Option<Vec<Filter>>,
		or: Option<Vec<Filter>>,
		not: Option<Vec<Filter>>,
	},
}

impl Filter {
	/// Decode a filter tree from YAML, rejecting any mapping key other
	/// than `and`, `or` and `not`.
	pub fn decode(yaml: &serde_yaml::Value) -> Result<Self, Error> {
		match yaml {
			serde_yaml::Value::String(v) => Ok(Filter::Expr(v.clone())),
			serde_yaml::Value::Mapping(map) => {
				let mut and = None;
				let mut or = None;
				let mut not = None;
				for (key, value) in map {
					let key = match key.as_str() {
						Some(v) => v,
						None => {
							return Err(Error::Shape(
								"filter group keys must be strings".to_string(),
							))
						}
					};
					let group = match key {
						"and" => &mut and,
						"or" => &mut or,
						"not" => &mut not,
						other => {
							return Err(Error::Shape(format!(
								"unknown filter key \"{other}\" (expected \"and\", \"or\", or \"not\")"
							)))
						}
					};
					let serde_yaml::Value::Sequence(items) = value else {
						return Err(Error::Shape(format!("\"{key}\" group must be an array")));
					};
					let mut filters = Vec::with_capacity(items.len());
					for item in items {
						filters.push(Filter::decode(item)?);
					}
					*group = Some(filters);
				}
				Ok(Filter::Group {
					and,
					or,
					not,
				})
			}
			_ => Err(Error::Shape(
				"filter must be an expression string or an and/or/not mapping".to_string(),
			)),
		}
	}
}

/// Evaluate a filter tree against a file's scope. A missing filter
/// matches everything.
pub fn matches(
	filter: Option<&Filter>,
	scope: &Scope,
	cache: &ExprCache,
	context: &str,
) -> Result<bool, Error> {
	let Some(filter) = filter else {
		return Ok(true);
	};
	match filter {
		Filter::Expr(source) => {
			let out = cache
				.parse(source)
				.and_then(|expr| eval::evaluate(&expr, scope))
				.map_err(|e| e.context(format!("Failed to process {context}")))?;
			Ok(out.is_truthy())
		}
		Filter::Group {
			and,
			or,
			not,
		} => {
			if let Some(group) = and {
				let context = format!("{context} (and)");
				for filter in group {
					if !matches(Some(filter), scope, cache, &context)? {
						return Ok(false);
					}
				}
			}
			if let Some(group) = or {
				// An empty or-group matches nothing
				let context = format!("{context} (or)");
				let mut any = false;
				for filter in group {
					if matches(Some(filter), scope, cache, &context)? {
						any = true;
						break;
					}
				}
				if !any {
					return Ok(false);
				}
			}
			if let Some(group) = not {
				let context = format!("{context} (not)");
				for filter in group {
					if matches(Some(filter), scope, cache, &context)? {
						return Ok(false);
					}
				}
			}
			Ok(true)
		}
	}
}

#[cfg(test)]
mod tests {
	use indexmap::IndexMap;

	use super::*;
	use crate::val::{FileId, Object, Value};
	use crate::vault::{Note, Vault};

	fn yaml(source: &str) -> serde_yaml::Value {
		serde_yaml::from_str(source).unwrap()
	}

	fn test_vault() -> Vault {
		let frontmatter: Object =
			vec![("status".to_string(), Value::from("open"))].into_iter().collect();
		Vault::new(vec![Note {
			relative_path: "a.md".to_string(),
			name: "a".to_string(),
			folder: ".".to_string(),
			properties: frontmatter.clone(),
			frontmatter,
			..Default::default()
		}])
	}

	fn check(filter: &Filter) -> Result<bool, Error> {
		let vault = test_vault();
		let formulas = IndexMap::new();
		let cache = ExprCache::new();
		let scope = Scope::new(&vault, FileId(0), &formulas, &cache);
		matches(Some(filter), &scope, &cache, "filters")
	}

	#[test]
	fn decode_rejects_unknown_keys() {
		let err = Filter::decode(&yaml("xor:\n  - \"true\"")).unwrap_err();
		assert!(err.to_string().contains("unknown filter key \"xor\""));
	}

	#[test]
	fn decode_rejects_non_array_group() {
		let err = Filter::decode(&yaml("and:\n  x: 1")).unwrap_err();
		assert!(err.to_string().contains("\"and\" group must be an array"));
	}

	#[test]
	fn and_group_short_circuits() {
		let filter = Filter::decode(&yaml("and:\n  - \"status == 'open'\"\n  - \"false\"")).unwrap();
		assert!(!check(&filter).unwrap());
		let filter = Filter::decode(&yaml("and:\n  - \"status == 'open'\"\n  - \"true\"")).unwrap();
		assert!(check(&filter).unwrap());
	}

	#[test]
	fn empty_or_group_matches_nothing() {
		let filter = Filter::decode(&yaml("or: []")).unwrap();
		assert!(!check(&filter).unwrap());
	}

	#[test]
	fn missing_groups_are_vacuous() {
		let filter = Filter::decode(&yaml("and: []")).unwrap();
		assert!(check(&filter).unwrap());
	}

	#[test]
	fn not_group_inverts() {
		let filter = Filter::decode(&yaml("not:\n  - \"status == 'closed'\"")).unwrap();
		assert!(check(&filter).unwrap());
		let filter = Filter::decode(&yaml("not:\n  - \"status == 'open'\"")).unwrap();
		assert!(!check(&filter).unwrap());
	}

	#[test]
	fn failures_carry_context() {
		let filter = Filter::Expr("nonsense_name".to_string());
		let err = check(&filter).unwrap_err();
		assert!(err.to_string().contains("Failed to process filters"));
	}
}
