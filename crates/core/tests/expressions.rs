//! Expression-level behavior, evaluated against a single-file scope.

use indexmap::IndexMap;
use materialize_base_core::err::Error;
use materialize_base_core::exp::{self, ExprCache};
use materialize_base_core::scope::Scope;
use materialize_base_core::val::{FileId, Object, Value};
use materialize_base_core::vault::{Note, Vault};
use materialize_base_core::eval;

fn vault() -> Vault {
	let frontmatter: Object = vec![
		("title".to_string(), Value::from("Project Alpha Launch")),
		("status".to_string(), Value::from("open")),
		("count".to_string(), Value::from(3i64)),
	]
	.into_iter()
	.collect();
	Vault::new(vec![Note {
		relative_path: "projects/alpha.md".to_string(),
		name: "alpha".to_string(),
		folder: "projects".to_string(),
		ext: "md".to_string(),
		tags: vec!["project".to_string()],
		properties: frontmatter.clone(),
		frontmatter,
		..Default::default()
	}])
}

fn eval_str(source: &str) -> Result<Value, Error> {
	let vault = vault();
	let formulas = IndexMap::new();
	let cache = ExprCache::new();
	let scope = Scope::new(&vault, FileId(0), &formulas, &cache);
	eval::evaluate(&exp::parse(source)?, &scope)
}

fn eval_ok(source: &str) -> Value {
	eval_str(source).unwrap_or_else(|e| panic!("`{source}` failed: {e}"))
}

#[test]
fn date_minus_duration_string_is_a_date() {
	// Scenario: subtracting a week lands exactly seven days back
	let out = eval_ok("date(\"2024-01-08T00:00:00Z\") - \"1 week\"");
	match out {
		Value::Datetime(v) => assert_eq!(v.to_iso_string(), "2024-01-01T00:00:00.000Z"),
		v => panic!("expected a date, got {v:?}"),
	}
}

#[test]
fn date_plus_string_equals_date_plus_duration() {
	let a = eval_ok("date(\"2024-01-08\") + \"1 day\"");
	let b = eval_ok("date(\"2024-01-08\") + duration(\"1 day\")");
	assert!(a.strict_equal(&b));
}

#[test]
fn date_difference_is_milliseconds() {
	let out = eval_ok("date(\"2024-01-08\") - date(\"2024-01-01\")");
	assert!(out.strict_equal(&Value::from(604_800_000i64)));
}

#[test]
fn nullish_coalescing_takes_left_unless_nullish() {
	assert!(eval_ok("null ?? 5").strict_equal(&Value::from(5i64)));
	assert!(eval_ok("undefined ?? 5").strict_equal(&Value::from(5i64)));
	assert!(eval_ok("0 ?? 5").strict_equal(&Value::from(0i64)));
	assert!(eval_ok("\"\" ?? 5").strict_equal(&Value::from("")));
	assert!(eval_ok("false ?? 5").strict_equal(&Value::from(false)));
}

#[test]
fn typeof_tolerates_undeclared_identifiers() {
	assert!(eval_ok("typeof undeclared_identifier === \"undefined\"").is_truthy());
	assert!(eval_ok("typeof title === \"string\"").is_truthy());
}

#[test]
fn undeclared_identifier_is_a_reference_error() {
	let err = eval_str("undeclared_identifier").unwrap_err();
	assert!(matches!(err, Error::Reference(_)));
}

#[test]
fn member_access_on_nullish_is_a_type_error() {
	let err = eval_str("null.anything").unwrap_err();
	assert!(matches!(err, Error::Type(_)));
}

#[test]
fn regex_literal_matches() {
	assert!(eval_ok("/alpha/i.matches(note.title)").is_truthy());
	assert!(!eval_ok("/beta/i.matches(note.title)").is_truthy());
}

#[test]
fn if_global_selects_branches() {
	assert!(eval_ok("if(count > 2, \"big\", \"small\")").strict_equal(&Value::from("big")));
	assert!(eval_ok("if(false, \"big\")").strict_equal(&Value::Null));
}

#[test]
fn promoted_frontmatter_identifiers_are_bare_bindings() {
	assert!(eval_ok("status == \"open\"").is_truthy());
	assert!(eval_ok("title.toUpperCase()").strict_equal(&Value::from("PROJECT ALPHA LAUNCH")));
}

#[test]
fn file_object_fields_and_methods() {
	assert!(eval_ok("file.name").strict_equal(&Value::from("alpha")));
	assert!(eval_ok("file.folder").strict_equal(&Value::from("projects")));
	assert!(eval_ok("file.file.name").strict_equal(&Value::from("alpha")));
	assert!(eval_ok("file.hasTag(\"project\")").is_truthy());
	assert!(!eval_ok("file.hasTag()").is_truthy());
	assert!(eval_ok("file.hasTag(\"PROJECT\")").is_truthy());
	assert!(eval_ok("file.inFolder(\"projects\")").is_truthy());
	assert!(!eval_ok("file.inFolder(\"proj\")").is_truthy());
	assert!(eval_ok("file.hasProperty(\"status\")").is_truthy());
}

#[test]
fn namespaces_are_reachable() {
	assert!(eval_ok("Math.max(1, 2, 3)").strict_equal(&Value::from(3.0)));
	assert!(eval_ok("JSON.stringify([1, 2])").strict_equal(&Value::from("[1,2]")));
	assert!(eval_ok("Object.keys(note).length > 0").is_truthy());
	assert!(eval_ok("Array.isArray(list(1))").is_truthy());
	assert!(eval_ok("Number.parseFloat(\"2.5x\")").strict_equal(&Value::from(2.5)));
}

#[test]
fn evaluation_is_deterministic() {
	let source = "title.toUpperCase() + \"-\" + (count * 2)";
	let a = eval_ok(source);
	let b = eval_ok(source);
	assert!(a.strict_equal(&b));
}

#[test]
fn ternary_short_circuits() {
	// The untaken branch would raise if evaluated
	assert!(eval_ok("true ? 1 : missing_name").strict_equal(&Value::from(1i64)));
	assert!(eval_ok("false ? missing_name : 2").strict_equal(&Value::from(2i64)));
	assert!(eval_ok("false || count == 3").is_truthy());
	assert!(eval_ok("true || missing_name").is_truthy());
	assert!(!eval_ok("false && missing_name").is_truthy());
}

#[test]
fn link_global_builds_links() {
	assert!(eval_ok("link(\"other.md\", \"Other\").display").strict_equal(&Value::from("Other")));
	assert!(eval_ok("link(\"other.md\").path").strict_equal(&Value::from("other.md")));
	assert!(eval_str("link(\"\")").is_err());
	assert!(eval_ok("file(\"attachments/img.png\").path")
		.strict_equal(&Value::from("attachments/img.png")));
}

#[test]
fn in_and_instanceof() {
	assert!(eval_ok("\"title\" in note").is_truthy());
	assert!(!eval_ok("\"missing\" in note").is_truthy());
	assert!(eval_str("\"x\" in title").is_err());
	assert!(!eval_ok("1 instanceof now").is_truthy());
	assert!(eval_str("1 instanceof 2").is_err());
}
