//! The read-only builtin namespaces exposed in every scope, e.g.
//! `Math.max` or `JSON.stringify`. Namespaces the evaluator has nothing
//! to offer for are still bound, as empty objects, so that referencing
//! them is not an error.

use std::f64::consts::{E, PI};

use crate::val::{Function, Object, Value};

fn namespace(entries: &[(&str, &'static str)]) -> Object {
	entries
		.iter()
		.map(|(name, target)| (name.to_string(), Value::Function(Function(target))))
		.collect()
}

fn math() -> Object {
	let mut out = namespace(&[
		("abs", "math::abs"),
		("ceil", "math::ceil"),
		("floor", "math::floor"),
		("round", "math::round"),
		("trunc", "math::trunc"),
		("sqrt", "math::sqrt"),
		("sign", "math::sign"),
		("pow", "math::pow"),
		("exp", "math::exp"),
		("log", "math::log"),
		("log2", "math::log2"),
		("log10", "math::log10"),
		("min", "math::min"),
		("max", "math::max"),
	]);
	out.insert("PI".to_string(), Value::from(PI));
	out.insert("E".to_string(), Value::from(E));
	out
}

fn number() -> Object {
	let mut out = namespace(&[
		("isFinite", "number::is_finite"),
		("isInteger", "number::is_integer"),
		("isNaN", "number::is_nan"),
		("parseFloat", "number::parse_float"),
		("parseInt", "number::parse_int"),
	]);
	out.insert("MAX_SAFE_INTEGER".to_string(), Value::from(9_007_199_254_740_991i64));
	out.insert("MIN_SAFE_INTEGER".to_string(), Value::from(-9_007_199_254_740_991i64));
	out.insert("EPSILON".to_string(), Value::from(f64::EPSILON));
	out
}

/// Every namespace binding, in the order they enter scope.
pub fn all() -> Vec<(&'static str, Value)> {
	let empty = Object::default;
	vec![
		("Array", Value::Object(namespace(&[("isArray", "array::is_array")]))),
		("Boolean", Value::Object(empty())),
		("Date", Value::Object(namespace(&[("now", "time::now_millis")]))),
		(
			"JSON",
			Value::Object(namespace(&[
				("stringify", "json::stringify"),
				("parse", "json::parse"),
			])),
		),
		("Map", Value::Object(empty())),
		("Math", Value::Object(math())),
		("Number", Value::Object(number())),
		(
			"Object",
			Value::Object(namespace(&[
				("keys", "object::keys"),
				("values", "object::values"),
				("entries", "object::entries"),
			])),
		),
		("Reflect", Value::Object(empty())),
		("RegExp", Value::Object(empty())),
		("Set", Value::Object(empty())),
		("String", Value::Object(empty())),
		("Symbol", Value::Object(empty())),
		("WeakMap", Value::Object(empty())),
		("WeakSet", Value::Object(empty())),
		("BigInt", Value::Object(empty())),
	]
}
