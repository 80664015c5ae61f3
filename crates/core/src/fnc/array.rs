//! Array methods, dispatched with the receiver as the first argument.

use crate::err::Error;
use crate::val::{Array, Value};

fn receiver(name: &str, value: Value) -> Result<Array, Error> {
	match value {
		Value::Array(v) => Ok(v),
		v => Err(Error::Type(format!("{name}() called on a {}", v.kind()))),
	}
}

/// `Array.isArray`
pub fn is_array((value,): (Value,)) -> Result<Value, Error> {
	Ok(matches!(value, Value::Array(_)).into())
}

pub fn includes((array, search): (Value, Value)) -> Result<Value, Error> {
	let array = receiver("includes", array)?;
	Ok(array.iter().any(|v| v.strict_equal(&search)).into())
}

pub fn join((array, separator): (Value, Option<Value>)) -> Result<Value, Error> {
	let array = receiver("join", array)?;
	let separator = separator.map(|v| v.to_text()).unwrap_or_else(|| ",".to_string());
	let parts: Vec<String> = array
		.iter()
		.map(|v| match v {
			Value::Undefined | Value::Null => String::new(),
			v => v.to_text(),
		})
		.collect();
	Ok(parts.join(&separator).into())
}

pub fn index_of((array, search): (Value, Value)) -> Result<Value, Error> {
	let array = receiver("indexOf", array)?;
	match array.iter().position(|v| v.strict_equal(&search)) {
		Some(i) => Ok(Value::from(i as i64)),
		None => Ok(Value::from(-1i64)),
	}
}

pub fn slice((array, start, end): (Value, Option<Value>, Option<Value>)) -> Result<Value, Error> {
	let array = receiver("slice", array)?;
	let (start, end) = super::string::slice_bounds(array.len(), start, end);
	Ok(Value::Array(array.0[start..end].to_vec().into()))
}

pub fn concat(args: Vec<Value>) -> Result<Value, Error> {
	let mut args = args.into_iter();
	let array = receiver("concat", args.next().unwrap_or(Value::Undefined))?;
	let mut out = array.0;
	for arg in args {
		match arg {
			Value::Array(v) => out.extend(v.0),
			v => out.push(v),
		}
	}
	Ok(Value::Array(out.into()))
}

pub fn reverse((array,): (Value,)) -> Result<Value, Error> {
	let array = receiver("reverse", array)?;
	let mut out = array.0;
	out.reverse();
	Ok(Value::Array(out.into()))
}

pub fn flat((array, depth): (Value, Option<Value>)) -> Result<Value, Error> {
	let array = receiver("flat", array)?;
	let depth = depth.map(|v| v.to_number().to_int()).unwrap_or(1);
	fn flatten(items: Vec<Value>, depth: i64, out: &mut Vec<Value>) {
		for item in items {
			match item {
				Value::Array(inner) if depth > 0 => flatten(inner.0, depth - 1, out),
				item => out.push(item),
			}
		}
	}
	let mut out = Vec::new();
	flatten(array.0, depth, &mut out);
	Ok(Value::Array(out.into()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn array(values: Vec<i64>) -> Value {
		Value::Array(values.into_iter().map(Value::from).collect())
	}

	#[test]
	fn includes_is_strict() {
		assert!(includes((array(vec![1, 2]), Value::from(2i64))).unwrap().is_truthy());
		assert!(!includes((array(vec![1, 2]), Value::from("2"))).unwrap().is_truthy());
	}

	#[test]
	fn join_skips_nullish() {
		let arr = Value::Array(vec![Value::from(1i64), Value::Null, Value::from(3i64)].into());
		let out = join((arr, Some(Value::from("-")))).unwrap();
		assert!(out.strict_equal(&Value::from("1--3")));
	}

	#[test]
	fn flat_one_level() {
		let nested = Value::Array(vec![Value::from(1i64), array(vec![2, 3])].into());
		let out = flat((nested, None)).unwrap();
		match out {
			Value::Array(v) => assert_eq!(v.len(), 3),
			v => panic!("expected array, got {v:?}"),
		}
	}
}
