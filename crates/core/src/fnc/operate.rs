//! Operator semantics for the expression evaluator. Logical operators
//! short-circuit inside the evaluator itself and do not appear here.

use crate::err::Error;
use crate::val::Value;

pub fn neg(a: Value) -> Result<Value, Error> {
	Ok(Value::Number(a.to_number().neg()))
}

pub fn pos(a: Value) -> Result<Value, Error> {
	Ok(Value::Number(a.to_number()))
}

pub fn not(a: Value) -> Result<Value, Error> {
	Ok(Value::Bool(!a.is_truthy()))
}

pub fn bit_not(a: Value) -> Result<Value, Error> {
	// ToInt32, as JS `~` does
	let n = a.to_number().to_float();
	let i = if n.is_finite() {
		n as i64 as i32
	} else {
		0
	};
	Ok(Value::from(!i as i64))
}

pub fn add(a: Value, b: Value) -> Result<Value, Error> {
	Ok(a.add(b))
}

pub fn sub(a: Value, b: Value) -> Result<Value, Error> {
	Ok(a.sub(b))
}

pub fn mul(a: Value, b: Value) -> Result<Value, Error> {
	Ok(Value::Number(a.to_number().mul(b.to_number())))
}

pub fn div(a: Value, b: Value) -> Result<Value, Error> {
	Ok(Value::Number(a.to_number().div(b.to_number())))
}

pub fn rem(a: Value, b: Value) -> Result<Value, Error> {
	Ok(Value::Number(a.to_number().rem(b.to_number())))
}

pub fn pow(a: Value, b: Value) -> Result<Value, Error> {
	Ok(Value::Number(a.to_number().pow(b.to_number())))
}

pub fn equal(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(a.loose_equal(b)))
}

pub fn not_equal(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(!a.loose_equal(b)))
}

pub fn exact(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(a.strict_equal(b)))
}

pub fn not_exact(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(!a.strict_equal(b)))
}

pub fn less_than(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(matches!(a.compare(b), Some(std::cmp::Ordering::Less))))
}

pub fn less_than_or_equal(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(matches!(
		a.compare(b),
		Some(std::cmp::Ordering::Less) | Some(std::cmp::Ordering::Equal)
	)))
}

pub fn more_than(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(matches!(a.compare(b), Some(std::cmp::Ordering::Greater))))
}

pub fn more_than_or_equal(a: &Value, b: &Value) -> Result<Value, Error> {
	Ok(Value::Bool(matches!(
		a.compare(b),
		Some(std::cmp::Ordering::Greater) | Some(std::cmp::Ordering::Equal)
	)))
}

pub fn inside(a: &Value, b: &Value) -> Result<Value, Error> {
	match b {
		Value::Object(map) => Ok(Value::Bool(map.contains_key(&a.to_text()))),
		Value::Array(items) => {
			let n = a.to_number();
			let Some(i) = n.as_exact_int() else {
				return Ok(Value::Bool(false));
			};
			Ok(Value::Bool(i >= 0 && (i as usize) < items.len()))
		}
		v => Err(Error::Type(format!(
			"cannot use `in` on a {}",
			v.kind()
		))),
	}
}

pub fn instance_of(a: &Value, b: &Value) -> Result<Value, Error> {
	match b {
		// No builtin function is a constructor, so nothing is an
		// instance of one
		Value::Function(_) => {
			let _ = a;
			Ok(Value::Bool(false))
		}
		v => Err(Error::Type(format!(
			"right-hand side of `instanceof` is not callable (got a {})",
			v.kind()
		))),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::val::{Datetime, Number};

	#[test]
	fn comparison_with_nan_is_false() {
		let nan = Value::Number(Number::NAN);
		let one = Value::from(1i64);
		assert!(!less_than(&nan, &one).unwrap().is_truthy());
		assert!(!more_than(&nan, &one).unwrap().is_truthy());
	}

	#[test]
	fn string_comparison_is_lexical() {
		assert!(less_than(&Value::from("abc"), &Value::from("abd")).unwrap().is_truthy());
		assert!(!less_than(&Value::from("10"), &Value::from("9")).unwrap().is_truthy());
	}

	#[test]
	fn date_comparison_is_numeric() {
		let a = Value::Datetime(Datetime::parse("2024-01-01").unwrap());
		let b = Value::Datetime(Datetime::parse("2024-06-01").unwrap());
		assert!(less_than(&a, &b).unwrap().is_truthy());
	}

	#[test]
	fn in_operator() {
		let arr = Value::Array(vec![Value::from(10i64)].into());
		assert!(inside(&Value::from(0i64), &arr).unwrap().is_truthy());
		assert!(!inside(&Value::from(1i64), &arr).unwrap().is_truthy());
		assert!(inside(&Value::from("x"), &Value::from(1i64)).is_err());
	}
}
