//! The `Math` namespace functions.

use crate::err::Error;
use crate::val::{Number, Value};

fn unary(value: Value, f: impl Fn(f64) -> f64) -> Result<Value, Error> {
	Ok(Value::Number(Number::from(f(value.to_number().to_float()))))
}

pub fn abs((value,): (Value,)) -> Result<Value, Error> {
	match value.to_number() {
		Number::Int(v) => Ok(Value::from(v.saturating_abs())),
		Number::Float(v) => Ok(Value::from(v.abs())),
	}
}

pub fn ceil((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::ceil)
}

pub fn floor((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::floor)
}

pub fn round((value,): (Value,)) -> Result<Value, Error> {
	// JS rounds half-up, not half-away-from-zero
	unary(value, |v| (v + 0.5).floor())
}

pub fn trunc((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::trunc)
}

pub fn sqrt((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::sqrt)
}

pub fn sign((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::signum)
}

pub fn pow((base, exponent): (Value, Value)) -> Result<Value, Error> {
	Ok(Value::Number(base.to_number().pow(exponent.to_number())))
}

pub fn exp((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::exp)
}

pub fn log((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::ln)
}

pub fn log2((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::log2)
}

pub fn log10((value,): (Value,)) -> Result<Value, Error> {
	unary(value, f64::log10)
}

/// `Math.min`: NaN-poisoning, `Infinity` on no arguments
pub fn min(args: Vec<Value>) -> Result<Value, Error> {
	let mut out = f64::INFINITY;
	for arg in args {
		let v = arg.to_number().to_float();
		if v.is_nan() {
			return Ok(Value::Number(Number::NAN));
		}
		out = out.min(v);
	}
	Ok(Value::Number(Number::from(out)))
}

/// `Math.max`: NaN-poisoning, `-Infinity` on no arguments
pub fn max(args: Vec<Value>) -> Result<Value, Error> {
	let mut out = f64::NEG_INFINITY;
	for arg in args {
		let v = arg.to_number().to_float();
		if v.is_nan() {
			return Ok(Value::Number(Number::NAN));
		}
		out = out.max(v);
	}
	Ok(Value::Number(Number::from(out)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_half_up() {
		assert!(round((Value::from(-0.5),)).unwrap().strict_equal(&Value::from(0.0)));
		assert!(round((Value::from(2.5),)).unwrap().strict_equal(&Value::from(3.0)));
	}

	#[test]
	fn min_max_poisoned_by_nan() {
		let out = max(vec![Value::from(1i64), Value::Number(Number::NAN)]).unwrap();
		assert!(matches!(out, Value::Number(n) if n.is_nan()));
	}
}
