//! Number methods and the `Number` namespace functions.

use crate::err::Error;
use crate::val::{Number, Value};

pub fn to_fixed((number, digits): (Value, Option<Value>)) -> Result<Value, Error> {
	let digits = digits.map(|v| v.to_number().to_int()).unwrap_or(0);
	if !(0..=100).contains(&digits) {
		return Err(Error::Evaluation(format!("toFixed() digits argument {digits} is out of range")));
	}
	Ok(format!("{:.*}", digits as usize, number.to_number().to_float()).into())
}

pub fn is_finite((value,): (Value,)) -> Result<Value, Error> {
	Ok(matches!(value, Value::Number(n) if n.is_finite()).into())
}

pub fn is_integer((value,): (Value,)) -> Result<Value, Error> {
	Ok(matches!(value, Value::Number(n) if n.as_exact_int().is_some()).into())
}

pub fn is_nan((value,): (Value,)) -> Result<Value, Error> {
	Ok(matches!(value, Value::Number(n) if n.is_nan()).into())
}

pub fn parse_float((value,): (Value,)) -> Result<Value, Error> {
	let text = value.to_text();
	let text = text.trim();
	// Take the longest numeric prefix, as JS parseFloat does
	let mut end = 0;
	let mut seen_dot = false;
	let mut seen_exp = false;
	for (i, c) in text.char_indices() {
		match c {
			'0'..='9' => end = i + 1,
			'-' | '+' if i == 0 => {}
			'.' if !seen_dot && !seen_exp => seen_dot = true,
			'e' | 'E' if !seen_exp && end > 0 => seen_exp = true,
			'-' | '+' if seen_exp => {}
			_ => break,
		}
	}
	match text[..end].parse::<f64>() {
		Ok(v) => Ok(Value::Number(Number::from(v))),
		Err(_) => Ok(Value::Number(Number::NAN)),
	}
}

pub fn parse_int((value, radix): (Value, Option<Value>)) -> Result<Value, Error> {
	let text = value.to_text();
	let text = text.trim();
	let radix = radix.map(|v| v.to_number().to_int()).filter(|r| (2..=36).contains(r)).unwrap_or(10);
	let (sign, digits) = match text.strip_prefix('-') {
		Some(rest) => (-1i64, rest),
		None => (1i64, text.strip_prefix('+').unwrap_or(text)),
	};
	let mut end = 0;
	for (i, c) in digits.char_indices() {
		if c.to_digit(radix as u32).is_some() {
			end = i + c.len_utf8();
		} else {
			break;
		}
	}
	match i64::from_str_radix(&digits[..end], radix as u32) {
		Ok(v) => Ok(Value::from(sign * v)),
		Err(_) => Ok(Value::Number(Number::NAN)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn to_fixed_rounds() {
		let out = to_fixed((Value::from(1.005), Some(Value::from(1i64)))).unwrap();
		assert!(out.strict_equal(&Value::from("1.0")));
		let out = to_fixed((Value::from(2.567), Some(Value::from(2i64)))).unwrap();
		assert!(out.strict_equal(&Value::from("2.57")));
	}

	#[test]
	fn parse_float_takes_prefix() {
		let out = parse_float((Value::from("3.5 days"),)).unwrap();
		assert!(out.strict_equal(&Value::from(3.5)));
		let out = parse_float((Value::from("x"),)).unwrap();
		assert!(matches!(out, Value::Number(n) if n.is_nan()));
	}

	#[test]
	fn parse_int_with_radix() {
		let out = parse_int((Value::from("ff"), Some(Value::from(16i64)))).unwrap();
		assert!(out.strict_equal(&Value::from(255i64)));
	}
}
