//! String methods, dispatched with the receiver as the first argument.

use crate::err::Error;
use crate::val::{Array, Value};

pub fn uppercase((string,): (Value,)) -> Result<Value, Error> {
	Ok(string.to_text().to_uppercase().into())
}

pub fn lowercase((string,): (Value,)) -> Result<Value, Error> {
	Ok(string.to_text().to_lowercase().into())
}

pub fn trim((string,): (Value,)) -> Result<Value, Error> {
	Ok(string.to_text().trim().into())
}

pub fn includes((string, search): (Value, Value)) -> Result<Value, Error> {
	Ok(string.to_text().contains(&search.to_text()).into())
}

pub fn starts_with((string, search): (Value, Value)) -> Result<Value, Error> {
	Ok(string.to_text().starts_with(&search.to_text()).into())
}

pub fn ends_with((string, search): (Value, Value)) -> Result<Value, Error> {
	Ok(string.to_text().ends_with(&search.to_text()).into())
}

pub fn split((string, separator): (Value, Value)) -> Result<Value, Error> {
	let string = string.to_text();
	let separator = separator.to_text();
	let parts: Array = if separator.is_empty() {
		string.chars().map(|c| Value::from(c.to_string())).collect()
	} else {
		string.split(&separator).map(Value::from).collect()
	};
	Ok(parts.into())
}

pub fn slice((string, start, end): (Value, Option<Value>, Option<Value>)) -> Result<Value, Error> {
	let chars: Vec<char> = string.to_text().chars().collect();
	let (start, end) = slice_bounds(chars.len(), start, end);
	Ok(chars[start..end].iter().collect::<String>().into())
}

/// Resolve JS-style slice arguments: negative indexes count from the
/// end, and everything is clamped to the length.
pub(super) fn slice_bounds(len: usize, start: Option<Value>, end: Option<Value>) -> (usize, usize) {
	let resolve = |v: Option<Value>, default: i64| -> i64 {
		let Some(v) = v else {
			return default;
		};
		if v.is_undefined() {
			return default;
		}
		let n = v.to_number();
		if n.is_nan() {
			return 0;
		}
		n.to_float() as i64
	};
	let clamp = |i: i64| -> usize {
		if i < 0 {
			(len as i64 + i).max(0) as usize
		} else {
			(i as usize).min(len)
		}
	};
	let start = clamp(resolve(start, 0));
	let end = clamp(resolve(end, len as i64));
	(start, end.max(start))
}

pub fn replace((string, pattern, replacement): (Value, Value, Option<Value>)) -> Result<Value, Error> {
	let string = string.to_text();
	let replacement = replacement.map(|v| v.to_text()).unwrap_or_else(|| "undefined".to_string());
	match pattern {
		// A regex pattern replaces the first match
		Value::Regex(re) => Ok(re.replace_first(&string, &replacement).into()),
		pattern => Ok(string.replacen(&pattern.to_text(), &replacement, 1).into()),
	}
}

pub fn replace_all((string, pattern, replacement): (Value, Value, Option<Value>)) -> Result<Value, Error> {
	let string = string.to_text();
	let replacement = replacement.map(|v| v.to_text()).unwrap_or_else(|| "undefined".to_string());
	Ok(string.replace(&pattern.to_text(), &replacement).into())
}

pub fn repeat((string, count): (Value, Value)) -> Result<Value, Error> {
	let count = count.to_number();
	if count.to_float() < 0.0 || count.is_nan() {
		return Err(Error::Evaluation("Invalid count value for repeat()".to_string()));
	}
	Ok(string.to_text().repeat(count.to_int() as usize).into())
}

pub fn index_of((string, search): (Value, Value)) -> Result<Value, Error> {
	let string = string.to_text();
	let search = search.to_text();
	match string.find(&search) {
		Some(byte) => Ok(Value::from(string[..byte].chars().count() as i64)),
		None => Ok(Value::from(-1i64)),
	}
}

pub fn char_at((string, index): (Value, Value)) -> Result<Value, Error> {
	let index = index.to_number();
	let index = if index.is_nan() {
		0
	} else {
		index.to_int()
	};
	if index < 0 {
		return Ok(Value::from(""));
	}
	let out = string.to_text().chars().nth(index as usize).map(String::from).unwrap_or_default();
	Ok(out.into())
}

pub fn pad_start((string, length, pad): (Value, Value, Option<Value>)) -> Result<Value, Error> {
	let string = string.to_text();
	let length = length.to_number().to_int().max(0) as usize;
	let pad = pad.map(|v| v.to_text()).unwrap_or_else(|| " ".to_string());
	let current = string.chars().count();
	if current >= length || pad.is_empty() {
		return Ok(string.into());
	}
	let mut out = String::new();
	while out.chars().count() < length - current {
		out.push_str(&pad);
	}
	let out: String = out.chars().take(length - current).collect();
	Ok(format!("{out}{string}").into())
}

pub fn to_string((value,): (Value,)) -> Result<Value, Error> {
	Ok(value.to_text().into())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn uppercase_of_title() {
		let out = uppercase((Value::from("Project Alpha Launch"),)).unwrap();
		assert!(out.strict_equal(&Value::from("PROJECT ALPHA LAUNCH")));
	}

	#[test]
	fn slice_with_negative_index() {
		let out = slice((Value::from("hello"), Some(Value::from(-3i64)), None)).unwrap();
		assert!(out.strict_equal(&Value::from("llo")));
	}

	#[test]
	fn replace_first_only() {
		let out = replace((Value::from("a-a"), Value::from("a"), Some(Value::from("b")))).unwrap();
		assert!(out.strict_equal(&Value::from("b-a")));
	}

	#[test]
	fn split_to_array() {
		let out = split((Value::from("a,b"), Value::from(","))).unwrap();
		match out {
			Value::Array(parts) => assert_eq!(parts.len(), 2),
			v => panic!("expected array, got {v:?}"),
		}
	}
}
