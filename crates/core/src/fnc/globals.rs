//! The global function library available in every scope.

use crate::err::Error;
use crate::val::{Datetime, Duration, Function, Link, Number, Value};

/// Every global, under its public name. `if` and `file` are reached
/// through their rewritten aliases, which are bound alongside.
pub fn all() -> Vec<(&'static str, Function)> {
	vec![
		("today", Function("today")),
		("now", Function("now")),
		("date", Function("date")),
		("duration", Function("duration")),
		("if", Function("_if")),
		("_if", Function("_if")),
		("file", Function("_fileFn")),
		("_fileFn", Function("_fileFn")),
		("link", Function("link")),
		("list", Function("list")),
		("max", Function("max")),
		("min", Function("min")),
		("number", Function("number")),
		("image", Function("image")),
		("icon", Function("icon")),
	]
}

pub fn today(_: ()) -> Result<Value, Error> {
	Ok(Value::Datetime(Datetime::today()))
}

pub fn now(_: ()) -> Result<Value, Error> {
	Ok(Value::Datetime(Datetime::now()))
}

pub fn date((value,): (Value,)) -> Result<Value, Error> {
	match value {
		Value::Datetime(v) => Ok(Value::Datetime(v)),
		Value::String(v) if !v.trim().is_empty() => match Datetime::parse(&v) {
			Some(parsed) => Ok(Value::Datetime(parsed)),
			None => Err(Error::Evaluation(format!("Invalid date \"{v}\""))),
		},
		v => Err(Error::Evaluation(format!("Cannot convert a {} to a date", v.kind()))),
	}
}

pub fn duration((value,): (Value,)) -> Result<Value, Error> {
	match value {
		Value::Duration(v) => Ok(Value::Duration(v)),
		Value::String(v) => Ok(Value::Duration(Duration::parse(&v)?)),
		v => Err(Error::InvalidDuration(v.to_text())),
	}
}

pub fn r#if((cond, then, otherwise): (Value, Value, Option<Value>)) -> Result<Value, Error> {
	if cond.is_truthy() {
		Ok(then)
	} else {
		Ok(otherwise.unwrap_or(Value::Null))
	}
}

/// Normalize a value into a path string: strings pass through, links use
/// their path, and objects may carry one under several keys.
fn path_of(value: &Value) -> Option<String> {
	match value {
		Value::String(v) => Some(v.trim().to_string()),
		Value::Link(v) => Some(v.path.trim().to_string()),
		Value::Object(map) => ["path", "target", "url", "href"].iter().find_map(|k| {
			match map.get(*k) {
				Some(Value::String(v)) if !v.trim().is_empty() => Some(v.trim().to_string()),
				_ => None,
			}
		}),
		_ => None,
	}
}

pub fn file((value,): (Value,)) -> Result<Value, Error> {
	match path_of(&value).filter(|p| !p.is_empty()) {
		Some(path) => Ok(Value::Link(Link::new(path))),
		None => Err(Error::Evaluation(format!(
			"Cannot convert a {} to a file path",
			value.kind()
		))),
	}
}

pub fn image((value,): (Value,)) -> Result<Value, Error> {
	let path = path_of(&value).unwrap_or_default();
	Ok(format!("![]({path})").into())
}

pub fn icon((name,): (Value,)) -> Result<Value, Error> {
	let name = name.to_text();
	let name = name.trim();
	let name = if name.is_empty() {
		"unknown"
	} else {
		name
	};
	Ok(format!("icon({name})").into())
}

pub fn link((path, display): (Value, Option<Value>)) -> Result<Value, Error> {
	match path_of(&path).filter(|p| !p.is_empty()) {
		Some(path) => {
			let display = display.filter(|v| !v.is_nullish()).map(|v| v.to_text());
			Ok(Value::Link(Link::new(path).with_display(display)))
		}
		None => Err(Error::Evaluation("link() requires a non-empty path".to_string())),
	}
}

pub fn list((value,): (Value,)) -> Result<Value, Error> {
	match value {
		Value::Array(v) => Ok(Value::Array(v)),
		v => Ok(Value::Array(vec![v].into())),
	}
}

fn numeric_args(name: &str, args: Vec<Value>) -> Result<Vec<f64>, Error> {
	if args.is_empty() {
		return Err(Error::InvalidFunction {
			name: name.to_string(),
			message: "expected at least 1 argument".to_string(),
		});
	}
	let mut out = Vec::with_capacity(args.len());
	for arg in args {
		let n = arg.to_number();
		if n.is_nan() {
			return Err(Error::Evaluation(format!("{name}() requires numeric arguments")));
		}
		out.push(n.to_float());
	}
	Ok(out)
}

pub fn max(args: Vec<Value>) -> Result<Value, Error> {
	let args = numeric_args("max", args)?;
	Ok(Value::Number(Number::from(args.into_iter().fold(f64::NEG_INFINITY, f64::max))))
}

pub fn min(args: Vec<Value>) -> Result<Value, Error> {
	let args = numeric_args("min", args)?;
	Ok(Value::Number(Number::from(args.into_iter().fold(f64::INFINITY, f64::min))))
}

pub fn number((value,): (Value,)) -> Result<Value, Error> {
	match value {
		Value::Number(v) if v.is_finite() => Ok(Value::Number(v)),
		Value::Datetime(v) => Ok(Value::from(v.timestamp_millis())),
		Value::Bool(v) => Ok(Value::from(v as i64)),
		Value::String(v) => {
			let trimmed = v.trim();
			if trimmed.is_empty() {
				return Err(Error::Evaluation("Cannot convert an empty string to a number".to_string()));
			}
			let parsed: f64 = trimmed
				.parse()
				.map_err(|_| Error::Evaluation(format!("Cannot convert \"{v}\" to a number")))?;
			Ok(Value::Number(Number::from(parsed)))
		}
		v => Err(Error::Evaluation(format!("Cannot convert a {} to a number", v.kind()))),
	}
}
