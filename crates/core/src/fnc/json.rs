//! The `JSON` namespace functions, and the conversion between the value
//! domain and `serde_json` trees that backs them.

use crate::err::Error;
use crate::val::{Number, Object, Value};

/// Convert a value into a JSON tree. `None` means the value disappears
/// when stringified, as `undefined` and functions do in JS. Files are
/// rejected because their `file` self-reference never terminates.
pub fn to_json(value: &Value) -> Result<Option<serde_json::Value>, Error> {
	Ok(Some(match value {
		Value::Undefined | Value::Function(_) => return Ok(None),
		Value::Null => serde_json::Value::Null,
		Value::Bool(v) => serde_json::Value::Bool(*v),
		Value::Number(v) => match v {
			Number::Int(v) => serde_json::Value::from(*v),
			Number::Float(v) if v.is_finite() => serde_json::Value::from(*v),
			// Non-finite numbers stringify as null
			Number::Float(_) => serde_json::Value::Null,
		},
		Value::String(v) => serde_json::Value::from(v.clone()),
		Value::Datetime(v) => serde_json::Value::from(v.to_iso_string()),
		Value::Duration(v) => serde_json::Value::from(v.to_string()),
		Value::Regex(_) => serde_json::Value::Object(serde_json::Map::new()),
		Value::Link(v) => {
			let mut map = serde_json::Map::new();
			map.insert("path".to_string(), serde_json::Value::from(v.path.clone()));
			if let Some(display) = &v.display {
				map.insert("display".to_string(), serde_json::Value::from(display.clone()));
			}
			map.insert("isEmbed".to_string(), serde_json::Value::Bool(v.embed));
			serde_json::Value::Object(map)
		}
		Value::File(_) => {
			return Err(Error::Format("Converting circular structure to JSON".to_string()))
		}
		Value::Array(items) => {
			let mut out = Vec::with_capacity(items.len());
			for item in items.iter() {
				// Array holes become null when stringified
				out.push(to_json(item)?.unwrap_or(serde_json::Value::Null));
			}
			serde_json::Value::Array(out)
		}
		Value::Object(map) => {
			let mut out = serde_json::Map::new();
			for (k, v) in map.iter() {
				if let Some(v) = to_json(v)? {
					out.insert(k.clone(), v);
				}
			}
			serde_json::Value::Object(out)
		}
	}))
}

/// Convert a JSON tree into a value.
pub fn from_json(value: serde_json::Value) -> Value {
	match value {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(v) => Value::Bool(v),
		serde_json::Value::Number(v) => {
			if let Some(v) = v.as_i64() {
				Value::from(v)
			} else {
				Value::from(v.as_f64().unwrap_or(f64::NAN))
			}
		}
		serde_json::Value::String(v) => Value::String(v),
		serde_json::Value::Array(items) => {
			Value::Array(items.into_iter().map(from_json).collect())
		}
		serde_json::Value::Object(map) => {
			Value::Object(map.into_iter().map(|(k, v)| (k, from_json(v))).collect::<Object>())
		}
	}
}

pub fn stringify((value,): (Value,)) -> Result<Value, Error> {
	match to_json(&value)? {
		Some(json) => Ok(json.to_string().into()),
		None => Ok(Value::Undefined),
	}
}

pub fn parse((text,): (Value,)) -> Result<Value, Error> {
	let text = text.to_text();
	serde_json::from_str(&text)
		.map(from_json)
		.map_err(|e| Error::Evaluation(format!("JSON.parse: {e}")))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn stringify_object() {
		let object: Object =
			vec![("a".to_string(), Value::from(1i64))].into_iter().collect();
		let out = stringify((Value::Object(object),)).unwrap();
		assert!(out.strict_equal(&Value::from("{\"a\":1}")));
	}

	#[test]
	fn stringify_undefined_is_undefined() {
		assert!(stringify((Value::Undefined,)).unwrap().is_undefined());
	}

	#[test]
	fn parse_round_trip() {
		let out = parse((Value::from("[1, \"a\", null]"),)).unwrap();
		match out {
			Value::Array(items) => {
				assert_eq!(items.len(), 3);
				assert!(items[2].strict_equal(&Value::Null));
			}
			v => panic!("expected array, got {v:?}"),
		}
	}
}
