//! The `Object` namespace functions.

use crate::err::Error;
use crate::val::{Array, Object, Value};

fn receiver(name: &str, value: Value) -> Result<Object, Error> {
	match value {
		Value::Object(v) => Ok(v),
		v => Err(Error::Type(format!("Object.{name}() called on a {}", v.kind()))),
	}
}

pub fn keys((object,): (Value,)) -> Result<Value, Error> {
	let object = receiver("keys", object)?;
	Ok(Value::Array(object.keys().map(|k| Value::from(k.clone())).collect()))
}

pub fn values((object,): (Value,)) -> Result<Value, Error> {
	let object = receiver("values", object)?;
	Ok(Value::Array(object.values().cloned().collect()))
}

pub fn entries((object,): (Value,)) -> Result<Value, Error> {
	let object = receiver("entries", object)?;
	let entries: Array = object
		.into_iter()
		.map(|(k, v)| Value::Array(vec![Value::from(k), v].into()))
		.collect();
	Ok(entries.into())
}
