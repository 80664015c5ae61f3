//! Link methods, dispatched with the receiver as the first argument.

use crate::err::Error;
use crate::val::{Link, Value};

pub fn as_link((link, display): (Value, Option<Value>)) -> Result<Value, Error> {
	match link {
		Value::Link(v) => {
			let display = display.filter(|v| !v.is_nullish()).map(|v| v.to_text());
			Ok(Value::Link(Link::new(v.path).with_display(display)))
		}
		v => Err(Error::Type(format!("asLink() called on a {}", v.kind()))),
	}
}
