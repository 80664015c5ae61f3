//! Regex methods, dispatched with the receiver as the first argument.

use crate::err::Error;
use crate::val::Value;

pub fn matches((regex, haystack): (Value, Value)) -> Result<Value, Error> {
	match regex {
		Value::Regex(re) => Ok(re.is_match(&haystack.to_text()).into()),
		v => Err(Error::Type(format!("matches() called on a {}", v.kind()))),
	}
}
