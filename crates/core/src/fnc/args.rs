use crate::err::Error;
use crate::val::Value;

/// Implemented by tuples of function arguments, so that each builtin can
/// declare its arity through its parameter type and have the dispatcher
/// check the call for it.
pub trait FromArgs: Sized {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error>;
}

fn invalid(name: &str, message: &str) -> Error {
	Error::InvalidFunction {
		name: name.to_string(),
		message: message.to_string(),
	}
}

/// Variadic functions receive the raw argument list
impl FromArgs for Vec<Value> {
	fn from_args(_name: &str, args: Vec<Value>) -> Result<Self, Error> {
		Ok(args)
	}
}

impl FromArgs for () {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error> {
		if args.is_empty() {
			Ok(())
		} else {
			Err(invalid(name, "expected no arguments"))
		}
	}
}

impl FromArgs for (Value,) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error> {
		let mut args = args.into_iter();
		match (args.next(), args.next()) {
			(Some(a), None) => Ok((a,)),
			_ => Err(invalid(name, "expected 1 argument")),
		}
	}
}

impl FromArgs for (Value, Value) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error> {
		let mut args = args.into_iter();
		match (args.next(), args.next(), args.next()) {
			(Some(a), Some(b), None) => Ok((a, b)),
			_ => Err(invalid(name, "expected 2 arguments")),
		}
	}
}

impl FromArgs for (Value, Option<Value>) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error> {
		let mut args = args.into_iter();
		match (args.next(), args.next(), args.next()) {
			(Some(a), b, None) => Ok((a, b)),
			_ => Err(invalid(name, "expected 1 or 2 arguments")),
		}
	}
}

impl FromArgs for (Value, Value, Option<Value>) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error> {
		let mut args = args.into_iter();
		match (args.next(), args.next(), args.next(), args.next()) {
			(Some(a), Some(b), c, None) => Ok((a, b, c)),
			_ => Err(invalid(name, "expected 2 or 3 arguments")),
		}
	}
}

impl FromArgs for (Value, Option<Value>, Option<Value>) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self, Error> {
		let mut args = args.into_iter();
		match (args.next(), args.next(), args.next(), args.next()) {
			(Some(a), b, c, None) => Ok((a, b, c)),
			_ => Err(invalid(name, "expected 1 to 3 arguments")),
		}
	}
}
