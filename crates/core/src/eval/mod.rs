//! The expression evaluator: walks a parsed AST against a per-file
//! scope.

use crate::err::Error;
use crate::exp::{BinaryOp, Expr, Literal, UnaryOp};
use crate::fnc;
use crate::fnc::operate;
use crate::scope::Scope;
use crate::val::{Function, Regex, Value};

/// Evaluation depth at which the walker gives up, bounding recursion on
/// pathological input.
const MAX_DEPTH: usize = 256;

/// Evaluate an expression in the given scope.
pub fn evaluate(expr: &Expr, scope: &Scope) -> Result<Value, Error> {
	eval(expr, scope, 0)
}

fn eval(expr: &Expr, scope: &Scope, depth: usize) -> Result<Value, Error> {
	if depth > MAX_DEPTH {
		return Err(Error::Evaluation(format!(
			"maximum evaluation depth ({MAX_DEPTH}) exceeded"
		)));
	}
	match expr {
		Expr::Literal(v) => literal(v),
		Expr::Ident(name) => {
			scope.lookup(name).ok_or_else(|| Error::Reference(name.clone()))
		}
		Expr::Member {
			object,
			property,
		} => {
			// `formula.<name>` goes through the memoizing proxy
			if is_formula_proxy(object, scope) {
				return scope.formula(property);
			}
			let object = eval(object, scope, depth + 1)?;
			get_member(scope, &object, property)
		}
		Expr::Index {
			object,
			index,
		} => {
			if is_formula_proxy(object, scope) {
				let index = eval(index, scope, depth + 1)?;
				return scope.formula(&index.to_text());
			}
			let object = eval(object, scope, depth + 1)?;
			let index = eval(index, scope, depth + 1)?;
			index_value(scope, &object, &index)
		}
		Expr::Call {
			callee,
			args,
		} => eval_call(callee, args, scope, depth),
		Expr::Unary {
			o,
			v,
		} => eval_unary(*o, v, scope, depth),
		Expr::Binary {
			l,
			o,
			r,
		} => eval_binary(l, *o, r, scope, depth),
		Expr::Conditional {
			cond,
			then,
			otherwise,
		} => {
			if eval(cond, scope, depth + 1)?.is_truthy() {
				eval(then, scope, depth + 1)
			} else {
				eval(otherwise, scope, depth + 1)
			}
		}
		Expr::Array(elements) => {
			let mut out = Vec::with_capacity(elements.len());
			for element in elements {
				out.push(match element {
					Some(element) => eval(element, scope, depth + 1)?,
					None => Value::Undefined,
				});
			}
			Ok(Value::Array(out.into()))
		}
	}
}

fn literal(literal: &Literal) -> Result<Value, Error> {
	Ok(match literal {
		Literal::Undefined => Value::Undefined,
		Literal::Null => Value::Null,
		Literal::Bool(v) => Value::Bool(*v),
		Literal::Number(v) => Value::Number(*v),
		Literal::String(v) => Value::String(v.clone()),
		Literal::Regex {
			pattern,
			flags,
		} => Value::Regex(Regex::new(pattern, flags)?),
	})
}

/// True when the expression is the bare identifier `formula` and nothing
/// in scope shadows it, so member access reaches the formula proxy.
fn is_formula_proxy(expr: &Expr, scope: &Scope) -> bool {
	matches!(expr, Expr::Ident(name) if name == "formula" && !scope.has_binding("formula"))
}

fn eval_unary(op: UnaryOp, operand: &Expr, scope: &Scope, depth: usize) -> Result<Value, Error> {
	if op == UnaryOp::Typeof {
		// typeof tolerates unresolved identifiers
		if let Expr::Ident(name) = operand {
			return match scope.lookup(name) {
				Some(v) => Ok(Value::from(v.type_of())),
				None => Ok(Value::from("undefined")),
			};
		}
		let v = eval(operand, scope, depth + 1)?;
		return Ok(Value::from(v.type_of()));
	}
	let v = eval(operand, scope, depth + 1)?;
	match op {
		UnaryOp::Not => operate::not(v),
		UnaryOp::Neg => operate::neg(v),
		UnaryOp::Pos => operate::pos(v),
		UnaryOp::BitNot => operate::bit_not(v),
		UnaryOp::Void => Ok(Value::Undefined),
		UnaryOp::Typeof => unreachable!("typeof is handled above"),
	}
}

fn eval_binary(
	l: &Expr,
	op: BinaryOp,
	r: &Expr,
	scope: &Scope,
	depth: usize,
) -> Result<Value, Error> {
	// Logical operators short-circuit and return the operand itself
	match op {
		BinaryOp::Or => {
			let l = eval(l, scope, depth + 1)?;
			return if l.is_truthy() {
				Ok(l)
			} else {
				eval(r, scope, depth + 1)
			};
		}
		BinaryOp::And => {
			let l = eval(l, scope, depth + 1)?;
			return if l.is_truthy() {
				eval(r, scope, depth + 1)
			} else {
				Ok(l)
			};
		}
		BinaryOp::Nco => {
			let l = eval(l, scope, depth + 1)?;
			return if l.is_nullish() {
				eval(r, scope, depth + 1)
			} else {
				Ok(l)
			};
		}
		_ => {}
	}
	let l = eval(l, scope, depth + 1)?;
	let r = eval(r, scope, depth + 1)?;
	match op {
		BinaryOp::Add => operate::add(l, r),
		BinaryOp::Sub => operate::sub(l, r),
		BinaryOp::Mul => operate::mul(l, r),
		BinaryOp::Div => operate::div(l, r),
		BinaryOp::Rem => operate::rem(l, r),
		BinaryOp::Pow => operate::pow(l, r),
		BinaryOp::Equal => operate::equal(&l, &r),
		BinaryOp::NotEqual => operate::not_equal(&l, &r),
		BinaryOp::Exact => operate::exact(&l, &r),
		BinaryOp::NotExact => operate::not_exact(&l, &r),
		BinaryOp::LessThan => operate::less_than(&l, &r),
		BinaryOp::LessThanOrEqual => operate::less_than_or_equal(&l, &r),
		BinaryOp::MoreThan => operate::more_than(&l, &r),
		BinaryOp::MoreThanOrEqual => operate::more_than_or_equal(&l, &r),
		BinaryOp::In => operate::inside(&l, &r),
		BinaryOp::Instanceof => operate::instance_of(&l, &r),
		BinaryOp::Or | BinaryOp::And | BinaryOp::Nco => {
			unreachable!("logical operators are handled above")
		}
	}
}

fn eval_call(callee: &Expr, args: &[Expr], scope: &Scope, depth: usize) -> Result<Value, Error> {
	let eval_args = |scope: &Scope| -> Result<Vec<Value>, Error> {
		args.iter().map(|arg| eval(arg, scope, depth + 1)).collect()
	};
	if let Expr::Member {
		object,
		property,
	} = callee
	{
		if is_formula_proxy(object, scope) {
			let value = scope.formula(property)?;
			return call_plain(scope, value, eval_args(scope)?, property);
		}
		let receiver = eval(object, scope, depth + 1)?;
		// Functions stored in objects, e.g. Math.max, take no receiver
		if let Value::Object(map) = &receiver {
			if let Some(Value::Function(f)) = map.get(property) {
				return fnc::run(scope, f.name(), eval_args(scope)?);
			}
		}
		let member = get_member(scope, &receiver, property)?;
		return match member {
			Value::Function(f) => {
				let mut argv = Vec::with_capacity(args.len() + 1);
				argv.push(receiver);
				argv.extend(eval_args(scope)?);
				fnc::run(scope, f.name(), argv)
			}
			v => Err(not_a_function(property, &v)),
		};
	}
	let callee_value = eval(callee, scope, depth + 1)?;
	let label = match callee {
		Expr::Ident(name) => name.as_str(),
		_ => "expression",
	};
	call_plain(scope, callee_value, eval_args(scope)?, label)
}

fn call_plain(scope: &Scope, value: Value, args: Vec<Value>, label: &str) -> Result<Value, Error> {
	match value {
		Value::Function(f) => fnc::run(scope, f.name(), args),
		v => Err(not_a_function(label, &v)),
	}
}

fn not_a_function(label: &str, value: &Value) -> Error {
	Error::Type(format!("{label} is not a function (it is a {})", value.kind()))
}

/// Look up a property on a value, auto-boxing primitives so their
/// methods are reachable. Unknown properties are undefined; property
/// access on null or undefined is an error.
pub(crate) fn get_member(scope: &Scope, value: &Value, name: &str) -> Result<Value, Error> {
	let method = |target: &'static str| Ok(Value::Function(Function(target)));
	match value {
		Value::Undefined | Value::Null => Err(Error::Type(format!(
			"Cannot read properties of {} (reading '{name}')",
			value.kind()
		))),
		Value::Object(map) => Ok(map.get(name).cloned().unwrap_or(Value::Undefined)),
		Value::File(id) => Ok(fnc::file::member(scope, *id, name).unwrap_or(Value::Undefined)),
		Value::String(v) => match name {
			"length" => Ok(Value::from(v.chars().count() as i64)),
			"toUpperCase" => method("string::uppercase"),
			"toLowerCase" => method("string::lowercase"),
			"trim" => method("string::trim"),
			"includes" | "contains" => method("string::includes"),
			"startsWith" => method("string::starts_with"),
			"endsWith" => method("string::ends_with"),
			"split" => method("string::split"),
			"slice" | "substring" => method("string::slice"),
			"replace" => method("string::replace"),
			"replaceAll" => method("string::replace_all"),
			"repeat" => method("string::repeat"),
			"indexOf" => method("string::index_of"),
			"charAt" => method("string::char_at"),
			"padStart" => method("string::pad_start"),
			"toString" => method("string::to_string"),
			_ => Ok(Value::Undefined),
		},
		Value::Array(items) => match name {
			"length" => Ok(Value::from(items.len() as i64)),
			"includes" | "contains" => method("array::includes"),
			"join" => method("array::join"),
			"indexOf" => method("array::index_of"),
			"slice" => method("array::slice"),
			"concat" => method("array::concat"),
			"reverse" => method("array::reverse"),
			"flat" => method("array::flat"),
			"toString" => method("string::to_string"),
			_ => Ok(Value::Undefined),
		},
		Value::Number(_) => match name {
			"toFixed" => method("number::to_fixed"),
			"toString" => method("number::to_string"),
			_ => Ok(Value::Undefined),
		},
		Value::Datetime(_) => match name {
			"getTime" | "valueOf" => method("time::get_time"),
			"toISOString" | "toJSON" => method("time::to_iso_string"),
			"getFullYear" => method("time::get_full_year"),
			"getMonth" => method("time::get_month"),
			"getDate" => method("time::get_date"),
			"getDay" => method("time::get_day"),
			"getHours" => method("time::get_hours"),
			"getMinutes" => method("time::get_minutes"),
			"getSeconds" => method("time::get_seconds"),
			"toString" => method("string::to_string"),
			_ => Ok(Value::Undefined),
		},
		Value::Regex(v) => match name {
			"source" => Ok(Value::from(v.pattern().to_string())),
			"flags" => Ok(Value::from(v.flags().to_string())),
			"matches" | "test" => method("regex::matches"),
			_ => Ok(Value::Undefined),
		},
		Value::Link(v) => match name {
			"path" => Ok(Value::from(v.path.clone())),
			"display" => Ok(v.display.clone().map(Value::from).unwrap_or(Value::Undefined)),
			"isEmbed" => Ok(Value::Bool(v.embed)),
			"asLink" => method("link::as_link"),
			_ => Ok(Value::Undefined),
		},
		_ => Ok(Value::Undefined),
	}
}

/// Bracket indexing: numeric indexes address array elements and string
/// characters, anything else behaves like property access on the
/// coerced key.
fn index_value(scope: &Scope, object: &Value, index: &Value) -> Result<Value, Error> {
	match object {
		Value::Array(items) => {
			if let Some(i) = index.to_number().as_exact_int() {
				let out = if i >= 0 {
					items.get(i as usize).cloned()
				} else {
					None
				};
				return Ok(out.unwrap_or(Value::Undefined));
			}
			get_member(scope, object, &index.to_text())
		}
		Value::String(v) => {
			if let Some(i) = index.to_number().as_exact_int() {
				let out = if i >= 0 {
					v.chars().nth(i as usize).map(String::from)
				} else {
					None
				};
				return Ok(out.map(Value::from).unwrap_or(Value::Undefined));
			}
			get_member(scope, object, &index.to_text())
		}
		object => get_member(scope, object, &index.to_text()),
	}
}
