//! The expression language: source rewriting, lexing, and parsing.

pub(crate) mod ast;
pub(crate) mod lexer;
pub(crate) mod operator;
pub(crate) mod parser;
pub(crate) mod rewrite;
pub(crate) mod token;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::err::Error;

pub use self::ast::{Expr, Literal};
pub use self::operator::{BinaryOp, UnaryOp};

/// Parse an expression source string into an AST.
pub fn parse(source: &str) -> Result<Expr, Error> {
	let rewritten = rewrite::rewrite(source);
	parser::Parser::new(&rewritten).parse().map_err(|e| match e {
		// Report the original source, not the rewritten form
		Error::ExpressionParse {
			message,
			..
		} => Error::ExpressionParse {
			source_text: source.to_string(),
			message,
		},
		e => e,
	})
}

/// A cache of parsed expressions keyed on their source text.
///
/// ASTs are pure data, so one parse can be reused for every file a
/// filter or column is evaluated against.
#[derive(Default)]
pub struct ExprCache {
	entries: RefCell<HashMap<String, Rc<Expr>>>,
}

impl ExprCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn parse(&self, source: &str) -> Result<Rc<Expr>, Error> {
		if let Some(expr) = self.entries.borrow().get(source) {
			return Ok(Rc::clone(expr));
		}
		let expr = Rc::new(parse(source)?);
		self.entries.borrow_mut().insert(source.to_string(), Rc::clone(&expr));
		Ok(expr)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rewrite_then_parse() {
		let out = parse("if(x, 1, 2)").unwrap();
		match out {
			Expr::Call {
				callee,
				args,
			} => {
				assert_eq!(*callee, Expr::Ident("_if".to_string()));
				assert_eq!(args.len(), 3);
			}
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn parse_error_reports_original_source() {
		let err = parse("if(x").unwrap_err();
		assert!(err.to_string().contains("if(x"));
	}

	#[test]
	fn cache_returns_same_ast() {
		let cache = ExprCache::new();
		let a = cache.parse("1 + 2").unwrap();
		let b = cache.parse("1 + 2").unwrap();
		assert!(Rc::ptr_eq(&a, &b));
	}
}
