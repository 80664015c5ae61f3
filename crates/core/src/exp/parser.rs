//! This module defines the pratt parser for operators.

use crate::err::Error;
use crate::exp::ast::{Expr, Literal};
use crate::exp::lexer::Lexer;
use crate::exp::operator::{BinaryOp, UnaryOp};
use crate::exp::token::{Token, TokenKind};
use crate::val::Number;

/// Nesting depth at which parsing gives up, bounding recursion on
/// pathological input.
const MAX_DEPTH: usize = 256;

pub struct Parser<'a> {
	lexer: Lexer<'a>,
	source: &'a str,
	peeked: Option<Token>,
	depth: usize,
}

impl<'a> Parser<'a> {
	pub fn new(source: &'a str) -> Self {
		Self {
			lexer: Lexer::new(source),
			source,
			peeked: None,
			depth: 0,
		}
	}

	/// Parse the whole source as a single expression.
	pub fn parse(mut self) -> Result<Expr, Error> {
		let expr = self.parse_expr()?;
		let token = self.next()?;
		match token.kind {
			TokenKind::Eof => Ok(expr),
			kind => Err(self.unexpected(&kind, "end of expression")),
		}
	}

	fn error(&self, message: impl Into<String>) -> Error {
		Error::ExpressionParse {
			source_text: self.source.to_string(),
			message: message.into(),
		}
	}

	fn unexpected(&self, kind: &TokenKind, expected: &str) -> Error {
		self.error(format!("unexpected {}, expected {}", kind.describe(), expected))
	}

	fn peek(&mut self) -> Result<&Token, Error> {
		if self.peeked.is_none() {
			let token = self.lexer.next_token().map_err(|e| self.error(e.to_string()))?;
			self.peeked = Some(token);
		}
		Ok(self.peeked.as_ref().expect("token was just buffered"))
	}

	fn next(&mut self) -> Result<Token, Error> {
		match self.peeked.take() {
			Some(token) => Ok(token),
			None => self.lexer.next_token().map_err(|e| self.error(e.to_string())),
		}
	}

	fn eat(&mut self, kind: &TokenKind) -> Result<bool, Error> {
		if &self.peek()?.kind == kind {
			self.next()?;
			Ok(true)
		} else {
			Ok(false)
		}
	}

	fn expect(&mut self, kind: TokenKind) -> Result<(), Error> {
		let token = self.next()?;
		if token.kind == kind {
			Ok(())
		} else {
			Err(self.unexpected(&token.kind, &kind.describe()))
		}
	}

	fn enter(&mut self) -> Result<(), Error> {
		self.depth += 1;
		if self.depth > MAX_DEPTH {
			return Err(self.error("expression is nested too deeply"));
		}
		Ok(())
	}

	fn leave(&mut self) {
		self.depth -= 1;
	}

	/// Parse a full expression, including the conditional operator,
	/// which binds loosest and associates to the right.
	fn parse_expr(&mut self) -> Result<Expr, Error> {
		self.enter()?;
		let cond = self.pratt_parse_expr(0)?;
		let out = if self.eat(&TokenKind::Question)? {
			let then = self.parse_expr()?;
			self.expect(TokenKind::Colon)?;
			let otherwise = self.parse_expr()?;
			Expr::Conditional {
				cond: Box::new(cond),
				then: Box::new(then),
				otherwise: Box::new(otherwise),
			}
		} else {
			cond
		};
		self.leave();
		Ok(out)
	}

	/// Returns the binding power of an infix operator.
	///
	/// A higher binding power means the operator binds more tightly to
	/// its neighbours. The two numbers are the powers towards the left
	/// and right neighbour: left < right gives left associativity,
	/// left > right gives right associativity (only `**` here).
	fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8, BinaryOp)> {
		let out = match kind {
			TokenKind::Coalesce => (1, 2, BinaryOp::Nco),
			TokenKind::OrOr => (3, 4, BinaryOp::Or),
			TokenKind::AndAnd => (5, 6, BinaryOp::And),
			TokenKind::EqEq => (7, 8, BinaryOp::Equal),
			TokenKind::NotEq => (7, 8, BinaryOp::NotEqual),
			TokenKind::EqEqEq => (7, 8, BinaryOp::Exact),
			TokenKind::NotEqEq => (7, 8, BinaryOp::NotExact),
			TokenKind::Lt => (9, 10, BinaryOp::LessThan),
			TokenKind::Lte => (9, 10, BinaryOp::LessThanOrEqual),
			TokenKind::Gt => (9, 10, BinaryOp::MoreThan),
			TokenKind::Gte => (9, 10, BinaryOp::MoreThanOrEqual),
			TokenKind::Ident(name) if name == "in" => (9, 10, BinaryOp::In),
			TokenKind::Ident(name) if name == "instanceof" => (9, 10, BinaryOp::Instanceof),
			TokenKind::Add => (11, 12, BinaryOp::Add),
			TokenKind::Sub => (11, 12, BinaryOp::Sub),
			TokenKind::Mul => (13, 14, BinaryOp::Mul),
			TokenKind::Div => (13, 14, BinaryOp::Div),
			TokenKind::Rem => (13, 14, BinaryOp::Rem),
			TokenKind::Pow => (16, 15, BinaryOp::Pow),
			_ => return None,
		};
		Some(out)
	}

	fn prefix_op(kind: &TokenKind) -> Option<UnaryOp> {
		match kind {
			TokenKind::Not => Some(UnaryOp::Not),
			TokenKind::Sub => Some(UnaryOp::Neg),
			TokenKind::Add => Some(UnaryOp::Pos),
			TokenKind::BitNot => Some(UnaryOp::BitNot),
			TokenKind::Ident(name) if name == "typeof" => Some(UnaryOp::Typeof),
			TokenKind::Ident(name) if name == "void" => Some(UnaryOp::Void),
			_ => None,
		}
	}

	/// The pratt parsing loop.
	fn pratt_parse_expr(&mut self, min_bp: u8) -> Result<Expr, Error> {
		self.enter()?;
		let mut lhs = if let Some(op) = Self::prefix_op(&self.peek()?.kind) {
			self.next()?;
			// Unary operators bind tighter than any binary operator
			let v = self.pratt_parse_expr(17)?;
			Expr::Unary {
				o: op,
				v: Box::new(v),
			}
		} else {
			self.parse_postfix_expression()?
		};

		loop {
			let Some((l_bp, r_bp, op)) = Self::infix_binding_power(&self.peek()?.kind) else {
				break;
			};
			if l_bp < min_bp {
				break;
			}
			self.next()?;
			let rhs = self.pratt_parse_expr(r_bp)?;
			lhs = Expr::Binary {
				l: Box::new(lhs),
				o: op,
				r: Box::new(rhs),
			};
		}

		self.leave();
		Ok(lhs)
	}

	/// Parse a primary expression followed by any number of member
	/// accesses, index accesses, and calls, which bind tightest.
	fn parse_postfix_expression(&mut self) -> Result<Expr, Error> {
		let mut expr = self.parse_primary()?;
		loop {
			if self.eat(&TokenKind::Dot)? {
				let token = self.next()?;
				let property = match token.kind {
					TokenKind::Ident(name) => name,
					kind => return Err(self.unexpected(&kind, "a property name")),
				};
				expr = Expr::Member {
					object: Box::new(expr),
					property,
				};
			} else if self.eat(&TokenKind::LeftBracket)? {
				let index = self.parse_expr()?;
				self.expect(TokenKind::RightBracket)?;
				expr = Expr::Index {
					object: Box::new(expr),
					index: Box::new(index),
				};
			} else if self.eat(&TokenKind::LeftParen)? {
				let mut args = Vec::new();
				if !self.eat(&TokenKind::RightParen)? {
					loop {
						args.push(self.parse_expr()?);
						if !self.eat(&TokenKind::Comma)? {
							break;
						}
					}
					self.expect(TokenKind::RightParen)?;
				}
				expr = Expr::Call {
					callee: Box::new(expr),
					args,
				};
			} else {
				break;
			}
		}
		Ok(expr)
	}

	fn parse_primary(&mut self) -> Result<Expr, Error> {
		// A `/` where a value is expected starts a regex literal
		if self.peek()?.kind == TokenKind::Div {
			let token = self.next()?;
			let token = self.lexer.relex_regex(&token).map_err(|e| self.error(e.to_string()))?;
			if let TokenKind::Regex {
				pattern,
				flags,
			} = token.kind
			{
				return Ok(Expr::Literal(Literal::Regex {
					pattern,
					flags,
				}));
			}
			unreachable!("relex_regex only returns regex tokens");
		}
		let token = self.next()?;
		match token.kind {
			TokenKind::Number(v) => Ok(Expr::Literal(Literal::Number(v))),
			TokenKind::Strand(v) => Ok(Expr::Literal(Literal::String(v))),
			TokenKind::Ident(name) => Ok(match name.as_str() {
				"true" => Expr::Literal(Literal::Bool(true)),
				"false" => Expr::Literal(Literal::Bool(false)),
				"null" => Expr::Literal(Literal::Null),
				"undefined" => Expr::Literal(Literal::Undefined),
				"NaN" => Expr::Literal(Literal::Number(Number::NAN)),
				"Infinity" => Expr::Literal(Literal::Number(Number::Float(f64::INFINITY))),
				_ => Expr::Ident(name),
			}),
			TokenKind::LeftParen => {
				let expr = self.parse_expr()?;
				self.expect(TokenKind::RightParen)?;
				Ok(expr)
			}
			TokenKind::LeftBracket => {
				let mut elements = Vec::new();
				loop {
					if self.eat(&TokenKind::RightBracket)? {
						break;
					}
					if self.eat(&TokenKind::Comma)? {
						elements.push(None);
						continue;
					}
					elements.push(Some(self.parse_expr()?));
					if !self.eat(&TokenKind::Comma)? {
						self.expect(TokenKind::RightBracket)?;
						break;
					}
				}
				Ok(Expr::Array(elements))
			}
			kind => Err(self.unexpected(&kind, "a value")),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(source: &str) -> Expr {
		Parser::new(source).parse().unwrap()
	}

	#[test]
	fn precedence() {
		// 1 + 2 * 3 parses as 1 + (2 * 3)
		let out = parse("1 + 2 * 3");
		match out {
			Expr::Binary {
				o: BinaryOp::Add,
				r,
				..
			} => assert!(matches!(*r, Expr::Binary {
				o: BinaryOp::Mul,
				..
			})),
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn left_associativity() {
		// 1 - 2 - 3 parses as (1 - 2) - 3
		let out = parse("1 - 2 - 3");
		match out {
			Expr::Binary {
				o: BinaryOp::Sub,
				l,
				..
			} => assert!(matches!(*l, Expr::Binary {
				o: BinaryOp::Sub,
				..
			})),
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn power_is_right_associative() {
		// 2 ** 3 ** 2 parses as 2 ** (3 ** 2)
		let out = parse("2 ** 3 ** 2");
		match out {
			Expr::Binary {
				o: BinaryOp::Pow,
				r,
				..
			} => assert!(matches!(*r, Expr::Binary {
				o: BinaryOp::Pow,
				..
			})),
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn coalesce_binds_below_or() {
		// a ?? b || c parses as a ?? (b || c)
		let out = parse("a ?? b || c");
		match out {
			Expr::Binary {
				o: BinaryOp::Nco,
				r,
				..
			} => assert!(matches!(*r, Expr::Binary {
				o: BinaryOp::Or,
				..
			})),
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn member_call_chain() {
		let out = parse("note.title.toUpperCase()");
		match out {
			Expr::Call {
				callee,
				args,
			} => {
				assert!(args.is_empty());
				assert!(matches!(*callee, Expr::Member {
					..
				}));
			}
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn regex_in_prefix_position() {
		let out = parse("/alpha/i.matches(x)");
		match out {
			Expr::Call {
				callee,
				..
			} => match *callee {
				Expr::Member {
					object,
					property,
				} => {
					assert_eq!(property, "matches");
					assert!(matches!(*object, Expr::Literal(Literal::Regex {
						..
					})));
				}
				v => panic!("unexpected parse: {v:?}"),
			},
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn division_is_not_a_regex() {
		let out = parse("a / b");
		assert!(matches!(out, Expr::Binary {
			o: BinaryOp::Div,
			..
		}));
	}

	#[test]
	fn array_holes() {
		let out = parse("[1, , 3]");
		match out {
			Expr::Array(elements) => {
				assert_eq!(elements.len(), 3);
				assert!(elements[1].is_none());
			}
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn conditional_is_right_associative() {
		let out = parse("a ? b : c ? d : e");
		match out {
			Expr::Conditional {
				otherwise,
				..
			} => assert!(matches!(*otherwise, Expr::Conditional {
				..
			})),
			v => panic!("unexpected parse: {v:?}"),
		}
	}

	#[test]
	fn typeof_and_in() {
		let out = parse("typeof x == \"undefined\"");
		assert!(matches!(out, Expr::Binary {
			o: BinaryOp::Equal,
			..
		}));
		let out = parse("\"a\" in b");
		assert!(matches!(out, Expr::Binary {
			o: BinaryOp::In,
			..
		}));
	}

	#[test]
	fn errors_carry_source() {
		let err = Parser::new("1 +").parse().unwrap_err();
		assert!(err.to_string().contains("1 +"));
	}
}
