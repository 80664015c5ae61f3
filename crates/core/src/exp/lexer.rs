use std::str::FromStr;

use thiserror::Error;

use crate::exp::token::{Span, Token, TokenKind};
use crate::val::Number;

/// An error returned by the lexer when an invalid token is encountered.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LexError {
	#[error("unexpected character {0:?}")]
	UnexpectedCharacter(char),
	#[error("unterminated string literal")]
	UnterminatedString,
	#[error("unterminated regex literal")]
	UnterminatedRegex,
	#[error("unterminated comment")]
	UnterminatedComment,
	#[error("invalid number literal `{0}`")]
	InvalidNumber(String),
}

/// The expression lexer.
///
/// Tokens are produced lazily. Regex literals are ambiguous with the
/// division operator and cannot be lexed without parser context, so the
/// lexer emits `/` as [`TokenKind::Div`] and the parser re-lexes it as a
/// regex via [`Lexer::relex_regex`] when it occurs in prefix position.
pub struct Lexer<'a> {
	source: &'a str,
	pos: usize,
	/// A buffer used to build the value of string tokens containing
	/// escape sequences.
	scratch: String,
}

fn is_ident_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

impl<'a> Lexer<'a> {
	pub fn new(source: &'a str) -> Self {
		Self {
			source,
			pos: 0,
			scratch: String::new(),
		}
	}

	fn peek_char(&self) -> Option<char> {
		self.source[self.pos..].chars().next()
	}

	fn peek_char_at(&self, offset: usize) -> Option<char> {
		let mut chars = self.source[self.pos..].chars();
		for _ in 0..offset {
			chars.next()?;
		}
		chars.next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek_char()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	fn eat(&mut self, c: char) -> bool {
		if self.peek_char() == Some(c) {
			self.pos += c.len_utf8();
			true
		} else {
			false
		}
	}

	fn skip_trivia(&mut self) -> Result<(), LexError> {
		loop {
			match self.peek_char() {
				Some(c) if c.is_whitespace() => {
					self.bump();
				}
				Some('/') if self.peek_char_at(1) == Some('/') => {
					while let Some(c) = self.peek_char() {
						if c == '\n' {
							break;
						}
						self.bump();
					}
				}
				Some('/') if self.peek_char_at(1) == Some('*') => {
					self.bump();
					self.bump();
					loop {
						match self.bump() {
							Some('*') if self.peek_char() == Some('/') => {
								self.bump();
								break;
							}
							Some(_) => {}
							None => return Err(LexError::UnterminatedComment),
						}
					}
				}
				_ => return Ok(()),
			}
		}
	}

	/// Lex the next token.
	pub fn next_token(&mut self) -> Result<Token, LexError> {
		self.skip_trivia()?;
		let start = self.pos;
		let Some(c) = self.bump() else {
			return Ok(self.finish(start, TokenKind::Eof));
		};
		let kind = match c {
			'(' => TokenKind::LeftParen,
			')' => TokenKind::RightParen,
			'[' => TokenKind::LeftBracket,
			']' => TokenKind::RightBracket,
			',' => TokenKind::Comma,
			':' => TokenKind::Colon,
			'~' => TokenKind::BitNot,
			'%' => TokenKind::Rem,
			'/' => TokenKind::Div,
			'+' => TokenKind::Add,
			'-' => TokenKind::Sub,
			'*' => {
				if self.eat('*') {
					TokenKind::Pow
				} else {
					TokenKind::Mul
				}
			}
			'?' => {
				if self.eat('?') {
					TokenKind::Coalesce
				} else {
					TokenKind::Question
				}
			}
			'<' => {
				if self.eat('=') {
					TokenKind::Lte
				} else {
					TokenKind::Lt
				}
			}
			'>' => {
				if self.eat('=') {
					TokenKind::Gte
				} else {
					TokenKind::Gt
				}
			}
			'=' => {
				if self.eat('=') {
					if self.eat('=') {
						TokenKind::EqEqEq
					} else {
						TokenKind::EqEq
					}
				} else {
					return Err(LexError::UnexpectedCharacter('='));
				}
			}
			'!' => {
				if self.eat('=') {
					if self.eat('=') {
						TokenKind::NotEqEq
					} else {
						TokenKind::NotEq
					}
				} else {
					TokenKind::Not
				}
			}
			'&' => {
				if self.eat('&') {
					TokenKind::AndAnd
				} else {
					return Err(LexError::UnexpectedCharacter('&'));
				}
			}
			'|' => {
				if self.eat('|') {
					TokenKind::OrOr
				} else {
					return Err(LexError::UnexpectedCharacter('|'));
				}
			}
			'\'' | '"' | '`' => self.lex_string(c)?,
			'.' => {
				if self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
					self.lex_number(start)?
				} else {
					TokenKind::Dot
				}
			}
			c if c.is_ascii_digit() => self.lex_number(start)?,
			c if is_ident_start(c) => {
				while let Some(n) = self.peek_char() {
					if is_ident_continue(n) {
						self.bump();
					} else {
						break;
					}
				}
				TokenKind::Ident(self.source[start..self.pos].to_string())
			}
			c => return Err(LexError::UnexpectedCharacter(c)),
		};
		Ok(self.finish(start, kind))
	}

	/// Re-lex from the start of a `/` token as a regex literal. The
	/// parser calls this when a `/` occurs where a value is expected.
	pub fn relex_regex(&mut self, token: &Token) -> Result<Token, LexError> {
		let start = token.span.start;
		self.pos = start + 1;
		let pattern_start = self.pos;
		let mut in_class = false;
		loop {
			match self.bump() {
				Some('\\') => {
					if self.bump().is_none() {
						return Err(LexError::UnterminatedRegex);
					}
				}
				Some('[') => in_class = true,
				Some(']') => in_class = false,
				Some('/') if !in_class => break,
				Some('\n') | None => return Err(LexError::UnterminatedRegex),
				Some(_) => {}
			}
		}
		let pattern = self.source[pattern_start..self.pos - 1].to_string();
		let flags_start = self.pos;
		while let Some(c) = self.peek_char() {
			if c.is_ascii_alphabetic() {
				self.bump();
			} else {
				break;
			}
		}
		let flags = self.source[flags_start..self.pos].to_string();
		Ok(self.finish(start, TokenKind::Regex {
			pattern,
			flags,
		}))
	}

	fn lex_string(&mut self, quote: char) -> Result<TokenKind, LexError> {
		self.scratch.clear();
		loop {
			match self.bump() {
				Some('\\') => match self.bump() {
					Some('n') => self.scratch.push('\n'),
					Some('t') => self.scratch.push('\t'),
					Some('r') => self.scratch.push('\r'),
					Some('0') => self.scratch.push('\0'),
					Some('u') => {
						// \uHHHH or \u{H...}
						let code = if self.eat('{') {
							let start = self.pos;
							while self.peek_char().map(|c| c != '}').unwrap_or(false) {
								self.bump();
							}
							let digits = &self.source[start..self.pos];
							if !self.eat('}') {
								return Err(LexError::UnterminatedString);
							}
							u32::from_str_radix(digits, 16).ok()
						} else {
							let start = self.pos;
							for _ in 0..4 {
								self.bump();
							}
							u32::from_str_radix(self.source.get(start..self.pos).unwrap_or(""), 16)
								.ok()
						};
						match code.and_then(char::from_u32) {
							Some(c) => self.scratch.push(c),
							None => self.scratch.push('\u{FFFD}'),
						}
					}
					// Unknown escapes keep the escaped character
					Some(c) => self.scratch.push(c),
					None => return Err(LexError::UnterminatedString),
				},
				Some(c) if c == quote => break,
				Some(c) => self.scratch.push(c),
				None => return Err(LexError::UnterminatedString),
			}
		}
		Ok(TokenKind::Strand(self.scratch.clone()))
	}

	fn lex_number(&mut self, start: usize) -> Result<TokenKind, LexError> {
		// Radix prefixes
		if &self.source[start..self.pos] == "0" {
			let radix = match self.peek_char() {
				Some('x') | Some('X') => Some(16),
				Some('o') | Some('O') => Some(8),
				Some('b') | Some('B') => Some(2),
				_ => None,
			};
			if let Some(radix) = radix {
				self.bump();
				let digits_start = self.pos;
				while self.peek_char().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false) {
					self.bump();
				}
				let digits = &self.source[digits_start..self.pos];
				return match i64::from_str_radix(digits, radix) {
					Ok(v) => Ok(TokenKind::Number(Number::Int(v))),
					Err(_) => Err(LexError::InvalidNumber(self.source[start..self.pos].to_string())),
				};
			}
		}
		while self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
			self.bump();
		}
		if self.peek_char() == Some('.') && !self.source[start..self.pos].contains('.') {
			self.bump();
			while self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
				self.bump();
			}
		}
		if matches!(self.peek_char(), Some('e') | Some('E')) {
			let mark = self.pos;
			self.bump();
			if matches!(self.peek_char(), Some('+') | Some('-')) {
				self.bump();
			}
			if self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
				while self.peek_char().map(|c| c.is_ascii_digit()).unwrap_or(false) {
					self.bump();
				}
			} else {
				// Not an exponent after all, e.g. `1e` followed by an ident
				self.pos = mark;
			}
		}
		let text = &self.source[start..self.pos];
		match Number::from_str(text) {
			Ok(v) => Ok(TokenKind::Number(v)),
			Err(()) => Err(LexError::InvalidNumber(text.to_string())),
		}
	}

	fn finish(&self, start: usize, kind: TokenKind) -> Token {
		Token {
			kind,
			span: Span {
				start,
				end: self.pos,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn lex_all(source: &str) -> Vec<TokenKind> {
		let mut lexer = Lexer::new(source);
		let mut out = Vec::new();
		loop {
			let token = lexer.next_token().unwrap();
			if token.kind == TokenKind::Eof {
				break;
			}
			out.push(token.kind);
		}
		out
	}

	#[test]
	fn punctuation_and_operators() {
		assert_eq!(
			lex_all("a ?? b || c === 2 ** 3"),
			vec![
				TokenKind::Ident("a".to_string()),
				TokenKind::Coalesce,
				TokenKind::Ident("b".to_string()),
				TokenKind::OrOr,
				TokenKind::Ident("c".to_string()),
				TokenKind::EqEqEq,
				TokenKind::Number(Number::Int(2)),
				TokenKind::Pow,
				TokenKind::Number(Number::Int(3)),
			]
		);
	}

	#[test]
	fn strings_with_escapes() {
		assert_eq!(
			lex_all(r#""a\nb" 'c\'d' `e`"#),
			vec![
				TokenKind::Strand("a\nb".to_string()),
				TokenKind::Strand("c'd".to_string()),
				TokenKind::Strand("e".to_string()),
			]
		);
	}

	#[test]
	fn numbers() {
		assert_eq!(
			lex_all("1 2.5 .5 1e3 0xff"),
			vec![
				TokenKind::Number(Number::Int(1)),
				TokenKind::Number(Number::Float(2.5)),
				TokenKind::Number(Number::Float(0.5)),
				TokenKind::Number(Number::Float(1000.0)),
				TokenKind::Number(Number::Int(255)),
			]
		);
	}

	#[test]
	fn comments_are_trivia() {
		assert_eq!(
			lex_all("1 // one\n + /* two */ 2"),
			vec![TokenKind::Number(Number::Int(1)), TokenKind::Add, TokenKind::Number(Number::Int(2))]
		);
	}

	#[test]
	fn regex_relex() {
		let mut lexer = Lexer::new("/alpha[/]+/i");
		let div = lexer.next_token().unwrap();
		assert_eq!(div.kind, TokenKind::Div);
		let regex = lexer.relex_regex(&div).unwrap();
		assert_eq!(
			regex.kind,
			TokenKind::Regex {
				pattern: "alpha[/]+".to_string(),
				flags: "i".to_string(),
			}
		);
	}
}
