use crate::val::Number;

/// A location in the expression source, as byte offsets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Span {
	pub start: usize,
	pub end: usize,
}

/// A single lexed token.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
	pub kind: TokenKind,
	pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
	Ident(String),
	Strand(String),
	Number(Number),
	Regex {
		pattern: String,
		flags: String,
	},
	//
	LeftParen,
	RightParen,
	LeftBracket,
	RightBracket,
	Comma,
	Dot,
	Question,
	Colon,
	//
	Add,          // +
	Sub,          // -
	Mul,          // *
	Div,          // /
	Rem,          // %
	Pow,          // **
	Not,          // !
	BitNot,       // ~
	//
	Lt,           // <
	Lte,          // <=
	Gt,           // >
	Gte,          // >=
	EqEq,         // ==
	NotEq,        // !=
	EqEqEq,       // ===
	NotEqEq,      // !==
	AndAnd,       // &&
	OrOr,         // ||
	Coalesce,     // ??
	//
	Eof,
}

impl TokenKind {
	/// A short description of this token, used in parse errors
	pub fn describe(&self) -> String {
		match self {
			TokenKind::Ident(v) => format!("identifier `{v}`"),
			TokenKind::Strand(_) => "string literal".to_string(),
			TokenKind::Number(v) => format!("number `{v}`"),
			TokenKind::Regex {
				..
			} => "regex literal".to_string(),
			TokenKind::LeftParen => "`(`".to_string(),
			TokenKind::RightParen => "`)`".to_string(),
			TokenKind::LeftBracket => "`[`".to_string(),
			TokenKind::RightBracket => "`]`".to_string(),
			TokenKind::Comma => "`,`".to_string(),
			TokenKind::Dot => "`.`".to_string(),
			TokenKind::Question => "`?`".to_string(),
			TokenKind::Colon => "`:`".to_string(),
			TokenKind::Add => "`+`".to_string(),
			TokenKind::Sub => "`-`".to_string(),
			TokenKind::Mul => "`*`".to_string(),
			TokenKind::Div => "`/`".to_string(),
			TokenKind::Rem => "`%`".to_string(),
			TokenKind::Pow => "`**`".to_string(),
			TokenKind::Not => "`!`".to_string(),
			TokenKind::BitNot => "`~`".to_string(),
			TokenKind::Lt => "`<`".to_string(),
			TokenKind::Lte => "`<=`".to_string(),
			TokenKind::Gt => "`>`".to_string(),
			TokenKind::Gte => "`>=`".to_string(),
			TokenKind::EqEq => "`==`".to_string(),
			TokenKind::NotEq => "`!=`".to_string(),
			TokenKind::EqEqEq => "`===`".to_string(),
			TokenKind::NotEqEq => "`!==`".to_string(),
			TokenKind::AndAnd => "`&&`".to_string(),
			TokenKind::OrOr => "`||`".to_string(),
			TokenKind::Coalesce => "`??`".to_string(),
			TokenKind::Eof => "end of expression".to_string(),
		}
	}
}
