use std::fmt;

/// Binary operators.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum BinaryOp {
	Or,  // ||
	And, // &&
	Nco, // ??
	//
	Add, // +
	Sub, // -
	Mul, // *
	Div, // /
	Rem, // %
	Pow, // **
	//
	Equal,       // ==
	NotEqual,    // !=
	Exact,       // ===
	NotExact,    // !==
	//
	LessThan,        // <
	LessThanOrEqual, // <=
	MoreThan,        // >
	MoreThanOrEqual, // >=
	//
	In,         // in
	Instanceof, // instanceof
}

/// Unary operators.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum UnaryOp {
	Not,    // !
	Neg,    // -
	Pos,    // +
	BitNot, // ~
	Typeof, // typeof
	Void,   // void
}

impl fmt::Display for BinaryOp {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let s = match self {
			Self::Or => "||",
			Self::And => "&&",
			Self::Nco => "??",
			Self::Add => "+",
			Self::Sub => "-",
			Self::Mul => "*",
			Self::Div => "/",
			Self::Rem => "%",
			Self::Pow => "**",
			Self::Equal => "==",
			Self::NotEqual => "!=",
			Self::Exact => "===",
			Self::NotExact => "!==",
			Self::LessThan => "<",
			Self::LessThanOrEqual => "<=",
			Self::MoreThan => ">",
			Self::MoreThanOrEqual => ">=",
			Self::In => "in",
			Self::Instanceof => "instanceof",
		};
		f.write_str(s)
	}
}

impl fmt::Display for UnaryOp {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let s = match self {
			Self::Not => "!",
			Self::Neg => "-",
			Self::Pos => "+",
			Self::BitNot => "~",
			Self::Typeof => "typeof ",
			Self::Void => "void ",
		};
		f.write_str(s)
	}
}
