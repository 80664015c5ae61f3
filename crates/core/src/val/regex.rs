use std::fmt::{self, Display, Formatter};

use crate::err::Error;

/// A compiled regular expression literal, e.g. `/alpha/i`.
///
/// JS flags `i`, `m` and `s` map onto the equivalent inline flags; `u`,
/// `g` and `y` are accepted and ignored (matching is Unicode-aware and
/// non-iterative); anything else is an error.
#[derive(Clone, Debug)]
pub struct Regex {
	pattern: String,
	flags: String,
	compiled: regex::Regex,
}

impl Regex {
	pub fn new(pattern: &str, flags: &str) -> Result<Self, Error> {
		let mut inline = String::new();
		for flag in flags.chars() {
			match flag {
				'i' | 'm' | 's' => inline.push(flag),
				'u' | 'g' | 'y' => {}
				_ => {
					return Err(Error::Evaluation(format!(
						"Invalid regular expression flag '{flag}' in /{pattern}/{flags}"
					)))
				}
			}
		}
		let source = if inline.is_empty() {
			pattern.to_string()
		} else {
			format!("(?{inline}){pattern}")
		};
		let compiled = regex::Regex::new(&source).map_err(|e| {
			Error::Evaluation(format!("Invalid regular expression /{pattern}/{flags}: {e}"))
		})?;
		Ok(Self {
			pattern: pattern.to_string(),
			flags: flags.to_string(),
			compiled,
		})
	}

	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	pub fn flags(&self) -> &str {
		&self.flags
	}

	pub fn is_match(&self, haystack: &str) -> bool {
		self.compiled.is_match(haystack)
	}

	/// Replace the first match, as JS `String.prototype.replace` does
	/// for a regex without the `g` flag.
	pub fn replace_first(&self, haystack: &str, replacement: &str) -> String {
		self.compiled.replace(haystack, replacement).into_owned()
	}
}

impl PartialEq for Regex {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern && self.flags == other.flags
	}
}

impl Display for Regex {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "/{}/{}", self.pattern, self.flags)
	}
}
