//! Source rewriting applied before lexing.
//!
//! The globals named `if` and `file` collide with keywords and with the
//! per-file `file` object, so calls to them are renamed to internal
//! aliases before parsing: `if (` becomes `_if(` and `file (` becomes
//! `_fileFn(`. Quoted spans are preserved verbatim, and member accesses
//! like `file.name` are left untouched.

/// The alias the `if` global is addressed by after rewriting.
pub const IF_ALIAS: &str = "_if";

/// The alias the `file` global is addressed by after rewriting.
pub const FILE_FN_ALIAS: &str = "_fileFn";

fn is_ident_start(c: char) -> bool {
	c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Rewrite bare `if(` and `file(` calls to their aliases.
pub fn rewrite(source: &str) -> String {
	let mut out = String::with_capacity(source.len());
	let mut chars = source.char_indices().peekable();
	let mut prev: Option<char> = None;

	while let Some((_, c)) = chars.next() {
		match c {
			// Quoted spans are copied through untouched
			'\'' | '"' | '`' => {
				out.push(c);
				while let Some((_, q)) = chars.next() {
					out.push(q);
					if q == '\\' {
						if let Some((_, escaped)) = chars.next() {
							out.push(escaped);
						}
						continue;
					}
					if q == c {
						break;
					}
				}
				prev = Some(c);
			}
			c if is_ident_start(c) && !prev.map(|p| is_ident_continue(p) || p == '.').unwrap_or(false) => {
				let mut ident = String::new();
				ident.push(c);
				while let Some(&(_, n)) = chars.peek() {
					if is_ident_continue(n) {
						ident.push(n);
						chars.next();
					} else {
						break;
					}
				}
				// A call follows if the next significant character is `(`
				let followed_by_paren = {
					let mut lookahead = chars.clone();
					loop {
						match lookahead.next() {
							Some((_, w)) if w.is_whitespace() => continue,
							Some((_, '(')) => break true,
							_ => break false,
						}
					}
				};
				match (ident.as_str(), followed_by_paren) {
					("if", true) => out.push_str(IF_ALIAS),
					("file", true) => out.push_str(FILE_FN_ALIAS),
					_ => out.push_str(&ident),
				}
				prev = ident.chars().last();
			}
			c => {
				out.push(c);
				prev = Some(c);
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rewrites_bare_calls() {
		assert_eq!(rewrite("if(x, 1, 2)"), "_if(x, 1, 2)");
		assert_eq!(rewrite("file(\"a.md\")"), "_fileFn(\"a.md\")");
		assert_eq!(rewrite("if (x, 1)"), "_if (x, 1)");
	}

	#[test]
	fn leaves_member_access_alone() {
		assert_eq!(rewrite("file.name"), "file.name");
		assert_eq!(rewrite("note.file(x)"), "note.file(x)");
		assert_eq!(rewrite("notify(x)"), "notify(x)");
	}

	#[test]
	fn preserves_strings() {
		assert_eq!(rewrite("\"if(x)\" + 'file(y)'"), "\"if(x)\" + 'file(y)'");
		assert_eq!(rewrite("`if(z)`"), "`if(z)`");
		assert_eq!(rewrite("\"a \\\" if(b)\""), "\"a \\\" if(b)\"");
	}

	#[test]
	fn nested_calls() {
		assert_eq!(rewrite("if(file(x), if(y, 1), 2)"), "_if(_fileFn(x), _if(y, 1), 2)");
	}
}
