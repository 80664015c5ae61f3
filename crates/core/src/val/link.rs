use std::fmt::{self, Display, Formatter};

/// A reference to a note or attachment by path, optionally with display
/// text. Produced by the `link()` and `file()` globals and by
/// `file.asLink()`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Link {
	pub path: String,
	pub display: Option<String>,
	pub embed: bool,
}

impl Link {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			display: None,
			embed: false,
		}
	}

	pub fn with_display(mut self, display: Option<String>) -> Self {
		self.display = display;
		self
	}
}

impl Display for Link {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match &self.display {
			Some(display) if !display.is_empty() => f.write_str(display),
			_ => f.write_str(&self.path),
		}
	}
}
