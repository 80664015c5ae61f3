use thiserror::Error;

/// An error originating from the materialization core.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The base file could not be read from disk
	#[error("Unable to read base file '{path}': {message}")]
	Read {
		path: String,
		message: String,
	},

	/// The base file was not valid YAML, or its root was not a mapping
	#[error("Unable to parse base file: {0}")]
	Yaml(String),

	/// The base definition did not have the expected shape
	#[error("{0}")]
	Shape(String),

	/// There was a problem parsing an expression
	#[error("Failed to parse expression `{source_text}`: {message}")]
	ExpressionParse {
		source_text: String,
		message: String,
	},

	/// An identifier was not found in scope
	#[error("ReferenceError: {0} is not defined")]
	Reference(String),

	/// A value was used in a way its type does not support
	#[error("TypeError: {0}")]
	Type(String),

	/// A runtime failure during expression evaluation
	#[error("{0}")]
	Evaluation(String),

	/// A formula referred to itself, directly or through other formulas
	#[error("Circular formula reference detected for \"{0}\"")]
	FormulaCycle(String),

	/// The string was not a valid duration
	#[error("Invalid duration '{0}'")]
	InvalidDuration(String),

	/// The function does not exist, or was called incorrectly
	#[error("Invalid function call {name}(): {message}")]
	InvalidFunction {
		name: String,
		message: String,
	},

	/// A value could not be serialized for output
	#[error("Unable to format value for output: {0}")]
	Format(String),

	/// A lower-level error wrapped with a human-readable context label
	#[error("{context}")]
	WithContext {
		context: String,
		#[source]
		cause: Box<Error>,
	},
}

impl Error {
	/// Wrap this error with a context label, preserving it as the cause
	pub fn context(self, context: impl Into<String>) -> Self {
		Self::WithContext {
			context: context.into(),
			cause: Box::new(self),
		}
	}

	/// Walk the cause chain, outermost first
	pub fn chain(&self) -> impl Iterator<Item = &Error> {
		let mut next = Some(self);
		std::iter::from_fn(move || {
			let cur = next?;
			next = match cur {
				Error::WithContext {
					cause,
					..
				} => Some(cause),
				_ => None,
			};
			Some(cur)
		})
	}
}
