//! The dynamic value domain manipulated by the expression evaluator.

pub(crate) mod array;
pub(crate) mod datetime;
pub(crate) mod duration;
pub(crate) mod link;
pub(crate) mod number;
pub(crate) mod object;
pub(crate) mod regex;
pub(crate) mod value;

pub use self::array::Array;
pub use self::datetime::Datetime;
pub use self::duration::Duration;
pub use self::link::Link;
pub use self::number::Number;
pub use self::object::Object;
pub use self::regex::Regex;
pub use self::value::{FileId, Function, Value};
