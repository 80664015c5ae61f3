//! Executes builtin functions. Every callable reachable from an
//! expression is defined in this module tree and dispatched by name.

use crate::err::Error;
use crate::scope::Scope;
use crate::val::Value;

pub mod args;
pub mod array;
pub mod file;
pub mod globals;
pub mod json;
pub mod link;
pub mod math;
pub mod namespaces;
pub mod number;
pub mod object;
pub mod operate;
pub mod regex;
pub mod string;
pub mod time;

/// Each function is specified by its dispatch name followed by its path.
/// The path may be followed by one parenthesized argument, e.g. scope,
/// which is passed to the function before the remainder of the
/// arguments.
macro_rules! dispatch {
	($name: ident, $args: ident, $($function_name: literal => $($function_path: ident)::+ $(($ctx_arg: expr))*,)+) => {
		{
			match $name {
				$($function_name => {
					let args = args::FromArgs::from_args($name, $args)?;
					$($function_path)::+($($ctx_arg,)* args)
				},)+
				_ => {
					return Err($crate::err::Error::InvalidFunction{
						name: String::from($name),
						message: "no such builtin function".to_string()
					})
				}
			}
		}
	};
}

/// Attempts to run any builtin function.
pub fn run(scope: &Scope, name: &str, args: Vec<Value>) -> Result<Value, Error> {
	dispatch!(
		name,
		args,
		"today" => globals::today,
		"now" => globals::now,
		"date" => globals::date,
		"duration" => globals::duration,
		"_if" => globals::r#if,
		"_fileFn" => globals::file,
		"link" => globals::link,
		"list" => globals::list,
		"max" => globals::max,
		"min" => globals::min,
		"number" => globals::number,
		"image" => globals::image,
		"icon" => globals::icon,
		//
		"string::uppercase" => string::uppercase,
		"string::lowercase" => string::lowercase,
		"string::trim" => string::trim,
		"string::includes" => string::includes,
		"string::starts_with" => string::starts_with,
		"string::ends_with" => string::ends_with,
		"string::split" => string::split,
		"string::slice" => string::slice,
		"string::replace" => string::replace,
		"string::replace_all" => string::replace_all,
		"string::repeat" => string::repeat,
		"string::index_of" => string::index_of,
		"string::char_at" => string::char_at,
		"string::pad_start" => string::pad_start,
		"string::to_string" => string::to_string,
		//
		"array::is_array" => array::is_array,
		"array::includes" => array::includes,
		"array::join" => array::join,
		"array::index_of" => array::index_of,
		"array::slice" => array::slice,
		"array::concat" => array::concat,
		"array::reverse" => array::reverse,
		"array::flat" => array::flat,
		//
		"number::to_fixed" => number::to_fixed,
		"number::to_string" => string::to_string,
		"number::is_finite" => number::is_finite,
		"number::is_integer" => number::is_integer,
		"number::is_nan" => number::is_nan,
		"number::parse_float" => number::parse_float,
		"number::parse_int" => number::parse_int,
		//
		"time::get_time" => time::get_time,
		"time::to_iso_string" => time::to_iso_string,
		"time::get_full_year" => time::get_full_year,
		"time::get_month" => time::get_month,
		"time::get_date" => time::get_date,
		"time::get_day" => time::get_day,
		"time::get_hours" => time::get_hours,
		"time::get_minutes" => time::get_minutes,
		"time::get_seconds" => time::get_seconds,
		"time::now_millis" => time::now_millis,
		//
		"math::abs" => math::abs,
		"math::ceil" => math::ceil,
		"math::floor" => math::floor,
		"math::round" => math::round,
		"math::trunc" => math::trunc,
		"math::sqrt" => math::sqrt,
		"math::sign" => math::sign,
		"math::pow" => math::pow,
		"math::exp" => math::exp,
		"math::log" => math::log,
		"math::log2" => math::log2,
		"math::log10" => math::log10,
		"math::min" => math::min,
		"math::max" => math::max,
		//
		"object::keys" => object::keys,
		"object::values" => object::values,
		"object::entries" => object::entries,
		//
		"json::stringify" => json::stringify,
		"json::parse" => json::parse,
		//
		"regex::matches" => regex::matches,
		"link::as_link" => link::as_link,
		//
		"file::as_link" => file::as_link(scope),
		"file::has_link" => file::has_link(scope),
		"file::has_property" => file::has_property(scope),
		"file::has_tag" => file::has_tag(scope),
		"file::in_folder" => file::in_folder(scope),
	)
}
