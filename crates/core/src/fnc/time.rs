//! Date methods, dispatched with the receiver as the first argument.
//! Component accessors use UTC, matching the ISO rendering of dates.

use chrono::{Datelike, Timelike};

use crate::err::Error;
use crate::val::{Datetime, Value};

fn receiver(name: &str, value: Value) -> Result<Datetime, Error> {
	match value {
		Value::Datetime(v) => Ok(v),
		v => Err(Error::Type(format!("{name}() called on a {}", v.kind()))),
	}
}

pub fn get_time((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getTime", date)?.timestamp_millis()))
}

pub fn to_iso_string((date,): (Value,)) -> Result<Value, Error> {
	Ok(receiver("toISOString", date)?.to_iso_string().into())
}

pub fn get_full_year((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getFullYear", date)?.0.year() as i64))
}

/// Zero-based, as in JS
pub fn get_month((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getMonth", date)?.0.month0() as i64))
}

pub fn get_date((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getDate", date)?.0.day() as i64))
}

/// Day of week; 0 is Sunday, as in JS
pub fn get_day((date,): (Value,)) -> Result<Value, Error> {
	let weekday = receiver("getDay", date)?.0.weekday().num_days_from_sunday();
	Ok(Value::from(weekday as i64))
}

pub fn get_hours((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getHours", date)?.0.hour() as i64))
}

pub fn get_minutes((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getMinutes", date)?.0.minute() as i64))
}

pub fn get_seconds((date,): (Value,)) -> Result<Value, Error> {
	Ok(Value::from(receiver("getSeconds", date)?.0.second() as i64))
}

/// `Date.now()`
pub fn now_millis(_: ()) -> Result<Value, Error> {
	Ok(Value::from(Datetime::now().timestamp_millis()))
}
