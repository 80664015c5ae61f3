use std::fmt::{self, Display, Formatter};
use std::ops;

use chrono::{DateTime, Local, SecondsFormat, TimeZone, Utc};

use crate::val::Duration;

/// An instant in time, kept in UTC and rendered in ISO-8601.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Datetime(pub DateTime<Utc>);

impl From<DateTime<Utc>> for Datetime {
	fn from(v: DateTime<Utc>) -> Self {
		Self(v)
	}
}

impl From<Datetime> for DateTime<Utc> {
	fn from(v: Datetime) -> Self {
		v.0
	}
}

impl Datetime {
	/// The current instant
	pub fn now() -> Self {
		Self(Utc::now())
	}

	/// The current date at local midnight
	pub fn today() -> Self {
		let now = Local::now();
		let midnight = now.date_naive().and_hms_opt(0, 0, 0).unwrap_or_else(|| now.naive_local());
		match Local.from_local_datetime(&midnight) {
			chrono::LocalResult::Single(v) | chrono::LocalResult::Ambiguous(v, _) => {
				Self(v.with_timezone(&Utc))
			}
			chrono::LocalResult::None => Self(now.with_timezone(&Utc)),
		}
	}

	/// Construct from milliseconds since the Unix epoch
	pub fn from_timestamp_millis(ms: i64) -> Option<Self> {
		DateTime::<Utc>::from_timestamp_millis(ms).map(Self)
	}

	/// Milliseconds since the Unix epoch
	pub fn timestamp_millis(&self) -> i64 {
		self.0.timestamp_millis()
	}

	/// Parse a datetime from a string, accepting RFC 3339 forms and
	/// bare `YYYY-MM-DD` / `YYYY-MM-DD HH:MM[:SS]` dates, which are
	/// interpreted as UTC.
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		if let Ok(v) = DateTime::parse_from_rfc3339(s) {
			return Some(Self(v.with_timezone(&Utc)));
		}
		for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
			if let Ok(v) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
				return Some(Self(Utc.from_utc_datetime(&v)));
			}
		}
		if let Ok(v) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
			let v = v.and_hms_opt(0, 0, 0)?;
			return Some(Self(Utc.from_utc_datetime(&v)));
		}
		None
	}

	/// Render as ISO-8601 with millisecond precision, e.g.
	/// `2024-01-01T00:00:00.000Z`
	pub fn to_iso_string(&self) -> String {
		self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
	}
}

impl ops::Add<Duration> for Datetime {
	type Output = Self;
	fn add(self, other: Duration) -> Self {
		match self.0.checked_add_signed(chrono::Duration::milliseconds(other.millis())) {
			Some(v) => Self(v),
			None => self,
		}
	}
}

impl ops::Sub<Duration> for Datetime {
	type Output = Self;
	fn sub(self, other: Duration) -> Self {
		match self.0.checked_sub_signed(chrono::Duration::milliseconds(other.millis())) {
			Some(v) => Self(v),
			None => self,
		}
	}
}

impl ops::Sub for Datetime {
	type Output = Duration;
	fn sub(self, other: Self) -> Duration {
		Duration::from_millis(self.timestamp_millis() - other.timestamp_millis())
	}
}

impl Display for Datetime {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(&self.to_iso_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_rfc3339() {
		let dt = Datetime::parse("2024-01-08T00:00:00Z").unwrap();
		assert_eq!(dt.to_iso_string(), "2024-01-08T00:00:00.000Z");
	}

	#[test]
	fn parse_bare_date() {
		let dt = Datetime::parse("2024-01-08").unwrap();
		assert_eq!(dt.to_iso_string(), "2024-01-08T00:00:00.000Z");
	}

	#[test]
	fn subtract_duration() {
		let dt = Datetime::parse("2024-01-08T00:00:00Z").unwrap();
		let out = dt - Duration::from_millis(7 * 24 * 60 * 60 * 1000);
		assert_eq!(out.to_iso_string(), "2024-01-01T00:00:00.000Z");
	}

	#[test]
	fn subtract_datetimes() {
		let a = Datetime::parse("2024-01-08T00:00:00Z").unwrap();
		let b = Datetime::parse("2024-01-01T00:00:00Z").unwrap();
		assert_eq!((a - b).millis(), 604_800_000);
	}
}
