//! Date-window conditions
//!
//! `between`, `before` and `after` compare a caller-supplied `now` against
//! calendar dates. A bare date means midnight UTC at the start of that day.
//! Empty date arguments make a condition false rather than an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde_json::Value;
use tera::Result as TeraResult;

use crate::error::{Result, TalesError};

/// Parses `yyyy-mm-dd`, `yyyy-mm-dd hh:mm:ss` or RFC 3339
///
/// `role` names the argument in the error.
pub fn parse_date(input: &str, role: &'static str) -> Result<DateTime<Utc>> {
	let trimmed = input.trim();
	if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
		return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
	}
	if let Ok(stamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
		return Ok(stamp.and_utc());
	}
	DateTime::parse_from_rfc3339(trimmed)
		.map(|stamp| stamp.with_timezone(&Utc))
		.map_err(|_| TalesError::DateParse {
			role,
			input: input.to_string(),
		})
}

/// Whether `now` falls on any day from `from` to `to`, both inclusive
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use ztal_tales::date::between;
///
/// let now = Utc.with_ymd_and_hms(2022, 1, 30, 23, 59, 0).unwrap();
/// assert!(between("2022-01-01", "2022-01-30", now).unwrap());
/// ```
pub fn between(from: &str, to: &str, now: DateTime<Utc>) -> Result<bool> {
	if from.trim().is_empty() || to.trim().is_empty() {
		return Ok(false);
	}
	let from = parse_date(from, "from")?;
	let to = parse_date(to, "to")?;
	let end = to
		.checked_add_signed(TimeDelta::days(1))
		.unwrap_or(DateTime::<Utc>::MAX_UTC);
	Ok(now >= from && now < end)
}

/// Whether `now` is strictly before `date`
pub fn before(date: &str, now: DateTime<Utc>) -> Result<bool> {
	if date.trim().is_empty() {
		return Ok(false);
	}
	Ok(now < parse_date(date, "before")?)
}

/// Whether `now` is strictly after `date`
pub fn after(date: &str, now: DateTime<Utc>) -> Result<bool> {
	if date.trim().is_empty() {
		return Ok(false);
	}
	Ok(now > parse_date(date, "after")?)
}

fn tested_now(tester: &str, value: Option<&Value>) -> TeraResult<DateTime<Utc>> {
	let raw = value.and_then(Value::as_str).ok_or_else(|| {
		tera::Error::msg(format!("{tester} tester must be applied to a date string"))
	})?;
	Ok(parse_date(raw, "now")?)
}

fn date_arg<'a>(tester: &str, args: &'a [Value], index: usize) -> TeraResult<&'a str> {
	match args.get(index) {
		Some(Value::String(s)) => Ok(s),
		Some(Value::Null) => Ok(""),
		_ => Err(tera::Error::msg(format!(
			"{tester} tester requires date string arguments"
		))),
	}
}

/// Tests the render time against an inclusive day range
///
/// # Example
/// ```tera
/// {% if now is between("2022-01-01", "2022-01-30") %}sale{% endif %}
/// ```
pub fn between_tester(value: Option<&Value>, args: &[Value]) -> TeraResult<bool> {
	let now = tested_now("between", value)?;
	let from = date_arg("between", args, 0)?;
	let to = date_arg("between", args, 1)?;
	Ok(between(from, to, now)?)
}

/// Tests whether the render time precedes a date
pub fn before_tester(value: Option<&Value>, args: &[Value]) -> TeraResult<bool> {
	let now = tested_now("before", value)?;
	Ok(before(date_arg("before", args, 0)?, now)?)
}

/// Tests whether the render time follows a date
pub fn after_tester(value: Option<&Value>, args: &[Value]) -> TeraResult<bool> {
	let now = tested_now("after", value)?;
	Ok(after(date_arg("after", args, 0)?, now)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;
	use serde_json::json;

	fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
	}

	#[rstest]
	#[case(at(2022, 1, 1, 0), true)]
	#[case(at(2022, 1, 2, 23), true)]
	#[case(at(2022, 1, 3, 0), false)]
	#[case(at(2021, 12, 31, 23), false)]
	fn test_between_includes_whole_last_day(#[case] now: DateTime<Utc>, #[case] expected: bool) {
		assert_eq!(between("2022-01-01", "2022-01-02", now).unwrap(), expected);
	}

	#[test]
	fn test_between_names_failing_argument() {
		let now = at(2022, 1, 1, 0);
		let err = between("2022-01-01", "soon", now).unwrap_err();
		assert!(matches!(err, TalesError::DateParse { role: "to", .. }));
		assert!(err.to_string().contains("\"to\""));
		let err = between("whenever", "2022-01-01", now).unwrap_err();
		assert!(matches!(err, TalesError::DateParse { role: "from", .. }));
	}

	#[test]
	fn test_empty_arguments_are_false() {
		let now = at(2022, 1, 1, 0);
		assert!(!between("", "2022-01-01", now).unwrap());
		assert!(!before(" ", now).unwrap());
		assert!(!after("", now).unwrap());
	}

	#[test]
	fn test_before_and_after_use_midnight() {
		let date = "2022-01-30";
		assert!(before(date, at(2022, 1, 29, 23)).unwrap());
		assert!(!before(date, at(2022, 1, 30, 0)).unwrap());
		assert!(!after(date, at(2022, 1, 30, 0)).unwrap());
		assert!(after(date, at(2022, 1, 30, 1)).unwrap());
	}

	#[test]
	fn test_parse_date_formats() {
		assert_eq!(parse_date("2022-01-30", "x").unwrap(), at(2022, 1, 30, 0));
		assert_eq!(
			parse_date("2022-01-30 05:00:00", "x").unwrap(),
			at(2022, 1, 30, 5)
		);
		assert_eq!(
			parse_date("2022-01-30T07:00:00+02:00", "x").unwrap(),
			at(2022, 1, 30, 5)
		);
	}

	#[test]
	fn test_between_tester() {
		let now = json!("2022-01-15T12:00:00Z");
		let args = [json!("2022-01-01"), json!("2022-01-30")];
		assert!(between_tester(Some(&now), &args).unwrap());
		assert!(between_tester(None, &args).is_err());
		assert!(!between_tester(Some(&now), &[json!(null), json!("2022-01-30")]).unwrap());
	}
}
