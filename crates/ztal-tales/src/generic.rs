//! General-purpose value helpers
//!
//! Runtime versions of the casing, replacement, type and comparison helpers
//! available to templates, followed by the Tera filters and testers that
//! expose them.

use std::collections::HashMap;
use std::fmt::Write;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use serde_json::Value;
use tera::Result as TeraResult;

use crate::date::parse_date;
use crate::error::{Result, TalesError};

/// How [`uc`] changes the case of a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
	/// Uppercase the first character
	#[default]
	First,
	/// Uppercase the first character of every word
	Word,
	/// Uppercase everything
	All,
	/// Lowercase everything
	None,
}

impl FromStr for CaseMode {
	type Err = std::convert::Infallible;

	/// Unknown modes fall back to [`CaseMode::First`]
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Ok(match s.trim().to_ascii_lowercase().as_str() {
			"word" => Self::Word,
			"all" => Self::All,
			"none" => Self::None,
			_ => Self::First,
		})
	}
}

fn upper_first(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Changes the case of `value`
///
/// ```rust
/// use ztal_tales::generic::{CaseMode, uc};
///
/// assert_eq!(uc("hello world", CaseMode::First), "Hello world");
/// assert_eq!(uc("hello world", CaseMode::Word), "Hello World");
/// ```
pub fn uc(value: &str, mode: CaseMode) -> String {
	match mode {
		CaseMode::First => upper_first(value),
		CaseMode::Word => {
			let mut out = String::with_capacity(value.len());
			let mut at_word_start = true;
			for c in value.chars() {
				if at_word_start && !c.is_whitespace() {
					out.extend(c.to_uppercase());
				} else {
					out.push(c);
				}
				at_word_start = c.is_whitespace();
			}
			out
		}
		CaseMode::All => value.to_uppercase(),
		CaseMode::None => value.to_lowercase(),
	}
}

/// Replaces every occurrence of `search` in `subject`
///
/// An empty `search` leaves the subject unchanged.
pub fn str_replace(subject: &str, search: &str, replacement: &str) -> String {
	if search.is_empty() {
		return subject.to_string();
	}
	subject.replace(search, replacement)
}

/// Parses a JSON literal written with single-quoted strings
///
/// Single quotes delimit strings; two single quotes inside a string stand for
/// one literal quote. Double quotes inside a string are taken literally.
///
/// ```rust
/// use serde_json::json;
/// use ztal_tales::generic::from_json_string;
///
/// let value = from_json_string("{'name':'O''Brien','tags':['a','b']}").unwrap();
/// assert_eq!(value, json!({"name": "O'Brien", "tags": ["a", "b"]}));
/// ```
pub fn from_json_string(src: &str) -> Result<Value> {
	let mut json = String::with_capacity(src.len());
	let mut in_string = false;
	let mut chars = src.chars().peekable();

	while let Some(c) = chars.next() {
		match c {
			'\'' if in_string && chars.peek() == Some(&'\'') => {
				chars.next();
				json.push('\'');
			}
			'\'' => {
				in_string = !in_string;
				json.push('"');
			}
			'"' if in_string => json.push_str("\\\""),
			_ => json.push(c),
		}
	}

	Ok(serde_json::from_str(&json)?)
}

/// Name of the type held by `value`
pub fn value_type(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
		Value::Number(_) => "double",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Integer remainder of `a / b`, with the sign of `a`
pub fn modulo(a: i64, b: i64) -> Result<i64> {
	if b == 0 {
		return Err(TalesError::DivisionByZero);
	}
	Ok(a.wrapping_rem(b))
}

fn as_number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64(),
		Value::String(s) => s.trim().parse().ok(),
		Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
		_ => None,
	}
}

/// Loose equality
///
/// Numbers compare by value, including numeric strings (`"1" == 1.0`).
/// Everything else compares structurally.
pub fn equal(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Number(_), _) | (_, Value::Number(_)) => match (as_number(a), as_number(b)) {
			(Some(x), Some(y)) => x == y,
			_ => a == b,
		},
		_ => a == b,
	}
}

/// Truthiness of a template value
///
/// `null`, `false`, zero, `""`, `"0"` and empty arrays or objects are false.
pub fn is_true(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
		Value::String(s) => !s.is_empty() && s != "0",
		Value::Array(items) => !items.is_empty(),
		Value::Object(map) => !map.is_empty(),
	}
}

/// Formats a date string with a `strftime` pattern
///
/// `value` is either `yyyy-mm-dd` or RFC 3339.
pub fn format_date(value: &str, format: &str) -> Result<String> {
	if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
		return Err(TalesError::InvalidArgument(format!(
			"invalid date format {format:?}"
		)));
	}
	let date = parse_date(value, "value")?;
	let mut out = String::new();
	write!(out, "{}", date.format(format))
		.map_err(|_| TalesError::InvalidArgument(format!("cannot format {value:?}")))?;
	Ok(out)
}

/// Formats a number with grouped thousands
///
/// The value is rounded to `decimals` places. A result that rounds to zero
/// carries no sign.
///
/// ```rust
/// use ztal_tales::generic::format_number;
///
/// assert_eq!(format_number(1234567.891, 2, ".", ","), "1,234,567.89");
/// assert_eq!(format_number(-0.001, 2, ",", "."), "0,00");
/// ```
pub fn format_number(value: f64, decimals: usize, decimal_point: &str, thousands_sep: &str) -> String {
	let fixed = format!("{:.*}", decimals, value.abs());
	let (integer, fraction) = match fixed.split_once('.') {
		Some((integer, fraction)) => (integer, Some(fraction)),
		None => (fixed.as_str(), None),
	};

	let mut out = String::with_capacity(fixed.len() + integer.len() / 3 * thousands_sep.len() + 1);
	let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
	if value.is_sign_negative() && !is_zero {
		out.push('-');
	}
	for (i, digit) in integer.chars().enumerate() {
		if i > 0 && (integer.len() - i) % 3 == 0 {
			out.push_str(thousands_sep);
		}
		out.push(digit);
	}
	if let Some(fraction) = fraction {
		out.push_str(decimal_point);
		out.push_str(fraction);
	}
	out
}

/// Where a currency symbol goes relative to the amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolPosition {
	/// `$1.00`
	#[default]
	Before,
	/// `1.00 €`
	After,
}

impl FromStr for SymbolPosition {
	type Err = std::convert::Infallible;

	/// `after` (any case) places the symbol after the amount; anything else
	/// before it
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Ok(if s.eq_ignore_ascii_case("after") {
			Self::After
		} else {
			Self::Before
		})
	}
}

/// Formats an amount of money
///
/// A negative sign precedes a leading symbol: `-$5.00`.
pub fn format_currency(
	value: f64,
	symbol: &str,
	position: SymbolPosition,
	decimals: usize,
	decimal_point: &str,
	thousands_sep: &str,
) -> String {
	let amount = format_number(value, decimals, decimal_point, thousands_sep);
	match position {
		SymbolPosition::After => format!("{amount} {symbol}"),
		SymbolPosition::Before => match amount.strip_prefix('-') {
			Some(digits) => format!("-{symbol}{digits}"),
			None => format!("{symbol}{amount}"),
		},
	}
}

/// Numeric value of a filter input; `null` and blank strings count as zero
fn numeric_value(filter: &str, value: &Value) -> TeraResult<f64> {
	match value {
		Value::Null => Ok(0.0),
		Value::String(s) if s.trim().is_empty() => Ok(0.0),
		other => as_number(other)
			.ok_or_else(|| tera::Error::msg(format!("{filter} filter requires a number"))),
	}
}

fn usize_arg(args: &HashMap<String, Value>, name: &str, default: usize) -> usize {
	args.get(name)
		.and_then(Value::as_u64)
		.and_then(|n| usize::try_from(n).ok())
		.unwrap_or(default)
}

fn str_arg_or<'a>(args: &'a HashMap<String, Value>, name: &str, default: &'a str) -> &'a str {
	args.get(name).and_then(Value::as_str).unwrap_or(default)
}

fn string_arg<'a>(
	filter: &str,
	args: &'a HashMap<String, Value>,
	name: &str,
) -> TeraResult<&'a str> {
	args.get(name).and_then(Value::as_str).ok_or_else(|| {
		tera::Error::msg(format!("{filter} filter requires a '{name}' string parameter"))
	})
}

fn string_value<'a>(filter: &str, value: &'a Value) -> TeraResult<&'a str> {
	value
		.as_str()
		.ok_or_else(|| tera::Error::msg(format!("{filter} filter requires a string")))
}

/// Changes the case of a string
///
/// # Example
/// ```tera
/// {{ "hello world"|uc(mode="word") }}
/// ```
/// Output: `Hello World`
pub fn uc_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let s = string_value("uc", value)?;
	let mode = args
		.get("mode")
		.and_then(Value::as_str)
		.and_then(|mode| mode.parse().ok())
		.unwrap_or_default();
	Ok(Value::String(uc(s, mode)))
}

/// Replaces every occurrence of `search` with `replace`
///
/// # Example
/// ```tera
/// {{ "a-b-c"|str_replace(search="-", replace="+") }}
/// ```
/// Output: `a+b+c`
pub fn str_replace_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let s = string_value("str_replace", value)?;
	let search = string_arg("str_replace", args, "search")?;
	let replacement = string_arg("str_replace", args, "replace")?;
	Ok(Value::String(str_replace(s, search, replacement)))
}

/// Parses a single-quoted JSON literal
///
/// # Example
/// ```tera
/// {% set person = "{'name':'robert'}"|from_json %}
/// ```
pub fn from_json_filter(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
	let s = string_value("from_json", value)?;
	Ok(from_json_string(s)?)
}

/// Name of the value's type
pub fn value_type_filter(value: &Value, _args: &HashMap<String, Value>) -> TeraResult<Value> {
	Ok(Value::String(value_type(value).to_string()))
}

/// Integer remainder
///
/// # Example
/// ```tera
/// {% if loop.index|modulo(by=2) == 0 %}even{% endif %}
/// ```
pub fn modulo_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let a = value
		.as_i64()
		.ok_or_else(|| tera::Error::msg("modulo filter requires an integer"))?;
	let b = args
		.get("by")
		.and_then(Value::as_i64)
		.ok_or_else(|| tera::Error::msg("modulo filter requires a 'by' integer parameter"))?;
	Ok(Value::from(modulo(a, b)?))
}

/// Yields `then` when the value is truthy, `otherwise` (default `null`) if not
///
/// # Example
/// ```tera
/// <li class="{{ item.active|if_true(then='active') }}">
/// ```
pub fn if_true_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let then = args
		.get("then")
		.cloned()
		.ok_or_else(|| tera::Error::msg("if_true filter requires a 'then' parameter"))?;
	if is_true(value) {
		Ok(then)
	} else {
		Ok(args.get("otherwise").cloned().unwrap_or(Value::Null))
	}
}

/// Formats a date string
///
/// # Example
/// ```tera
/// {{ "2022-01-30"|date_format(format="%d/%m/%Y") }}
/// ```
/// Output: `30/01/2022`
pub fn date_format_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let s = string_value("date_format", value)?;
	let format = string_arg("date_format", args, "format")?;
	Ok(Value::String(format_date(s, format)?))
}

/// Formats a number
///
/// Parameters `decimals` (default `0`), `decimal_point` (default `.`) and
/// `thousands_sep` (default `,`).
///
/// # Example
/// ```tera
/// {{ total|number_format(decimals=2) }}
/// ```
pub fn number_format_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let number = numeric_value("number_format", value)?;
	Ok(Value::String(format_number(
		number,
		usize_arg(args, "decimals", 0),
		str_arg_or(args, "decimal_point", "."),
		str_arg_or(args, "thousands_sep", ","),
	)))
}

/// Formats an amount of money
///
/// Requires `symbol`. Optional `position` (`before` or `after`), `decimals`
/// (default `2`), `decimal_point` and `thousands_sep`.
///
/// # Example
/// ```tera
/// {{ price|currency(symbol="€", position="after", decimal_point=",", thousands_sep=".") }}
/// ```
pub fn currency_filter(value: &Value, args: &HashMap<String, Value>) -> TeraResult<Value> {
	let number = numeric_value("currency", value)?;
	let symbol = string_arg("currency", args, "symbol")?;
	let position = args
		.get("position")
		.and_then(Value::as_str)
		.and_then(|position| position.parse().ok())
		.unwrap_or_default();
	Ok(Value::String(format_currency(
		number,
		symbol,
		position,
		usize_arg(args, "decimals", 2),
		str_arg_or(args, "decimal_point", "."),
		str_arg_or(args, "thousands_sep", ","),
	)))
}

/// Loose equality tester
///
/// # Example
/// ```tera
/// {% if count is equal(1) %}
/// ```
pub fn equal_tester(value: Option<&Value>, args: &[Value]) -> TeraResult<bool> {
	let other = args
		.first()
		.ok_or_else(|| tera::Error::msg("equal tester requires one argument"))?;
	Ok(equal(value.unwrap_or(&Value::Null), other))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("first", "hello big world", "Hello big world")]
	#[case("word", "hello big  world", "Hello Big  World")]
	#[case("all", "hello", "HELLO")]
	#[case("none", "HeLLo", "hello")]
	#[case("shout", "hello", "Hello")]
	fn test_uc_modes(#[case] mode: &str, #[case] input: &str, #[case] expected: &str) {
		assert_eq!(uc(input, mode.parse().unwrap()), expected);
	}

	#[test]
	fn test_uc_empty() {
		assert_eq!(uc("", CaseMode::First), "");
	}

	#[test]
	fn test_str_replace_empty_search() {
		assert_eq!(str_replace("abc", "", "x"), "abc");
		assert_eq!(str_replace("a.b.c", ".", "::"), "a::b::c");
	}

	#[test]
	fn test_from_json_string_escapes_double_quotes() {
		let value = from_json_string("['say \"hi\"']").unwrap();
		assert_eq!(value, json!(["say \"hi\""]));
	}

	#[test]
	fn test_from_json_string_rejects_garbage() {
		assert!(matches!(
			from_json_string("{'a':"),
			Err(TalesError::Json(_))
		));
	}

	#[rstest]
	#[case(json!(null), "null")]
	#[case(json!(true), "boolean")]
	#[case(json!(3), "integer")]
	#[case(json!(3.5), "double")]
	#[case(json!("x"), "string")]
	#[case(json!([1]), "array")]
	#[case(json!({"a": 1}), "object")]
	fn test_value_type(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(value_type(&value), expected);
	}

	#[test]
	fn test_modulo() {
		assert_eq!(modulo(7, 3).unwrap(), 1);
		assert_eq!(modulo(-7, 3).unwrap(), -1);
		assert_eq!(modulo(i64::MIN, -1).unwrap(), 0);
		assert!(matches!(modulo(1, 0), Err(TalesError::DivisionByZero)));
	}

	#[rstest]
	#[case(json!(1), json!(1.0), true)]
	#[case(json!("1"), json!(1), true)]
	#[case(json!("a"), json!("a"), true)]
	#[case(json!("a"), json!(0), false)]
	#[case(json!([1, 2]), json!([1, 2]), true)]
	fn test_equal(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
		assert_eq!(equal(&a, &b), expected);
	}

	#[rstest]
	#[case(json!(null), false)]
	#[case(json!(0), false)]
	#[case(json!(0.0), false)]
	#[case(json!("0"), false)]
	#[case(json!(""), false)]
	#[case(json!([]), false)]
	#[case(json!({}), false)]
	#[case(json!("false"), true)]
	#[case(json!(-1), true)]
	fn test_is_true(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_true(&value), expected);
	}

	#[test]
	fn test_format_date() {
		assert_eq!(format_date("2022-01-30", "%d/%m/%Y").unwrap(), "30/01/2022");
		assert_eq!(
			format_date("2022-01-30T14:05:00Z", "%H:%M").unwrap(),
			"14:05"
		);
		assert!(format_date("2022-01-30", "%Q").is_err());
		assert!(matches!(
			format_date("yesterday", "%Y"),
			Err(TalesError::DateParse { role: "value", .. })
		));
	}

	#[test]
	fn test_if_true_filter() {
		let mut args = HashMap::new();
		args.insert("then".to_string(), json!("active"));
		assert_eq!(if_true_filter(&json!(1), &args).unwrap(), json!("active"));
		assert_eq!(if_true_filter(&json!(0), &args).unwrap(), Value::Null);
		args.insert("otherwise".to_string(), json!("idle"));
		assert_eq!(if_true_filter(&json!(""), &args).unwrap(), json!("idle"));
	}

	#[test]
	fn test_modulo_filter_requires_divisor() {
		assert!(modulo_filter(&json!(4), &HashMap::new()).is_err());
	}

	#[rstest]
	#[case(0.0, 0, "0")]
	#[case(999.0, 0, "999")]
	#[case(1000.0, 0, "1,000")]
	#[case(1234567.891, 2, "1,234,567.89")]
	#[case(-1234.5, 1, "-1,234.5")]
	#[case(-0.001, 2, "0.00")]
	fn test_format_number(#[case] value: f64, #[case] decimals: usize, #[case] expected: &str) {
		assert_eq!(format_number(value, decimals, ".", ","), expected);
	}

	#[test]
	fn test_format_currency() {
		assert_eq!(
			format_currency(-5.0, "$", SymbolPosition::Before, 2, ".", ","),
			"-$5.00"
		);
		assert_eq!(
			format_currency(1234.5, "€", "after".parse().unwrap(), 2, ",", "."),
			"1.234,50 €"
		);
	}

	#[test]
	fn test_number_filters_treat_blank_as_zero() {
		let mut args = HashMap::new();
		assert_eq!(number_format_filter(&json!(""), &args).unwrap(), json!("0"));
		assert!(number_format_filter(&json!("abc"), &args).is_err());
		assert!(currency_filter(&json!(1), &args).is_err());

		args.insert("symbol".to_string(), json!("£"));
		assert_eq!(currency_filter(&Value::Null, &args).unwrap(), json!("£0.00"));
		assert_eq!(currency_filter(&json!("12.5"), &args).unwrap(), json!("£12.50"));
	}
}
