//! Request parameter access and URL encoding
//!
//! Page and sort state survives round-trips through URLs as
//! `{table_id}-page`, `{table_id}-sort` and `{table_id}-direction`
//! parameters. Anything string-keyed can supply them.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use url::form_urlencoded;

/// Ordered parameter map retained by a table
pub type Parameters = IndexMap<String, String>;

/// A string-keyed mapping of request parameters
pub trait ParameterSource {
	/// Returns the raw value stored under `name`
	fn parameter(&self, name: &str) -> Option<&str>;

	/// Iterates every parameter as `(name, value)` pairs
	fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;
}

impl ParameterSource for HashMap<String, String> {
	fn parameter(&self, name: &str) -> Option<&str> {
		self.get(name).map(String::as_str)
	}

	fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
		Box::new(self.iter().map(|(k, v)| (k.as_str(), v.as_str())))
	}
}

impl ParameterSource for BTreeMap<String, String> {
	fn parameter(&self, name: &str) -> Option<&str> {
		self.get(name).map(String::as_str)
	}

	fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
		Box::new(self.iter().map(|(k, v)| (k.as_str(), v.as_str())))
	}
}

impl ParameterSource for IndexMap<String, String> {
	fn parameter(&self, name: &str) -> Option<&str> {
		self.get(name).map(String::as_str)
	}

	fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
		Box::new(self.iter().map(|(k, v)| (k.as_str(), v.as_str())))
	}
}

impl ParameterSource for [(String, String)] {
	fn parameter(&self, name: &str) -> Option<&str> {
		self.iter()
			.rev()
			.find(|(k, _)| k == name)
			.map(|(_, v)| v.as_str())
	}

	fn pairs(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
		Box::new(self.iter().map(|(k, v)| (k.as_str(), v.as_str())))
	}
}

/// Parses a page number received from a URL
///
/// Returns `None` for anything that is not an optionally signed integer.
pub fn parse_page_number(raw: &str) -> Option<i64> {
	raw.trim().parse().ok()
}

/// URL-encodes a single path or query component
///
/// Spaces become `+`, as in form encoding.
pub fn encode_component(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Renders parameters as `/name/value` path segments
pub fn path_segments<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	pairs
		.into_iter()
		.map(|(name, value)| format!("/{}/{}", encode_component(name), encode_component(value)))
		.collect()
}

/// Renders parameters as an `application/x-www-form-urlencoded` query string
pub fn query_string<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	form_urlencoded::Serializer::new(String::new())
		.extend_pairs(pairs)
		.finish()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("3", Some(3))]
	#[case(" -2 ", Some(-2))]
	#[case("three", None)]
	#[case("", None)]
	fn test_parse_page_number(#[case] raw: &str, #[case] expected: Option<i64>) {
		assert_eq!(parse_page_number(raw), expected);
	}

	#[test]
	fn test_path_segments_encode_names_and_values() {
		let rendered = path_segments([("q", "a b"), ("x/y", "1&2")]);
		assert_eq!(rendered, "/q/a+b/x%2Fy/1%262");
	}

	#[test]
	fn test_query_string() {
		assert_eq!(query_string([("q", "a b"), ("n", "1")]), "q=a+b&n=1");
	}

	#[test]
	fn test_slice_source_last_value_wins() {
		let pairs = vec![
			("page".to_string(), "1".to_string()),
			("page".to_string(), "2".to_string()),
		];
		assert_eq!(pairs.as_slice().parameter("page"), Some("2"));
	}
}
