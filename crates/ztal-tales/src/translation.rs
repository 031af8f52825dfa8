//! Plural key selection

use serde::{Deserialize, Serialize};

/// Candidate translation keys for a counted phrase
///
/// ```rust
/// use ztal_tales::translation::PluralKeys;
///
/// let keys = PluralKeys::new(["item.one", "item.other"], 3);
/// assert_eq!(keys.select(), Some("item.other"));
/// assert_eq!(keys.select_for(1), Some("item.one"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralKeys {
	/// Singular key first, then plural forms
	#[serde(alias = "pluralKeys")]
	pub keys: Vec<String>,
	/// The counted quantity
	pub count: i64,
}

impl PluralKeys {
	/// Creates a key set for `count`
	pub fn new<I, S>(keys: I, count: i64) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			keys: keys.into_iter().map(Into::into).collect(),
			count,
		}
	}

	/// Key for the stored count
	pub fn select(&self) -> Option<&str> {
		self.select_for(self.count)
	}

	/// Key for `count`
	///
	/// `1` picks the singular key. With more than two keys a count that
	/// indexes one of them picks that key; anything else picks the last.
	pub fn select_for(&self, count: i64) -> Option<&str> {
		if count == 1 {
			return self.keys.first().map(String::as_str);
		}
		let indexed = usize::try_from(count)
			.ok()
			.filter(|_| self.keys.len() > 2)
			.and_then(|index| self.keys.get(index));
		indexed.or(self.keys.last()).map(String::as_str)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, Some("other"))]
	#[case(1, Some("one"))]
	#[case(2, Some("other"))]
	#[case(-4, Some("other"))]
	fn test_two_forms(#[case] count: i64, #[case] expected: Option<&str>) {
		let keys = PluralKeys::new(["one", "other"], count);
		assert_eq!(keys.select(), expected);
	}

	#[test]
	fn test_extra_forms_index_by_count() {
		let keys = PluralKeys::new(["zero", "one", "two", "many"], 0);
		assert_eq!(keys.select_for(2), Some("two"));
		assert_eq!(keys.select_for(9), Some("many"));
		assert_eq!(keys.select_for(1), Some("zero"));
	}

	#[test]
	fn test_no_keys() {
		assert_eq!(PluralKeys::new(Vec::<String>::new(), 2).select(), None);
	}

	#[test]
	fn test_deserialize_camel_case_field_names() {
		let keys: PluralKeys =
			serde_json::from_str(r#"{"pluralKeys": ["a", "b"], "count": 1}"#).unwrap();
		assert_eq!(keys.select(), Some("a"));
	}
}
