//! Field access for associative rows
//!
//! Array-backed columns address their rows by field name. Any map-like row
//! type can take part by implementing [`Record`].

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// A row whose fields can be looked up by name
pub trait Record {
	/// Returns the value stored under `name`, if any
	fn field(&self, name: &str) -> Option<Value>;
}

impl Record for Map<String, Value> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).cloned()
	}
}

impl Record for Value {
	fn field(&self, name: &str) -> Option<Value> {
		self.as_object().and_then(|record| record.get(name)).cloned()
	}
}

impl<V: Serialize> Record for HashMap<String, V> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).and_then(|value| serde_json::to_value(value).ok())
	}
}

impl<V: Serialize> Record for BTreeMap<String, V> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).and_then(|value| serde_json::to_value(value).ok())
	}
}

impl<V: Serialize> Record for IndexMap<String, V> {
	fn field(&self, name: &str) -> Option<Value> {
		self.get(name).and_then(|value| serde_json::to_value(value).ok())
	}
}

fn type_rank(value: Option<&Value>) -> u8 {
	match value {
		None | Some(Value::Null) => 0,
		Some(Value::Bool(_)) => 1,
		Some(Value::Number(_)) => 2,
		Some(Value::String(_)) => 3,
		Some(Value::Array(_)) => 4,
		Some(Value::Object(_)) => 5,
	}
}

/// Total order over JSON values used when sorting record rows
///
/// Values of different kinds order as
/// missing/null < bool < number < string < array < object.
/// Numbers compare numerically, strings lexicographically and arrays
/// element by element.
///
/// # Example
///
/// ```rust
/// use std::cmp::Ordering;
/// use serde_json::json;
/// use ztal_tables::record::compare_values;
///
/// assert_eq!(compare_values(Some(&json!(2)), Some(&json!(10))), Ordering::Less);
/// assert_eq!(compare_values(None, Some(&json!("a"))), Ordering::Less);
/// ```
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	match (a, b) {
		(Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
		(Some(Value::Number(x)), Some(Value::Number(y))) => {
			match (x.as_i64(), y.as_i64()) {
				(Some(x), Some(y)) => x.cmp(&y),
				_ => {
					let x = x.as_f64().unwrap_or(f64::NAN);
					let y = y.as_f64().unwrap_or(f64::NAN);
					x.partial_cmp(&y).unwrap_or(Ordering::Equal)
				}
			}
		}
		(Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
		(Some(Value::Array(x)), Some(Value::Array(y))) => x
			.iter()
			.zip(y.iter())
			.map(|(x, y)| compare_values(Some(x), Some(y)))
			.find(|ordering| ordering.is_ne())
			.unwrap_or_else(|| x.len().cmp(&y.len())),
		(Some(Value::Object(x)), Some(Value::Object(y))) => x.len().cmp(&y.len()),
		_ => type_rank(a).cmp(&type_rank(b)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_map_record_field() {
		let mut row = HashMap::new();
		row.insert("age".to_string(), 42);
		assert_eq!(row.field("age"), Some(json!(42)));
		assert_eq!(row.field("height"), None);
	}

	#[test]
	fn test_value_record_only_reads_objects() {
		assert_eq!(json!({"a": "x"}).field("a"), Some(json!("x")));
		assert_eq!(json!(["a"]).field("a"), None);
	}

	#[test]
	fn test_mixed_kinds_order() {
		let null = json!(null);
		let flag = json!(true);
		let number = json!(1.5);
		let text = json!("a");
		assert_eq!(compare_values(Some(&null), Some(&flag)), Ordering::Less);
		assert_eq!(compare_values(Some(&number), Some(&flag)), Ordering::Greater);
		assert_eq!(compare_values(Some(&text), Some(&number)), Ordering::Greater);
	}

	#[test]
	fn test_float_and_integer_compare_numerically() {
		assert_eq!(
			compare_values(Some(&json!(2)), Some(&json!(1.5))),
			Ordering::Greater
		);
	}

	#[test]
	fn test_arrays_compare_elementwise() {
		assert_eq!(
			compare_values(Some(&json!([1, 2])), Some(&json!([1, 3]))),
			Ordering::Less
		);
		assert_eq!(
			compare_values(Some(&json!([1, 2])), Some(&json!([1]))),
			Ordering::Greater
		);
	}
}
