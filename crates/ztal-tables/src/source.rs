//! Row collections backing a table
//!
//! A table reads its rows from a [`DataSource`], which is either a plain
//! in-memory vector or a boxed [`RecordSource`] that manages its own storage
//! (lazy or deferred collections). The paginator and the sortable columns only
//! ever talk to the closed [`DataSource`] enum, so the slicing and sorting
//! primitives are chosen by variant rather than by inspecting the rows.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Map, Value};

use crate::error::{Result, TableError};

/// Indexed collection that manages its own storage
///
/// Implementors must expose zero-based, contiguous indices bounded by
/// [`RecordSource::len`]. Slicing and sorting are optional capabilities: the
/// default implementations report them as unsupported.
pub trait RecordSource<R> {
	/// Number of rows currently held by the source
	fn len(&self) -> usize;

	/// Returns `true` when the source holds no rows
	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the row stored at `index`
	fn get(&self, index: usize) -> Option<&R>;

	/// Restricts the source to `count` rows starting at `start`
	///
	/// The window must be truncated at the end of the available rows.
	fn slice(&mut self, start: usize, count: usize) -> Result<()> {
		let _ = (start, count);
		Err(TableError::SliceUnsupported)
	}

	/// Reorders the rows with the given comparator
	///
	/// Implementations should keep the sort stable.
	fn sort_by(&mut self, compare: &dyn Fn(&R, &R) -> Ordering) -> Result<()> {
		let _ = compare;
		Err(TableError::SortUnsupported)
	}
}

/// The row collection backing a table
pub enum DataSource<R> {
	/// Contiguous in-memory rows
	ArrayBacked(Vec<R>),
	/// A collection exposing indexed access and a count
	CapabilityBacked(Box<dyn RecordSource<R>>),
}

impl<R> DataSource<R> {
	/// Wraps a custom collection
	pub fn capability(source: impl RecordSource<R> + 'static) -> Self {
		Self::CapabilityBacked(Box::new(source))
	}

	/// Number of rows in the source
	pub fn len(&self) -> usize {
		match self {
			Self::ArrayBacked(rows) => rows.len(),
			Self::CapabilityBacked(source) => source.len(),
		}
	}

	/// Returns `true` when there are no rows
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns the row at `index`
	pub fn get(&self, index: usize) -> Option<&R> {
		match self {
			Self::ArrayBacked(rows) => rows.get(index),
			Self::CapabilityBacked(source) => source.get(index),
		}
	}

	/// Iterates the rows in index order
	pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
		(0..self.len()).map_while(move |index| self.get(index))
	}

	/// Restricts the source in place to the window `[start, start + count)`
	pub(crate) fn slice(&mut self, start: usize, count: usize) -> Result<()> {
		match self {
			Self::ArrayBacked(rows) => {
				let start = start.min(rows.len());
				let end = start.saturating_add(count).min(rows.len());
				rows.truncate(end);
				rows.drain(..start);
				Ok(())
			}
			Self::CapabilityBacked(source) => source.slice(start, count),
		}
	}

	/// Stable in-place sort
	pub(crate) fn sort_by<F>(&mut self, compare: F) -> Result<()>
	where
		F: Fn(&R, &R) -> Ordering,
	{
		match self {
			Self::ArrayBacked(rows) => {
				rows.sort_by(|a, b| compare(a, b));
				Ok(())
			}
			Self::CapabilityBacked(source) => source.sort_by(&compare),
		}
	}
}

impl DataSource<Map<String, Value>> {
	/// Builds an array-backed source from a JSON array of objects
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidDataSource`] when `value` is not an array
	/// or when one of its elements is not an object.
	///
	/// # Example
	///
	/// ```rust
	/// use serde_json::json;
	/// use ztal_tables::DataSource;
	///
	/// let source = DataSource::from_json(json!([{"id": 1}, {"id": 2}])).unwrap();
	/// assert_eq!(source.len(), 2);
	///
	/// assert!(DataSource::from_json(json!("rows")).is_err());
	/// ```
	pub fn from_json(value: Value) -> Result<Self> {
		let Value::Array(items) = value else {
			return Err(TableError::InvalidDataSource(format!(
				"expected an array of records, got {}",
				json_type_name(&value)
			)));
		};

		items
			.into_iter()
			.enumerate()
			.map(|(index, item)| match item {
				Value::Object(record) => Ok(record),
				other => Err(TableError::InvalidDataSource(format!(
					"row {} is {}, expected an object",
					index,
					json_type_name(&other)
				))),
			})
			.collect::<Result<Vec<_>>>()
			.map(Self::ArrayBacked)
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

impl<R> Default for DataSource<R> {
	fn default() -> Self {
		Self::ArrayBacked(Vec::new())
	}
}

impl<R> From<Vec<R>> for DataSource<R> {
	fn from(rows: Vec<R>) -> Self {
		Self::ArrayBacked(rows)
	}
}

impl<R> fmt::Debug for DataSource<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ArrayBacked(rows) => f.debug_tuple("ArrayBacked").field(&rows.len()).finish(),
			Self::CapabilityBacked(source) => f
				.debug_tuple("CapabilityBacked")
				.field(&source.len())
				.finish(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	struct Countdown {
		rows: Vec<u32>,
	}

	impl RecordSource<u32> for Countdown {
		fn len(&self) -> usize {
			self.rows.len()
		}

		fn get(&self, index: usize) -> Option<&u32> {
			self.rows.get(index)
		}
	}

	#[test]
	fn test_array_slice_truncates_at_end() {
		let mut source = DataSource::from(vec![1, 2, 3, 4, 5]);
		source.slice(3, 10).unwrap();
		assert_eq!(source.iter().copied().collect::<Vec<_>>(), vec![4, 5]);
	}

	#[test]
	fn test_array_slice_past_end_is_empty() {
		let mut source = DataSource::from(vec![1, 2, 3]);
		source.slice(7, 2).unwrap();
		assert!(source.is_empty());
	}

	#[test]
	fn test_capability_without_slice_fails() {
		let mut source = DataSource::capability(Countdown {
			rows: vec![3, 2, 1],
		});
		let result = source.slice(0, 1);
		assert!(matches!(result, Err(TableError::SliceUnsupported)));
		assert_eq!(source.len(), 3);
	}

	#[test]
	fn test_capability_without_sort_fails() {
		let mut source = DataSource::capability(Countdown {
			rows: vec![3, 2, 1],
		});
		let result = source.sort_by(|a, b| a.cmp(b));
		assert!(matches!(result, Err(TableError::SortUnsupported)));
	}

	#[test]
	fn test_from_json_rejects_scalars_and_non_object_rows() {
		assert!(matches!(
			DataSource::from_json(json!(42)),
			Err(TableError::InvalidDataSource(_))
		));
		let err = DataSource::from_json(json!([{"a": 1}, "b"])).unwrap_err();
		assert!(err.to_string().contains("row 1"));
	}
}
