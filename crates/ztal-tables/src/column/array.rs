//! Columns over associative (record) rows

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use serde_json::{Map, Value};

use super::base::{Column, SortDirection};
use crate::error::Result;
use crate::record::{Record, compare_values};
use crate::source::DataSource;

/// A column reading a named field from each record row
///
/// The display value is the field named by the accessor. Ordering uses the
/// sort field, which defaults to the accessor but may name any other field.
///
/// # Example
///
/// ```rust
/// use ztal_tables::column::{Column, RecordColumn};
///
/// let column: RecordColumn = RecordColumn::new("firstColumn", "col1").sort_field("col1_raw");
/// assert_eq!(column.key(), "firstColumn");
/// assert_eq!(column.accessor(), "col1");
/// assert!(column.is_sortable());
/// ```
pub struct RecordColumn<R = Map<String, Value>> {
	key: String,
	accessor: String,
	header: String,
	sort_field: String,
	sortable: bool,
	direction: SortDirection,
	_phantom: PhantomData<fn(&R)>,
}

impl<R> RecordColumn<R> {
	/// Creates a sortable column reading `accessor` from every row
	pub fn new(key: impl Into<String>, accessor: impl Into<String>) -> Self {
		let key = key.into();
		let accessor = accessor.into();
		Self {
			header: key.clone(),
			sort_field: accessor.clone(),
			key,
			accessor,
			sortable: true,
			direction: SortDirection::Ascending,
			_phantom: PhantomData,
		}
	}

	/// Sets the field used for ordering
	pub fn sort_field(mut self, field: impl Into<String>) -> Self {
		self.sort_field = field.into();
		self
	}

	/// Sets whether this column is sortable
	pub fn sortable(mut self, sortable: bool) -> Self {
		self.sortable = sortable;
		self
	}

	/// Sets the initial sort direction
	pub fn direction(mut self, direction: SortDirection) -> Self {
		self.direction = direction;
		self
	}

	/// Sets the header text
	pub fn label(mut self, header: impl Into<String>) -> Self {
		self.header = header.into();
		self
	}
}

impl<R> Debug for RecordColumn<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordColumn")
			.field("key", &self.key)
			.field("accessor", &self.accessor)
			.field("sort_field", &self.sort_field)
			.field("sortable", &self.sortable)
			.field("direction", &self.direction)
			.finish_non_exhaustive()
	}
}

impl<R: Record> Column for RecordColumn<R> {
	type Row = R;

	fn key(&self) -> &str {
		&self.key
	}

	fn accessor(&self) -> &str {
		&self.accessor
	}

	fn header(&self) -> &str {
		&self.header
	}

	fn is_sortable(&self) -> bool {
		self.sortable
	}

	fn sort_direction(&self) -> SortDirection {
		self.direction
	}

	fn set_sort_direction(&mut self, direction: SortDirection) {
		self.direction = direction;
	}

	fn value(&self, row: &R) -> Value {
		row.field(&self.accessor).unwrap_or(Value::Null)
	}

	fn sort(&self, source: &mut DataSource<R>) -> Result<()> {
		let field = self.sort_field.as_str();
		let direction = self.direction;
		source.sort_by(|a, b| {
			direction.apply(compare_values(
				a.field(field).as_ref(),
				b.field(field).as_ref(),
			))
		})
	}
}
