//! Columns over typed (object) rows

use std::cmp::Ordering;
use std::fmt::{self, Debug};

use serde_json::Value;

use super::base::{Column, SortDirection};
use crate::error::Result;
use crate::source::DataSource;

type Accessor<R> = Box<dyn Fn(&R) -> Value>;
type Comparator<R> = Box<dyn Fn(&R, &R) -> Ordering>;

/// A column reading its value through an accessor on typed rows
///
/// Ordering is delegated to a two-argument comparator, the equivalent of
/// calling `row.compare(other)` on each element. A column without a
/// comparator is never sortable.
///
/// # Example
///
/// ```rust
/// use ztal_tables::column::{Column, ObjectColumn};
///
/// struct Person {
///     age: u32,
/// }
///
/// let column = ObjectColumn::new("age", "age", |p: &Person| p.age)
///     .sort_with("by_age", |a: &Person, b: &Person| a.age.cmp(&b.age));
/// assert!(column.is_sortable());
/// assert_eq!(column.comparator_name(), Some("by_age"));
/// ```
pub struct ObjectColumn<R> {
	key: String,
	accessor: String,
	header: String,
	comparator_name: Option<String>,
	display: Accessor<R>,
	comparator: Option<Comparator<R>>,
	sortable: bool,
	direction: SortDirection,
}

impl<R> ObjectColumn<R> {
	/// Creates a column displaying the result of `display`
	///
	/// `accessor` names the accessor for diagnostics and column details.
	pub fn new<F, V>(key: impl Into<String>, accessor: impl Into<String>, display: F) -> Self
	where
		F: Fn(&R) -> V + 'static,
		V: Into<Value>,
	{
		let key = key.into();
		Self {
			header: key.clone(),
			key,
			accessor: accessor.into(),
			comparator_name: None,
			display: Box::new(move |row: &R| -> Value { display(row).into() }),
			comparator: None,
			sortable: false,
			direction: SortDirection::Ascending,
		}
	}

	/// Registers the named comparator and makes the column sortable
	pub fn sort_with<C>(mut self, name: impl Into<String>, comparator: C) -> Self
	where
		C: Fn(&R, &R) -> Ordering + 'static,
	{
		self.comparator_name = Some(name.into());
		self.comparator = Some(Box::new(comparator));
		self.sortable = true;
		self
	}

	/// Sets whether this column is sortable
	///
	/// Has no effect until a comparator is registered.
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

	/// Name of the registered comparator
	pub fn comparator_name(&self) -> Option<&str> {
		self.comparator_name.as_deref()
	}
}

impl<R> Debug for ObjectColumn<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectColumn")
			.field("key", &self.key)
			.field("accessor", &self.accessor)
			.field("comparator", &self.comparator_name)
			.field("sortable", &self.sortable)
			.field("direction", &self.direction)
			.finish_non_exhaustive()
	}
}

impl<R> Column for ObjectColumn<R> {
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
		self.sortable && self.comparator.is_some()
	}

	fn sort_direction(&self) -> SortDirection {
		self.direction
	}

	fn set_sort_direction(&mut self, direction: SortDirection) {
		self.direction = direction;
	}

	fn value(&self, row: &R) -> Value {
		(self.display)(row)
	}

	fn sort(&self, source: &mut DataSource<R>) -> Result<()> {
		let Some(comparator) = self.comparator.as_ref() else {
			return Ok(());
		};
		let direction = self.direction;
		source.sort_by(|a, b| direction.apply(comparator(a, b)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[derive(Debug)]
	struct Model {
		age: u32,
		height: f64,
	}

	fn by_height(a: &Model, b: &Model) -> Ordering {
		a.height.partial_cmp(&b.height).unwrap_or(Ordering::Equal)
	}

	fn models() -> DataSource<Model> {
		vec![
			Model { age: 30, height: 1.8 },
			Model { age: 20, height: 1.6 },
			Model { age: 40, height: 1.7 },
		]
		.into()
	}

	#[test]
	fn test_object_column_display_value() {
		let column = ObjectColumn::new("height", "height", |m: &Model| m.height);
		assert_eq!(column.value(&Model { age: 1, height: 1.5 }), Value::from(1.5));
		assert!(!column.is_sortable());
	}

	#[test]
	fn test_object_column_sort_descending_inverts_comparator() {
		let column = ObjectColumn::new("height", "height", |m: &Model| m.height)
			.sort_with("by_height", by_height)
			.direction(SortDirection::Descending);
		let mut source = models();
		column.sort(&mut source).unwrap();
		let ages: Vec<u32> = source.iter().map(|m| m.age).collect();
		assert_eq!(ages, vec![30, 40, 20]);
	}

	#[test]
	fn test_object_column_without_comparator_is_noop() {
		let column = ObjectColumn::new("age", "age", |m: &Model| m.age).sortable(true);
		let mut source = models();
		column.sort(&mut source).unwrap();
		let ages: Vec<u32> = source.iter().map(|m| m.age).collect();
		assert_eq!(ages, vec![30, 20, 40]);
		assert!(!column.is_sortable());
	}
}
