//! Row adapter handed to renderers

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::column::Column;

pub(crate) type ColumnMap<R> = IndexMap<String, Box<dyn Column<Row = R>>>;

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
	/// Key of the column the cell belongs to
	pub key: String,
	/// Display value
	pub value: Value,
}

/// A view of one row through the table's columns
pub struct Row<'a, R> {
	index: usize,
	record: &'a R,
	columns: &'a ColumnMap<R>,
}

impl<'a, R> Row<'a, R> {
	pub(crate) fn new(index: usize, record: &'a R, columns: &'a ColumnMap<R>) -> Self {
		Self {
			index,
			record,
			columns,
		}
	}

	/// Zero-based position of the row within the displayed window
	pub fn index(&self) -> usize {
		self.index
	}

	/// The underlying row
	pub fn record(&self) -> &'a R {
		self.record
	}

	/// Display value of the column registered under `key`
	pub fn cell(&self, key: &str) -> Option<Value> {
		self.columns.get(key).map(|column| column.value(self.record))
	}

	/// Every cell in column registration order
	pub fn cells(&self) -> Vec<Cell> {
		self.columns
			.iter()
			.map(|(key, column)| Cell {
				key: key.clone(),
				value: column.value(self.record),
			})
			.collect()
	}
}

/// Iterator over the rows of a table
pub struct Rows<'a, R> {
	pub(crate) records: Box<dyn Iterator<Item = &'a R> + 'a>,
	pub(crate) columns: &'a ColumnMap<R>,
	pub(crate) next_index: usize,
}

impl<'a, R> Iterator for Rows<'a, R> {
	type Item = Row<'a, R>;

	fn next(&mut self) -> Option<Self::Item> {
		let record = self.records.next()?;
		let row = Row::new(self.next_index, record, self.columns);
		self.next_index += 1;
		Some(row)
	}
}
