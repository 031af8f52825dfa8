//! Table orchestration: columns, parameters, sort-then-paginate

use indexmap::IndexMap;

use crate::column::Column;
use crate::error::Result;
use crate::paginator::Paginator;
use crate::params::{self, ParameterSource, Parameters};
use crate::row::{ColumnMap, Row, Rows};
use crate::source::DataSource;
use crate::view::{ColumnDetails, TableView};

/// Parameters consumed by routing, never round-tripped
const ROUTING_PARAMETERS: [&str; 3] = ["module", "controller", "action"];

/// An HTML table over a data source
///
/// Columns are registered once during setup. The data source may be replaced
/// any number of times; each replacement is sorted by the active sort column
/// and then sliced by the paginator, in that order, so that a page shows a
/// window of the globally sorted rows.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use ztal_tables::{DataSource, Paginator, RecordColumn, Table};
///
/// let mut table = Table::new();
/// table.set_id("people");
/// table.append_column(RecordColumn::new("name", "name"));
/// table.append_column(RecordColumn::new("age", "age"));
/// table.set_sort_column("age");
///
/// let mut paginator = Paginator::new();
/// paginator.set_rows_per_page(2);
/// table.set_paginator(paginator);
///
/// let rows = json!([
///     {"name": "Carol", "age": 41},
///     {"name": "Alice", "age": 23},
///     {"name": "Bob", "age": 35},
/// ]);
/// table.set_data_source(DataSource::from_json(rows).unwrap(), false).unwrap();
///
/// let names: Vec<_> = table.rows().map(|row| row.cell("name").unwrap()).collect();
/// assert_eq!(names, vec![json!("Alice"), json!("Bob")]);
/// ```
pub struct Table<R> {
	id: String,
	columns: ColumnMap<R>,
	data_source: DataSource<R>,
	parameters: Parameters,
	sort_column_key: Option<String>,
	current_row_index: usize,
	base_uri: String,
	paginator: Option<Paginator>,
}

impl<R> Default for Table<R> {
	fn default() -> Self {
		Self {
			id: "table".to_string(),
			columns: IndexMap::new(),
			data_source: DataSource::default(),
			parameters: IndexMap::new(),
			sort_column_key: None,
			current_row_index: 0,
			base_uri: "/".to_string(),
			paginator: None,
		}
	}
}

impl<R> Table<R> {
	/// Creates an empty table with id `table` and base URI `/`
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a table from request parameters
	///
	/// `configure` registers columns and sets table defaults (id, base URI,
	/// sort column, paginator). The parameters are applied afterwards and
	/// override those defaults, see [`Table::apply_parameters`].
	pub fn from_parameters<P, F>(parameters: &P, configure: F) -> Self
	where
		P: ParameterSource + ?Sized,
		F: FnOnce(&mut Self),
	{
		let mut table = Self::new();
		configure(&mut table);
		table.apply_parameters(parameters);
		table
	}

	/// Derives sort state, base URI and page from request parameters
	///
	/// - `{id}-sort` selects the sort column when it names a sortable column
	/// - `{id}-direction` sets that column's direction, only alongside `{id}-sort`
	/// - `module`, `controller` and `action` together form the base URI
	/// - `{id}-page` is forwarded to the paginator
	///
	/// Every other parameter is retained for generated links.
	pub fn apply_parameters<P>(&mut self, parameters: &P)
	where
		P: ParameterSource + ?Sized,
	{
		if let Some(sort_key) = parameters.parameter(&self.sort_parameter()) {
			let direction = parameters
				.parameter(&self.direction_parameter())
				.and_then(|raw| raw.parse().ok());
			match self.columns.get_mut(sort_key) {
				Some(column) if column.is_sortable() => {
					if let Some(direction) = direction {
						column.set_sort_direction(direction);
					}
					self.sort_column_key = Some(sort_key.to_string());
				}
				_ => tracing::debug!(table = %self.id, column = sort_key, "ignoring sort parameter"),
			}
		}

		if let [Some(module), Some(controller), Some(action)] =
			ROUTING_PARAMETERS.map(|name| parameters.parameter(name))
		{
			self.base_uri = format!("/{module}/{controller}/{action}");
		}

		self.set_parameters(parameters);

		let prefix = format!("{}-", self.id);
		if let Some(paginator) = self.paginator.as_mut() {
			paginator.init_from_request_parameters(parameters, &prefix);
		}
	}

	/// Retains every non-reserved parameter for generated links
	///
	/// Reserved parameters are the routing triplet and this table's own
	/// page, sort and direction parameters.
	pub fn set_parameters<P>(&mut self, parameters: &P)
	where
		P: ParameterSource + ?Sized,
	{
		let reserved = self.reserved_parameters();
		for (name, value) in parameters.pairs() {
			if !reserved.iter().any(|key| key == name) {
				self.parameters.insert(name.to_string(), value.to_string());
			}
		}
	}

	/// Adds one parameter to the retained set
	pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.parameters.insert(name.into(), value.into());
	}

	/// Retained parameters in insertion order
	pub fn parameters(&self) -> &Parameters {
		&self.parameters
	}

	fn reserved_parameters(&self) -> Vec<String> {
		ROUTING_PARAMETERS
			.iter()
			.map(|name| name.to_string())
			.chain([
				self.page_parameter(),
				self.direction_parameter(),
				self.sort_parameter(),
			])
			.collect()
	}

	/// Name of the page parameter, `{id}-page`
	pub fn page_parameter(&self) -> String {
		format!("{}-page", self.id)
	}

	/// Name of the sort parameter, `{id}-sort`
	pub fn sort_parameter(&self) -> String {
		format!("{}-sort", self.id)
	}

	/// Name of the direction parameter, `{id}-direction`
	pub fn direction_parameter(&self) -> String {
		format!("{}-direction", self.id)
	}

	/// Retained parameters as URL-encoded `/name/value` segments
	pub fn url_params(&self) -> String {
		params::path_segments(self.parameter_pairs())
	}

	/// Retained parameters as a URL-encoded query string
	pub fn query_string(&self) -> String {
		params::query_string(self.parameter_pairs())
	}

	fn parameter_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
		self.parameters
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// URI of the action that handles the table
	pub fn base_uri(&self) -> &str {
		&self.base_uri
	}

	/// Sets the URI of the action that handles the table
	pub fn set_base_uri(&mut self, uri: impl Into<String>) {
		self.base_uri = uri.into();
	}

	/// The table id, used to namespace its URL parameters
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Sets the table id
	pub fn set_id(&mut self, id: impl Into<String>) {
		self.id = id.into();
	}

	/// Appends a column
	///
	/// Registering a key twice replaces the earlier column but keeps its
	/// display position.
	pub fn append_column<C>(&mut self, column: C)
	where
		C: Column<Row = R> + 'static,
	{
		let key = column.key().to_string();
		self.columns.insert(key, Box::new(column));
	}

	/// Number of registered columns
	pub fn column_count(&self) -> usize {
		self.columns.len()
	}

	/// The column registered under `key`
	pub fn column(&self, key: &str) -> Option<&dyn Column<Row = R>> {
		self.columns.get(key).map(|column| column.as_ref())
	}

	/// Key, sortability and direction of every column, in registration order
	///
	/// Non-sortable columns report a direction of `0`.
	pub fn column_details(&self) -> Vec<ColumnDetails> {
		self.columns
			.values()
			.map(|column| {
				let sortable = column.is_sortable();
				ColumnDetails {
					key: column.key().to_string(),
					header: column.header().to_string(),
					sortable,
					sort_direction: if sortable {
						column.sort_direction().as_i8()
					} else {
						0
					},
					is_sort_column: self.sort_column_key.as_deref() == Some(column.key()),
					sort_uri: self.sort_uri(column.key()),
				}
			})
			.collect()
	}

	/// The active sort column
	pub fn sort_column(&self) -> Option<&dyn Column<Row = R>> {
		self.sort_column_key
			.as_deref()
			.and_then(|key| self.column(key))
	}

	/// Key of the active sort column
	pub fn sort_column_key(&self) -> Option<&str> {
		self.sort_column_key.as_deref()
	}

	/// Selects the sort column
	///
	/// Unknown keys are ignored and the previous selection is kept; the
	/// return value tells whether the key was accepted.
	pub fn set_sort_column(&mut self, key: &str) -> bool {
		if self.columns.contains_key(key) {
			self.sort_column_key = Some(key.to_string());
			true
		} else {
			tracing::debug!(table = %self.id, column = key, "ignoring unknown sort column");
			false
		}
	}

	/// The pagination delegate
	pub fn paginator(&self) -> Option<&Paginator> {
		self.paginator.as_ref()
	}

	/// Mutable access to the pagination delegate
	pub fn paginator_mut(&mut self) -> Option<&mut Paginator> {
		self.paginator.as_mut()
	}

	/// Attaches a pagination delegate
	pub fn set_paginator(&mut self, paginator: Paginator) {
		self.paginator = Some(paginator);
	}

	/// Replaces the data source
	///
	/// Unless `already_prepared` is set, the rows are sorted by the active
	/// sort column (when it is sortable) and then sliced by the paginator.
	/// The source is consumed. When either step fails, the previous rows and
	/// paginator state are kept.
	pub fn set_data_source(&mut self, source: DataSource<R>, already_prepared: bool) -> Result<()> {
		let mut source = source;

		if !already_prepared {
			if let Some(column) = self.sort_column().filter(|column| column.is_sortable()) {
				column.sort(&mut source)?;
			}
			if let Some(current) = self.paginator.as_ref() {
				let mut paginator = current.clone();
				paginator.paginate(&mut source)?;
				self.paginator = Some(paginator);
			}
		}

		tracing::debug!(table = %self.id, rows = source.len(), "data source attached");
		self.data_source = source;
		self.current_row_index = 0;
		Ok(())
	}

	/// The current data source
	pub fn data_source(&self) -> &DataSource<R> {
		&self.data_source
	}

	/// Number of rows in the data source
	pub fn count(&self) -> usize {
		self.data_source.len()
	}

	/// Resets the row cursor to the first row
	pub fn rewind(&mut self) {
		self.current_row_index = 0;
	}

	/// Whether the row cursor points at a row
	pub fn valid(&self) -> bool {
		self.current_row_index < self.data_source.len()
	}

	/// Position of the row cursor
	pub fn key(&self) -> usize {
		self.current_row_index
	}

	/// The row under the cursor
	pub fn current(&self) -> Option<Row<'_, R>> {
		self.data_source
			.get(self.current_row_index)
			.map(|record| Row::new(self.current_row_index, record, &self.columns))
	}

	/// Moves the row cursor forward
	pub fn advance(&mut self) {
		self.current_row_index += 1;
	}

	/// Iterates every row of the data source
	pub fn rows(&self) -> Rows<'_, R> {
		Rows {
			records: Box::new(self.data_source.iter()),
			columns: &self.columns,
			next_index: 0,
		}
	}

	/// Link that sorts the table by `key`
	///
	/// Clicking the active sort column flips its direction. Returns `None`
	/// for unknown or non-sortable columns.
	pub fn sort_uri(&self, key: &str) -> Option<String> {
		let column = self.column(key).filter(|column| column.is_sortable())?;
		let direction = if self.sort_column_key.as_deref() == Some(key) {
			column.sort_direction().toggle()
		} else {
			column.sort_direction()
		};
		Some(format!(
			"{}/{}/{}/{}/{}{}",
			self.base_uri.trim_end_matches('/'),
			self.sort_parameter(),
			params::encode_component(key),
			self.direction_parameter(),
			direction,
			self.url_params()
		))
	}

	/// Link to `page`, keeping the current sort
	pub fn page_uri(&self, page: i64) -> String {
		let mut uri = format!(
			"{}/{}/{}",
			self.base_uri.trim_end_matches('/'),
			self.page_parameter(),
			page
		);
		if let Some(column) = self.sort_column() {
			uri.push_str(&format!(
				"/{}/{}/{}/{}",
				self.sort_parameter(),
				params::encode_component(column.key()),
				self.direction_parameter(),
				column.sort_direction()
			));
		}
		uri.push_str(&self.url_params());
		uri
	}

	/// Serializable snapshot of the displayed table
	pub fn view(&self) -> TableView {
		let paginator = self.paginator.as_ref().map(|paginator| {
			let mut view = paginator.view();
			view.previous_uri = view.previous.map(|page| self.page_uri(page));
			view.next_uri = view.next.map(|page| self.page_uri(page));
			for link in &mut view.pages {
				link.uri = Some(self.page_uri(link.index));
			}
			view
		});

		TableView {
			id: self.id.clone(),
			base_uri: self.base_uri.clone(),
			url_params: self.url_params(),
			sort_column: self.sort_column_key.clone(),
			columns: self.column_details(),
			rows: self.rows().map(|row| row.cells()).collect(),
			paginator,
		}
	}
}

impl<'a, R> IntoIterator for &'a Table<R> {
	type Item = Row<'a, R>;
	type IntoIter = Rows<'a, R>;

	fn into_iter(self) -> Self::IntoIter {
		self.rows()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::column::{RecordColumn, SortDirection};
	use serde_json::{Value, json};
	use std::collections::HashMap;

	fn sample_table() -> Table<Value> {
		let mut table = Table::new();
		table.set_id("t");
		table.append_column(RecordColumn::new("a", "a"));
		table.append_column(RecordColumn::new("b", "b").sortable(false));
		table
	}

	#[test]
	fn test_set_sort_column_ignores_unknown_key() {
		let mut table = sample_table();
		assert!(table.set_sort_column("a"));
		assert!(!table.set_sort_column("zzz"));
		assert_eq!(table.sort_column_key(), Some("a"));
	}

	#[test]
	fn test_duplicate_column_keeps_position() {
		let mut table = sample_table();
		table.append_column(RecordColumn::new("a", "other").label("Replaced"));
		let details = table.column_details();
		assert_eq!(table.column_count(), 2);
		assert_eq!(details[0].key, "a");
		assert_eq!(details[0].header, "Replaced");
		assert_eq!(table.column("a").unwrap().accessor(), "other");
	}

	#[test]
	fn test_sort_uri_toggles_active_column() {
		let mut table = sample_table();
		table.set_base_uri("/default/index/table");
		assert_eq!(
			table.sort_uri("a").unwrap(),
			"/default/index/table/t-sort/a/t-direction/asc"
		);
		table.set_sort_column("a");
		assert_eq!(
			table.sort_uri("a").unwrap(),
			"/default/index/table/t-sort/a/t-direction/desc"
		);
		assert!(table.sort_uri("b").is_none());
	}

	#[test]
	fn test_page_uri_keeps_sort_and_parameters() {
		let mut table = sample_table();
		table.set_sort_column("a");
		if let Some(column) = table.columns.get_mut("a") {
			column.set_sort_direction(SortDirection::Descending);
		}
		table.add_parameter("filter", "x y");
		assert_eq!(
			table.page_uri(2),
			"/t-page/2/t-sort/a/t-direction/desc/filter/x+y"
		);
	}

	#[test]
	fn test_cursor_walks_rows() {
		let mut table = sample_table();
		table
			.set_data_source(vec![json!({"a": 1}), json!({"a": 2})].into(), true)
			.unwrap();
		let mut seen = Vec::new();
		table.rewind();
		while table.valid() {
			let row = table.current().unwrap();
			seen.push((table.key(), row.cell("a").unwrap()));
			table.advance();
		}
		assert_eq!(seen, vec![(0, json!(1)), (1, json!(2))]);
		assert!(table.current().is_none());
		table.rewind();
		assert_eq!(table.key(), 0);
	}

	#[test]
	fn test_routing_parameters_need_all_three() {
		let mut params = HashMap::new();
		params.insert("module".to_string(), "admin".to_string());
		params.insert("controller".to_string(), "users".to_string());
		let table = Table::<Value>::from_parameters(&params, |_| {});
		assert_eq!(table.base_uri(), "/");
		assert!(table.parameters().is_empty());
	}
}
