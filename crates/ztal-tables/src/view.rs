//! Serializable snapshots handed to template engines

use serde::Serialize;

use crate::paginator::PaginatorView;
use crate::row::Cell;

/// Header information for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDetails {
	/// Column key
	pub key: String,
	/// Header text
	pub header: String,
	/// Whether clicking the header sorts the table
	pub sortable: bool,
	/// `1` ascending, `-1` descending, `0` when not sortable
	pub sort_direction: i8,
	/// Whether the table is currently sorted by this column
	pub is_sort_column: bool,
	/// Link that sorts by this column
	pub sort_uri: Option<String>,
}

/// Everything a template needs to draw a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
	/// Table id
	pub id: String,
	/// URI of the handling action
	pub base_uri: String,
	/// Retained parameters as `/name/value` segments
	pub url_params: String,
	/// Key of the active sort column
	pub sort_column: Option<String>,
	/// Column headers in registration order
	pub columns: Vec<ColumnDetails>,
	/// Displayed rows, each a list of cells in column order
	pub rows: Vec<Vec<Cell>>,
	/// Pagination state, when the table is paginated
	pub paginator: Option<PaginatorView>,
}
