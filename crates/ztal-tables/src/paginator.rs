//! Pagination of table data sources
//!
//! A [`Paginator`] measures a data source, clamps the requested page to the
//! pages that actually exist and slices the source down to that page window.
//!
//! Page indices are numbered from a configurable first page index (commonly
//! `0` or `1`). The labels produced by [`Paginator::pages`] are always
//! 1-based regardless of the numbering base.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{ParameterSource, parse_page_number};
use crate::source::DataSource;

/// Sentinel returned by [`Paginator::previous_page`] and
/// [`Paginator::next_page`] when no adjacent page exists
pub const NO_PAGE: i64 = -1;

/// Construction options for a [`Paginator`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatorOptions {
	/// Number of rows on each page
	#[serde(alias = "rowsPerPage")]
	pub rows_per_page: Option<i64>,
	/// Index of the first page
	#[serde(alias = "firstPage")]
	pub first_page: Option<i64>,
	/// Page to display
	#[serde(alias = "currentPage")]
	pub current_page: Option<i64>,
}

/// One entry of the page list handed to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
	/// Page index, offset by the first page index
	pub index: i64,
	/// 1-based display label
	pub label: usize,
	/// Whether this is the page being displayed
	pub is_current: bool,
	/// Link to the page, filled in by the owning table
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uri: Option<String>,
}

/// Serializable snapshot of the paginator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatorView {
	/// Page being displayed
	pub current_page: i64,
	/// Numbering base
	pub first_page: i64,
	/// Index of the last page
	pub last_page: i64,
	/// Rows on each page
	pub rows_per_page: usize,
	/// Rows measured before slicing
	pub total_row_count: usize,
	/// Whether more than one page exists
	pub is_multipage: bool,
	/// Previous page index, if any
	pub previous: Option<i64>,
	/// Next page index, if any
	pub next: Option<i64>,
	/// Link to the previous page, filled in by the owning table
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub previous_uri: Option<String>,
	/// Link to the next page, filled in by the owning table
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub next_uri: Option<String>,
	/// Every page, in order
	pub pages: Vec<PageLink>,
}

/// Page-window state for a table
///
/// # Example
///
/// ```rust
/// use ztal_tables::{DataSource, Paginator};
///
/// let mut paginator = Paginator::new();
/// paginator.set_rows_per_page(20);
///
/// let mut source = DataSource::from((0..53).collect::<Vec<u32>>());
/// paginator.paginate(&mut source).unwrap();
/// paginator.set_current_page(1);
///
/// assert_eq!(paginator.total_row_count(), 53);
/// assert_eq!(paginator.pages().len(), 3);
/// assert_eq!(paginator.previous_page(), 0);
/// assert_eq!(paginator.next_page(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
	total_row_count: usize,
	rows_per_page: usize,
	first_page_index: i64,
	current_page: i64,
}

impl Default for Paginator {
	fn default() -> Self {
		Self {
			total_row_count: 0,
			rows_per_page: 1,
			first_page_index: 0,
			current_page: 0,
		}
	}
}

impl Paginator {
	/// Creates a paginator showing one row per page, numbered from zero
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a paginator from construction options
	///
	/// Options are applied in the order rows per page, first page, current
	/// page. The current page goes through the same bounds check as
	/// [`Paginator::set_current_page`].
	pub fn with_options(options: &PaginatorOptions) -> Self {
		let mut paginator = Self::new();
		if let Some(rows) = options.rows_per_page {
			paginator.set_rows_per_page(rows);
		}
		if let Some(first) = options.first_page {
			paginator.set_first_page_index(first);
		}
		if let Some(current) = options.current_page {
			paginator.set_current_page(current);
		}
		paginator
	}

	/// Number of rows measured by the last call to [`Paginator::paginate`]
	pub fn total_row_count(&self) -> usize {
		self.total_row_count
	}

	/// Sets the total row count directly, clamping negatives to zero
	///
	/// Used when the rows were counted elsewhere and never passed through
	/// [`Paginator::paginate`].
	pub fn set_total_row_count(&mut self, count: i64) {
		self.total_row_count = usize::try_from(count).unwrap_or(0);
	}

	/// Number of rows on a page
	pub fn rows_per_page(&self) -> usize {
		self.rows_per_page
	}

	/// Sets the number of rows on a page, clamping to at least one
	pub fn set_rows_per_page(&mut self, rows_per_page: i64) {
		self.rows_per_page = usize::try_from(rows_per_page.max(1)).unwrap_or(1);
	}

	/// Index of the first page
	pub fn first_page_index(&self) -> i64 {
		self.first_page_index
	}

	/// Changes the numbering base and moves to the new first page
	pub fn set_first_page_index(&mut self, first: i64) {
		self.first_page_index = first;
		self.current_page = first;
	}

	/// Index of the page being displayed
	pub fn current_page(&self) -> i64 {
		self.current_page
	}

	/// Moves to `page` when it lies in `[first_page_index, last_page]`
	///
	/// Out-of-range values are ignored and the previous page is kept; the
	/// return value tells whether the assignment was accepted.
	pub fn set_current_page(&mut self, page: i64) -> bool {
		if page >= self.first_page_index && page <= self.last_page() {
			self.current_page = page;
			true
		} else {
			tracing::debug!(
				page,
				first_page = self.first_page_index,
				last_page = self.last_page(),
				"ignoring out-of-range page"
			);
			false
		}
	}

	/// Number of pages needed for the measured rows
	pub fn page_count(&self) -> usize {
		self.total_row_count.div_ceil(self.rows_per_page)
	}

	/// Index of the last page
	///
	/// For an empty data set this is `first_page_index - 1`.
	pub fn last_page(&self) -> i64 {
		let pages = i64::try_from(self.page_count()).unwrap_or(i64::MAX);
		self.first_page_index.saturating_add(pages).saturating_sub(1)
	}

	/// Reads `{prefix}page` from request parameters
	///
	/// The value is stored without a bounds check; [`Paginator::paginate`]
	/// clamps it once the data set has been measured. Values that are not
	/// integers are ignored.
	pub fn init_from_request_parameters<P>(&mut self, parameters: &P, prefix: &str)
	where
		P: ParameterSource + ?Sized,
	{
		let name = format!("{prefix}page");
		let Some(raw) = parameters.parameter(&name) else {
			return;
		};
		match parse_page_number(raw) {
			Some(page) => self.current_page = page,
			None => tracing::debug!(parameter = %name, value = raw, "ignoring unparseable page"),
		}
	}

	/// Measures `source` and slices it in place to the current page window
	///
	/// A page whose starting row falls outside the data set resets the
	/// paginator to the first page. The source only holds the window
	/// afterwards.
	///
	/// # Errors
	///
	/// Fails with [`crate::TableError::SliceUnsupported`] when a
	/// capability-backed source cannot be sliced.
	pub fn paginate<R>(&mut self, source: &mut DataSource<R>) -> Result<()> {
		self.total_row_count = source.len();
		let rows_per_page = i64::try_from(self.rows_per_page).unwrap_or(i64::MAX);
		let total = i64::try_from(self.total_row_count).unwrap_or(i64::MAX);

		let offset = self.current_page.saturating_sub(self.first_page_index);
		let mut starting_row = rows_per_page.saturating_mul(offset);
		if starting_row < 0 || starting_row > total.saturating_sub(self.first_page_index) {
			tracing::debug!(
				requested = self.current_page,
				first_page = self.first_page_index,
				total_rows = self.total_row_count,
				"page outside data set, resetting to first page"
			);
			starting_row = 0;
			self.current_page = self.first_page_index;
		}

		source.slice(starting_row as usize, self.rows_per_page)
	}

	/// Returns `true` when the rows span more than one page
	pub fn is_multipage(&self) -> bool {
		self.page_count() > 1
	}

	/// Lists every page with its index, label and current flag
	///
	/// An empty data set still yields a single page.
	pub fn pages(&self) -> Vec<PageLink> {
		(0..self.page_count().max(1))
			.map(|offset| {
				let index = i64::try_from(offset)
					.map_or(i64::MAX, |offset| self.first_page_index.saturating_add(offset));
				PageLink {
					index,
					label: offset + 1,
					is_current: index == self.current_page,
					uri: None,
				}
			})
			.collect()
	}

	/// Index of the page before the current one, if any
	pub fn previous_page_index(&self) -> Option<i64> {
		(self.current_page > self.first_page_index).then(|| self.current_page - 1)
	}

	/// Index of the page after the current one, if any
	pub fn next_page_index(&self) -> Option<i64> {
		(self.current_page < self.last_page()).then(|| self.current_page + 1)
	}

	/// Index of the previous page, or [`NO_PAGE`] on the first page
	///
	/// The sentinel is only unambiguous for non-negative numbering bases;
	/// prefer [`Paginator::previous_page_index`] otherwise.
	pub fn previous_page(&self) -> i64 {
		self.previous_page_index().unwrap_or(NO_PAGE)
	}

	/// Index of the next page, or [`NO_PAGE`] on the last page
	///
	/// The sentinel is only unambiguous for non-negative numbering bases;
	/// prefer [`Paginator::next_page_index`] otherwise.
	pub fn next_page(&self) -> i64 {
		self.next_page_index().unwrap_or(NO_PAGE)
	}

	/// Snapshot of the paginator for templates
	pub fn view(&self) -> PaginatorView {
		PaginatorView {
			current_page: self.current_page,
			first_page: self.first_page_index,
			last_page: self.last_page(),
			rows_per_page: self.rows_per_page,
			total_row_count: self.total_row_count,
			is_multipage: self.is_multipage(),
			previous: self.previous_page_index(),
			next: self.next_page_index(),
			previous_uri: None,
			next_uri: None,
			pages: self.pages(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn test_rows_per_page_clamped_to_one() {
		let mut paginator = Paginator::new();
		paginator.set_rows_per_page(0);
		assert_eq!(paginator.rows_per_page(), 1);
		paginator.set_rows_per_page(-5);
		assert_eq!(paginator.rows_per_page(), 1);
	}

	#[test]
	fn test_total_row_count_clamped_to_zero() {
		let mut paginator = Paginator::new();
		paginator.set_total_row_count(-3);
		assert_eq!(paginator.total_row_count(), 0);
		paginator.set_total_row_count(12);
		assert_eq!(paginator.total_row_count(), 12);
	}

	#[test]
	fn test_first_page_index_resets_current_page() {
		let mut paginator = Paginator::new();
		paginator.set_total_row_count(10);
		paginator.set_current_page(5);
		paginator.set_first_page_index(1);
		assert_eq!(paginator.current_page(), 1);
		assert_eq!(paginator.first_page_index(), 1);
	}

	#[test]
	fn test_request_parameters_bypass_bounds() {
		let mut paginator = Paginator::new();
		let mut params = HashMap::new();
		params.insert("users-page".to_string(), "7".to_string());
		paginator.init_from_request_parameters(&params, "users-");
		assert_eq!(paginator.current_page(), 7);
	}

	#[test]
	fn test_request_parameters_ignore_garbage() {
		let mut paginator = Paginator::new();
		let mut params = HashMap::new();
		params.insert("page".to_string(), "seven".to_string());
		paginator.init_from_request_parameters(&params, "");
		assert_eq!(paginator.current_page(), 0);
	}

	#[test]
	fn test_empty_data_set_has_single_page() {
		let mut paginator = Paginator::new();
		let mut source: DataSource<u8> = DataSource::default();
		paginator.paginate(&mut source).unwrap();
		assert_eq!(paginator.last_page(), -1);
		assert_eq!(paginator.pages().len(), 1);
		assert!(paginator.pages()[0].is_current);
		assert_eq!(paginator.next_page(), NO_PAGE);
		assert_eq!(paginator.previous_page(), NO_PAGE);
	}

	#[test]
	fn test_options_apply_in_order() {
		let options = PaginatorOptions {
			rows_per_page: Some(10),
			first_page: Some(1),
			current_page: Some(3),
		};
		let paginator = Paginator::with_options(&options);
		assert_eq!(paginator.rows_per_page(), 10);
		assert_eq!(paginator.first_page_index(), 1);
		// Nothing measured yet, so page 3 does not exist
		assert_eq!(paginator.current_page(), 1);
	}

	#[test]
	fn test_extreme_first_page_indices_do_not_overflow() {
		let options = PaginatorOptions {
			rows_per_page: None,
			first_page: Some(i64::MIN),
			current_page: None,
		};
		let mut paginator = Paginator::with_options(&options);
		let mut source = DataSource::ArrayBacked(vec![1u8, 2, 3]);
		paginator.paginate(&mut source).unwrap();
		assert_eq!(source.len(), 1);
		assert_eq!(paginator.current_page(), i64::MIN);
		assert_eq!(paginator.last_page(), i64::MIN + 2);
		assert_eq!(paginator.pages().len(), 3);

		let mut paginator = Paginator::new();
		paginator.set_rows_per_page(20);
		paginator.set_first_page_index(i64::MAX);
		let mut source = DataSource::ArrayBacked((0..40u8).collect());
		paginator.paginate(&mut source).unwrap();
		let pages = paginator.pages();
		assert_eq!(pages.len(), 2);
		assert_eq!(pages[0].index, i64::MAX);
		assert_eq!(paginator.next_page(), NO_PAGE);
		assert_eq!(paginator.previous_page(), NO_PAGE);
		let _ = paginator.view();
	}
}
