//! Base column trait and sort direction

use std::cmp::Ordering;
use std::fmt::{self, Debug};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TableError};
use crate::source::DataSource;

/// Sort direction of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	/// Smallest value first
	#[default]
	Ascending,
	/// Largest value first
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Numeric form reported to templates (`1` or `-1`)
	pub fn as_i8(&self) -> i8 {
		match self {
			Self::Ascending => 1,
			Self::Descending => -1,
		}
	}

	/// URL form of the direction
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}

	/// Applies the direction to an ascending comparison result
	pub fn apply(&self, ordering: Ordering) -> Ordering {
		match self {
			Self::Ascending => ordering,
			Self::Descending => ordering.reverse(),
		}
	}
}

impl FromStr for SortDirection {
	type Err = TableError;

	/// Parses the values accepted in `{id}-direction` URL parameters
	///
	/// `asc`, `ascending` and `1` are ascending; `desc`, `descending` and `-1`
	/// are descending. Matching ignores ASCII case and surrounding whitespace.
	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().as_str() {
			"asc" | "ascending" | "1" => Ok(Self::Ascending),
			"desc" | "descending" | "-1" => Ok(Self::Descending),
			_ => Err(TableError::InvalidSortDirection(s.to_string())),
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Trait for table column definitions
///
/// A column describes one displayable field of a row:
/// - a key that is unique within its table
/// - the accessor used to read the display value
/// - whether, and in which direction, the table may be ordered by it
pub trait Column: Debug {
	/// The type of rows this column operates on
	type Row;

	/// Returns the key of this column
	///
	/// This is the identifier used in `{id}-sort` URL parameters
	fn key(&self) -> &str;

	/// Returns the name of the field or accessor read for display
	fn accessor(&self) -> &str;

	/// Returns the header text for this column
	///
	/// Default: the column key
	fn header(&self) -> &str {
		self.key()
	}

	/// Returns whether the table can be ordered by this column
	fn is_sortable(&self) -> bool;

	/// Returns the current sort direction
	fn sort_direction(&self) -> SortDirection;

	/// Changes the sort direction
	fn set_sort_direction(&mut self, direction: SortDirection);

	/// Returns the display value of this column for `row`
	fn value(&self, row: &Self::Row) -> Value;

	/// Sorts `source` in place by this column, honouring the sort direction
	///
	/// The sort is stable.
	fn sort(&self, source: &mut DataSource<Self::Row>) -> Result<()>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("asc", SortDirection::Ascending)]
	#[case("ASCENDING", SortDirection::Ascending)]
	#[case("1", SortDirection::Ascending)]
	#[case(" desc ", SortDirection::Descending)]
	#[case("-1", SortDirection::Descending)]
	fn test_parse_direction(#[case] input: &str, #[case] expected: SortDirection) {
		assert_eq!(input.parse::<SortDirection>().unwrap(), expected);
	}

	#[test]
	fn test_parse_direction_rejects_garbage() {
		assert!("sideways".parse::<SortDirection>().is_err());
	}

	#[test]
	fn test_toggle_and_apply() {
		let direction = SortDirection::Ascending;
		assert_eq!(direction.toggle(), SortDirection::Descending);
		assert_eq!(direction.toggle().apply(Ordering::Less), Ordering::Greater);
		assert_eq!(direction.as_i8(), 1);
		assert_eq!(direction.toggle().as_i8(), -1);
	}
}
