//! Error types for table, column and paginator operations

use thiserror::Error;

/// Errors that can occur while preparing table data
#[derive(Debug, Error)]
pub enum TableError {
	/// The supplied rows cannot back a table
	#[error("Invalid data source: {0}")]
	InvalidDataSource(String),

	/// The data source has no slicing capability
	#[error("Unable to paginate data source: no slice capability")]
	SliceUnsupported,

	/// The data source has no sorting capability
	#[error("Unable to sort data source: no sort capability")]
	SortUnsupported,

	/// A sort direction string could not be understood
	#[error("Invalid sort direction: {0}")]
	InvalidSortDirection(String),
}

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;
