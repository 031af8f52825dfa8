//! Table data windowing.
//!
//! Columns, sorting, pagination and the parameter round trip of sortable,
//! paginated tables.
//!
//! # Examples
//!
//! ```rust
//! use ztal::tables::{DataSource, Paginator, RecordColumn, Table};
//!
//! let mut table = Table::new();
//! table.append_column(RecordColumn::new("name", "name"));
//! let mut paginator = Paginator::new();
//! paginator.set_rows_per_page(2);
//! table.set_paginator(paginator);
//!
//! let rows = serde_json::json!([{"name": "a"}, {"name": "b"}, {"name": "c"}]);
//! table.set_data_source(DataSource::from_json(rows).unwrap(), false).unwrap();
//! assert_eq!(table.count(), 2);
//! ```

pub use ztal_tables::*;
