//! # ztal
//!
//! Paginated, sortable HTML tables and template helpers for server-rendered
//! views.
//!
//! ## Feature Flags
//!
//! - `tables` - [`tables`]: columns, sorting and pagination over record sources
//! - `tales` - [`tales`]: Tera filters, testers and functions
//! - `view` - [`view`]: template loading, translation and templated mail
//! - `full` (default) - everything above
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "tables")]
//! # {
//! use std::collections::HashMap;
//! use ztal::tables::{DataSource, Paginator, RecordColumn, Table};
//!
//! let request: HashMap<String, String> = [
//! 	("table-page".to_string(), "1".to_string()),
//! 	("table-sort".to_string(), "name".to_string()),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut table = Table::from_parameters(&request, |table| {
//! 	table.append_column(RecordColumn::new("name", "name"));
//! 	let mut paginator = Paginator::new();
//! 	paginator.set_rows_per_page(2);
//! 	table.set_paginator(paginator);
//! });
//!
//! let rows = serde_json::json!([{"name": "c"}, {"name": "a"}, {"name": "b"}]);
//! table.set_data_source(DataSource::from_json(rows).unwrap(), false).unwrap();
//!
//! let names: Vec<_> = table.rows().filter_map(|row| row.cell("name")).collect();
//! assert_eq!(names, vec![serde_json::json!("c")]);
//! # }
//! ```

#![warn(missing_docs)]

#[cfg(feature = "tables")]
pub mod tables;
#[cfg(feature = "tales")]
pub mod tales;
#[cfg(feature = "view")]
pub mod view;
