//! Sortable, paginated HTML tables for ztal views
//!
//! A [`Table`] owns an ordered set of columns and a [`DataSource`]. Replacing
//! the data source sorts it by the active sort column and then slices it to
//! the current page of the attached [`Paginator`]. Sort and page state
//! round-trip through `{table_id}-sort`, `{table_id}-direction` and
//! `{table_id}-page` request parameters; every other request parameter is
//! retained so generated links keep the caller's filters.
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Table] --> B[Columns]
//!     A --> C[DataSource]
//!     A --> D[Paginator]
//!     A --> E[Parameters]
//!     B --> F[RecordColumn]
//!     B --> G[ObjectColumn]
//!     C --> H[ArrayBacked]
//!     C --> I[CapabilityBacked]
//!     A --> J[TableView]
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use serde_json::json;
//! use ztal_tables::{DataSource, Paginator, RecordColumn, Table};
//!
//! let mut request = HashMap::new();
//! request.insert("users-sort".to_string(), "name".to_string());
//! request.insert("users-page".to_string(), "1".to_string());
//! request.insert("filter".to_string(), "active".to_string());
//!
//! let mut table = Table::from_parameters(&request, |table| {
//!     table.set_id("users");
//!     table.append_column(RecordColumn::new("name", "name"));
//!     let mut paginator = Paginator::new();
//!     paginator.set_rows_per_page(1);
//!     table.set_paginator(paginator);
//! });
//!
//! let rows = json!([{"name": "b"}, {"name": "a"}, {"name": "c"}]);
//! table.set_data_source(DataSource::from_json(rows).unwrap(), false).unwrap();
//!
//! assert_eq!(table.current().unwrap().cell("name"), Some(json!("b")));
//! assert_eq!(table.url_params(), "/filter/active");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod error;
pub mod paginator;
pub mod params;
pub mod record;
pub mod row;
pub mod source;
pub mod table;
pub mod view;

// Re-exports for convenience
pub use column::{Column, ObjectColumn, RecordColumn, SortDirection};
pub use error::{Result, TableError};
pub use paginator::{NO_PAGE, PageLink, Paginator, PaginatorOptions, PaginatorView};
pub use params::{ParameterSource, Parameters};
pub use record::{Record, compare_values};
pub use row::{Cell, Row, Rows};
pub use source::{DataSource, RecordSource};
pub use table::Table;
pub use view::{ColumnDetails, TableView};
