//! # ztal-view
//!
//! Tera-backed view layer for ztal tables and helpers.
//!
//! ## Overview
//!
//! - [`ViewSettings`]: template directories and source prefilters, from TOML
//! - [`TalView`]: loads templates and renders them by name
//! - [`RenderContext`]: per-render variables, always carrying `now`
//! - [`Translator`]: translation service behind the `t` and `plural` functions
//! - [`MailComposer`]: plain and HTML mail bodies from one `.email` template
//!
//! ## Example
//!
//! ```rust,no_run
//! use ztal_tables::{DataSource, RecordColumn, Table};
//! use ztal_view::{RenderContext, TalView, ViewSettings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ViewSettings::from_file("config/view.toml")?.with_template_dir("templates");
//! let view = TalView::new(settings)?;
//!
//! let mut table = Table::new();
//! table.append_column(RecordColumn::new("name", "name").label("Name"));
//! table.set_data_source(DataSource::from_json(serde_json::json!([{"name": "ada"}]))?, false)?;
//!
//! let html = view.render_table("users/user-list", "users", &table, &RenderContext::new())?;
//! # let _ = html;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod mail;
pub mod prefilter;
pub mod renderer;
pub mod settings;
pub mod translator;

pub use context::RenderContext;
pub use error::{Result, ViewError};
pub use mail::{MailBody, MailComposer};
pub use renderer::{TalView, TemplateRenderer};
pub use settings::ViewSettings;
pub use translator::{CatalogTranslator, IdentityTranslator, Translator};
