//! Template expression helpers for ztal views
//!
//! ## Modules
//!
//! - [`generic`]: casing, replacement, JSON literals, type names, modulo,
//!   loose equality, truthiness and date formatting
//! - [`date`]: `between`, `before` and `after` against an explicit `now`
//! - [`form`]: form element introspection and `data-*` attributes
//! - [`translation`]: plural key selection
//!
//! Each helper is a plain function; [`register`] exposes them to Tera as
//! filters, testers and functions.

#![warn(missing_docs)]

pub mod date;
pub mod engine;
pub mod error;
pub mod form;
pub mod generic;
pub mod translation;

pub use engine::register;
pub use error::{Result, TalesError};
pub use form::{Form, FormElement, FormNode};
pub use translation::PluralKeys;
