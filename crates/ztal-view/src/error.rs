//! Error types for views, settings and mail

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring or rendering a view
#[derive(Debug, Error)]
pub enum ViewError {
	/// No template is registered under the requested name
	#[error("Template not found: {0}")]
	TemplateNotFound(String),

	/// The template engine failed
	#[error("Failed to render template '{template}': {source}")]
	Render {
		/// Name of the template being rendered
		template: String,
		/// Engine error
		#[source]
		source: tera::Error,
	},

	/// A template source could not be compiled
	#[error("Failed to load templates: {0}")]
	Load(#[source] tera::Error),

	/// A template file or directory could not be read
	#[error("IO error reading {path}: {source}")]
	Io {
		/// File or directory being read
		path: PathBuf,
		/// Underlying error
		#[source]
		source: std::io::Error,
	},

	/// Settings could not be parsed
	#[error("Invalid view settings: {0}")]
	Settings(#[from] toml::de::Error),

	/// Only UTF-8 templates are supported
	#[error("Unsupported template encoding: {0}")]
	UnsupportedEncoding(String),

	/// A mail address could not be parsed
	#[error("Invalid mail address: {0}")]
	Address(#[from] lettre::address::AddressError),

	/// The mail message could not be assembled
	#[error("Failed to build mail message: {0}")]
	Mail(#[from] lettre::error::Error),

	/// A context value could not be serialized
	#[error("Failed to serialize context value: {0}")]
	Context(#[source] tera::Error),
}

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ViewError>;
