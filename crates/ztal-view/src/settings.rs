//! View configuration
//!
//! Settings are read from TOML, typically a `[view]` table in the
//! application's configuration file. Every key is optional.
//!
//! ```toml
//! template_dirs = ["app/templates", "vendor/templates"]
//! template_extension = "html"
//! compress_whitespace = true
//! highlight_failed_translations = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

/// Configuration of a [`crate::TalView`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
	/// Directories searched for templates, earlier directories win
	#[serde(alias = "templateRepositoryPaths")]
	pub template_dirs: Vec<PathBuf>,
	/// Extension of page templates, without the dot
	pub template_extension: String,
	/// Encoding of template files; only UTF-8 is accepted
	pub encoding: String,
	/// Collapse whitespace in page templates
	#[serde(alias = "compressWhitespace")]
	pub compress_whitespace: bool,
	/// Remove HTML comments from templates
	pub strip_comments: bool,
	/// Wrap untranslated keys in `[[...]]`
	#[serde(alias = "highlightFailedTranslations")]
	pub highlight_failed_translations: bool,
	/// Directory of mail templates, relative to a template directory
	pub mail_template_dir: String,
	/// Escape output of HTML templates
	pub autoescape: bool,
}

impl Default for ViewSettings {
	fn default() -> Self {
		Self {
			template_dirs: Vec::new(),
			template_extension: "html".to_string(),
			encoding: "UTF-8".to_string(),
			compress_whitespace: false,
			strip_comments: true,
			highlight_failed_translations: false,
			mail_template_dir: "emails".to_string(),
			autoescape: true,
		}
	}
}

impl ViewSettings {
	/// Parses settings from a TOML document
	pub fn from_toml_str(source: &str) -> Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Reads settings from a TOML file
	///
	/// A missing file yields the defaults.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			tracing::debug!(path = %path.display(), "view settings file missing, using defaults");
			return Ok(Self::default());
		}
		let source = fs::read_to_string(path).map_err(|source| ViewError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Adds a template directory after the existing ones
	pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.template_dirs.push(dir.into());
		self
	}

	/// Rejects settings the view cannot honour
	pub fn validate(&self) -> Result<()> {
		let encoding = self.encoding.to_ascii_uppercase().replace('_', "-");
		if encoding != "UTF-8" && encoding != "UTF8" {
			return Err(ViewError::UnsupportedEncoding(self.encoding.clone()));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults_from_empty_document() {
		let settings = ViewSettings::from_toml_str("").unwrap();
		assert_eq!(settings, ViewSettings::default());
		assert!(settings.strip_comments);
		assert_eq!(settings.mail_template_dir, "emails");
	}

	#[test]
	fn test_camel_case_key_names_accepted() {
		let settings = ViewSettings::from_toml_str(
			"compressWhitespace = true\nhighlightFailedTranslations = true\ntemplateRepositoryPaths = [\"a\"]",
		)
		.unwrap();
		assert!(settings.compress_whitespace);
		assert!(settings.highlight_failed_translations);
		assert_eq!(settings.template_dirs, vec![PathBuf::from("a")]);
	}

	#[test]
	fn test_invalid_document() {
		assert!(matches!(
			ViewSettings::from_toml_str("compress_whitespace = \"yes\""),
			Err(ViewError::Settings(_))
		));
	}

	#[test]
	fn test_encoding_validation() {
		let mut settings = ViewSettings::default();
		assert!(settings.validate().is_ok());
		settings.encoding = "utf8".to_string();
		assert!(settings.validate().is_ok());
		settings.encoding = "ISO-8859-1".to_string();
		assert!(matches!(
			settings.validate(),
			Err(ViewError::UnsupportedEncoding(_))
		));
	}
}
