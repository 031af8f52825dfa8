//! Template loading and rendering
//!
//! [`TalView`] compiles every template found under the configured
//! directories into one Tera instance, with the ztal helpers and translation
//! functions registered.
//!
//! Template names are paths relative to their directory, using `/` as the
//! separator and keeping the extension (`users/list.html`). Lookups may omit
//! the page extension and may use dash-separated names, which are converted
//! to camelCase first: `users/user-list` finds `users/userList.html`.
//!
//! Mail templates (`*.email`) additionally get two derived templates,
//! `{name}.txt` and `{name}.html`, each rendering one of the `plain` and
//! `html` blocks. See [`crate::MailComposer`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use tera::Tera;
use walkdir::WalkDir;
use ztal_tables::Table;

use crate::context::RenderContext;
use crate::error::{Result, ViewError};
use crate::prefilter;
use crate::settings::ViewSettings;
use crate::translator::{self, CatalogTranslator, IdentityTranslator, Translator};

/// Extension of mail templates
pub const MAIL_EXTENSION: &str = "email";

/// Output suffixes that are HTML-escaped when autoescaping is on
const ESCAPED_SUFFIXES: [&str; 5] = [".html", ".htm", ".xhtml", ".xml", ".phtml"];

/// Renders named templates
pub trait TemplateRenderer {
	/// Renders `name` with `context`
	fn render(&self, name: &str, context: &RenderContext) -> Result<String>;

	/// Whether `name` resolves to a template
	fn has_template(&self, name: &str) -> bool;
}

/// Converts a dash-separated template name to camelCase
///
/// Only the characters right after a dash are uppercased; the first segment
/// is kept as written.
///
/// ```rust
/// use ztal_view::renderer::camel_case_name;
///
/// assert_eq!(camel_case_name("user-list"), "userList");
/// assert_eq!(camel_case_name("admin/edit-user-form"), "admin/editUserForm");
/// ```
pub fn camel_case_name(name: &str) -> String {
	let mut parts = name.split('-');
	let mut out = parts.next().unwrap_or_default().to_string();
	for part in parts {
		let mut chars = part.chars();
		if let Some(first) = chars.next() {
			out.extend(first.to_uppercase());
			out.push_str(chars.as_str());
		}
	}
	out
}

/// Tera-backed view over directories of templates
pub struct TalView {
	tera: Tera,
	settings: ViewSettings,
	translator: Arc<dyn Translator>,
}

impl TalView {
	/// Loads every template from the configured directories
	///
	/// Without a catalogue, keys are returned as-is, or wrapped in `[[...]]`
	/// when `highlight_failed_translations` is set.
	pub fn new(settings: ViewSettings) -> Result<Self> {
		let translator: Arc<dyn Translator> = if settings.highlight_failed_translations {
			Arc::new(CatalogTranslator::new().highlight_failures(true))
		} else {
			Arc::new(IdentityTranslator)
		};
		Self::with_translator(settings, translator)
	}

	/// Loads every template and exposes `translator` to them
	///
	/// # Errors
	///
	/// Fails when the settings are unusable, a directory or file cannot be
	/// read, or a template does not compile.
	pub fn with_translator(settings: ViewSettings, translator: Arc<dyn Translator>) -> Result<Self> {
		settings.validate()?;

		let sources = collect_sources(&settings)?;
		let mut tera = Tera::default();
		if settings.autoescape {
			tera.autoescape_on(ESCAPED_SUFFIXES.to_vec());
		} else {
			tera.autoescape_on(Vec::new());
		}
		ztal_tales::register(&mut tera);
		tera.register_function("t", translator::translate_function(translator.clone()));
		tera.register_function("plural", translator::plural_function(translator.clone()));

		let wrappers: Vec<(String, String)> = sources
			.keys()
			.filter(|name| name.ends_with(&format!(".{MAIL_EXTENSION}")))
			.flat_map(|name| mail_wrappers(name))
			.collect();

		tera.add_raw_templates(sources.into_iter().chain(wrappers))
			.map_err(ViewError::Load)?;

		tracing::debug!(
			templates = tera.get_template_names().count(),
			"view templates loaded"
		);
		Ok(Self {
			tera,
			settings,
			translator,
		})
	}

	/// Registers an additional template from a string
	///
	/// The source goes through the same prefilters as files on disk.
	pub fn add_raw_template(&mut self, name: &str, source: &str) -> Result<()> {
		let source = prepare_source(name, source, &self.settings);
		self.tera
			.add_raw_template(name, &source)
			.map_err(ViewError::Load)
	}

	/// The active settings
	pub fn settings(&self) -> &ViewSettings {
		&self.settings
	}

	/// The translator exposed to templates
	pub fn translator(&self) -> &Arc<dyn Translator> {
		&self.translator
	}

	/// Names of every registered template
	pub fn template_names(&self) -> impl Iterator<Item = &str> {
		self.tera.get_template_names()
	}

	/// Resolves a requested name to a registered template
	///
	/// The camelCase form is tried as-is and then with the page extension.
	pub fn resolve(&self, name: &str) -> Option<String> {
		let name = camel_case_name(name);
		let with_extension = format!("{name}.{}", self.settings.template_extension);
		[name, with_extension]
			.into_iter()
			.find(|candidate| self.tera.get_template_names().any(|known| known == candidate))
	}

	/// Renders `name` with `table`'s snapshot available as `key`
	pub fn render_table<R>(
		&self,
		name: &str,
		key: &str,
		table: &Table<R>,
		context: &RenderContext,
	) -> Result<String> {
		let mut context = context.clone();
		context.insert_table(key, table);
		self.render(name, &context)
	}

	/// Renders a template by its registered name, skipping name normalisation
	pub(crate) fn render_registered(&self, template: String, context: &RenderContext) -> Result<String> {
		if !self.tera.get_template_names().any(|known| known == template) {
			return Err(ViewError::TemplateNotFound(template));
		}
		tracing::debug!(template = %template, "rendering template");
		let output = self
			.tera
			.render(&template, context.as_tera())
			.map_err(|source| ViewError::Render {
				template: template.clone(),
				source,
			})?;
		tracing::debug!(template = %template, bytes = output.len(), "template rendered");
		Ok(output)
	}

	/// Direct access to the engine, for registering extra helpers
	pub fn engine_mut(&mut self) -> &mut Tera {
		&mut self.tera
	}
}

impl TemplateRenderer for TalView {
	fn render(&self, name: &str, context: &RenderContext) -> Result<String> {
		let template = self
			.resolve(name)
			.ok_or_else(|| ViewError::TemplateNotFound(name.to_string()))?;
		self.render_registered(template, context)
	}

	fn has_template(&self, name: &str) -> bool {
		self.resolve(name).is_some()
	}
}

impl std::fmt::Debug for TalView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TalView")
			.field("settings", &self.settings)
			.field("templates", &self.tera.get_template_names().count())
			.finish_non_exhaustive()
	}
}

/// Wrapper templates rendering each block of a mail template
fn mail_wrappers(name: &str) -> [(String, String); 2] {
	[
		(
			format!("{name}.txt"),
			format!("{{% extends \"{name}\" %}}{{% block html %}}{{% endblock html %}}"),
		),
		(
			format!("{name}.html"),
			format!("{{% extends \"{name}\" %}}{{% block plain %}}{{% endblock plain %}}"),
		),
	]
}

fn prepare_source(name: &str, source: &str, settings: &ViewSettings) -> String {
	let mut source = if settings.strip_comments {
		prefilter::strip_comments(source)
	} else {
		source.to_string()
	};
	if settings.compress_whitespace || name.ends_with(&format!(".{MAIL_EXTENSION}")) {
		source = prefilter::compress_whitespace(&source);
	}
	source
}

/// Reads page and mail templates from every directory, first directory wins
fn collect_sources(settings: &ViewSettings) -> Result<HashMap<String, String>> {
	let mut sources = HashMap::new();
	for dir in &settings.template_dirs {
		if !dir.is_dir() {
			tracing::warn!(dir = %dir.display(), "template directory missing, skipping");
			continue;
		}
		for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
			let entry = entry.map_err(|err| ViewError::Io {
				path: err.path().unwrap_or(dir.as_path()).to_path_buf(),
				source: err.into(),
			})?;
			if !entry.file_type().is_file() || !is_template(entry.path(), settings) {
				continue;
			}
			let Some(name) = template_name(dir, entry.path()) else {
				continue;
			};
			if sources.contains_key(&name) {
				tracing::debug!(template = %name, path = %entry.path().display(), "shadowed template ignored");
				continue;
			}
			let source = fs::read_to_string(entry.path()).map_err(|source| ViewError::Io {
				path: entry.path().to_path_buf(),
				source,
			})?;
			let source = prepare_source(&name, &source, settings);
			sources.insert(name, source);
		}
	}
	Ok(sources)
}

fn is_template(path: &Path, settings: &ViewSettings) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| ext == settings.template_extension || ext == MAIL_EXTENSION)
}

fn template_name(dir: &Path, path: &Path) -> Option<String> {
	let relative = path.strip_prefix(dir).ok()?;
	let parts: Option<Vec<&str>> = relative
		.components()
		.map(|component| component.as_os_str().to_str())
		.collect();
	Some(parts?.join("/"))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("index", "index")]
	#[case("user-list", "userList")]
	#[case("a--b", "aB")]
	#[case("trailing-", "trailing")]
	fn test_camel_case_name(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(camel_case_name(input), expected);
	}

	#[test]
	fn test_template_name_uses_forward_slashes() {
		let dir = Path::new("/srv/templates");
		let path = dir.join("users").join("list.html");
		assert_eq!(template_name(dir, &path).as_deref(), Some("users/list.html"));
	}

	#[test]
	fn test_mail_sources_always_compressed() {
		let settings = ViewSettings::default();
		let source = "<p>\n   hi   there\n</p>";
		assert_eq!(prepare_source("page.html", source, &settings), source);
		assert_eq!(
			prepare_source("emails/hi.email", source, &settings),
			"<p>\nhi there\n</p>"
		);
	}
}
