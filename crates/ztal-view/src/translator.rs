//! Translation services exposed to templates

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tera::Result as TeraResult;
use ztal_tales::PluralKeys;

/// Domain used when a template names none
pub const DEFAULT_DOMAIN: &str = "default";

/// Looks up translated messages
pub trait Translator: Send + Sync {
	/// Translation of `key`, or a fallback when none exists
	fn translate(&self, key: &str, domain: Option<&str>) -> String;

	/// Translation of the key that fits `keys.count`
	fn translate_plural(&self, keys: &PluralKeys, domain: Option<&str>) -> String {
		match keys.select() {
			Some(key) => self.translate(key, domain),
			None => String::new(),
		}
	}
}

/// Translator that returns every key unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
	fn translate(&self, key: &str, _domain: Option<&str>) -> String {
		key.to_string()
	}
}

/// In-memory message catalogue grouped by domain
///
/// # Example
///
/// ```rust
/// use ztal_view::{CatalogTranslator, Translator};
///
/// let mut catalog = CatalogTranslator::new();
/// catalog.add("greeting", "Bonjour");
/// catalog.add_to_domain("mail", "greeting", "Cher client");
///
/// assert_eq!(catalog.translate("greeting", None), "Bonjour");
/// assert_eq!(catalog.translate("greeting", Some("mail")), "Cher client");
/// assert_eq!(catalog.translate("farewell", None), "farewell");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
	domains: HashMap<String, HashMap<String, String>>,
	highlight_failures: bool,
}

impl CatalogTranslator {
	/// Creates an empty catalogue
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps keys without a translation in `[[...]]`
	pub fn highlight_failures(mut self, highlight: bool) -> Self {
		self.highlight_failures = highlight;
		self
	}

	/// Adds a message to the default domain
	pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
		self.add_to_domain(DEFAULT_DOMAIN, key, message);
	}

	/// Adds a message to `domain`
	pub fn add_to_domain(
		&mut self,
		domain: impl Into<String>,
		key: impl Into<String>,
		message: impl Into<String>,
	) {
		self.domains
			.entry(domain.into())
			.or_default()
			.insert(key.into(), message.into());
	}

	/// Number of messages across all domains
	pub fn len(&self) -> usize {
		self.domains.values().map(HashMap::len).sum()
	}

	/// Whether the catalogue holds no messages
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Translator for CatalogTranslator {
	fn translate(&self, key: &str, domain: Option<&str>) -> String {
		let domain = domain.unwrap_or(DEFAULT_DOMAIN);
		if let Some(message) = self.domains.get(domain).and_then(|messages| messages.get(key)) {
			return message.clone();
		}
		tracing::debug!(key, domain, "missing translation");
		if self.highlight_failures {
			format!("[[{key}]]")
		} else {
			key.to_string()
		}
	}
}

fn domain_arg(args: &HashMap<String, Value>) -> Option<&str> {
	args.get("domain").and_then(Value::as_str)
}

/// Builds the `t(key, domain)` template function
///
/// # Example
/// ```tera
/// <h1>{{ t(key="page.title") }}</h1>
/// ```
pub fn translate_function(
	translator: Arc<dyn Translator>,
) -> impl Fn(&HashMap<String, Value>) -> TeraResult<Value> + Send + Sync {
	move |args: &HashMap<String, Value>| {
		let key = args
			.get("key")
			.and_then(Value::as_str)
			.ok_or_else(|| tera::Error::msg("t requires a 'key' string argument"))?;
		Ok(Value::String(translator.translate(key, domain_arg(args))))
	}
}

/// Builds the `plural(keys, count, domain)` template function
///
/// # Example
/// ```tera
/// {{ plural(keys=["basket.item", "basket.items"], count=basket.size) }}
/// ```
pub fn plural_function(
	translator: Arc<dyn Translator>,
) -> impl Fn(&HashMap<String, Value>) -> TeraResult<Value> + Send + Sync {
	move |args: &HashMap<String, Value>| {
		let keys: Vec<String> = args
			.get("keys")
			.cloned()
			.map(serde_json::from_value)
			.transpose()
			.map_err(|e| tera::Error::msg(format!("plural 'keys' must be a list of strings: {e}")))?
			.ok_or_else(|| tera::Error::msg("plural requires a 'keys' argument"))?;
		let count = args
			.get("count")
			.and_then(Value::as_i64)
			.ok_or_else(|| tera::Error::msg("plural requires an integer 'count' argument"))?;
		let keys = PluralKeys::new(keys, count);
		Ok(Value::String(
			translator.translate_plural(&keys, domain_arg(args)),
		))
	}
}
