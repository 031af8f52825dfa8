//! Per-render template variables

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tera::Context;
use ztal_tables::Table;

use crate::error::{Result, ViewError};

/// Variables for one render
///
/// Every context carries `now`, the RFC 3339 render time that the `between`,
/// `before` and `after` testers compare against. Fixing it per request keeps
/// all date conditions of a page consistent.
#[derive(Debug, Clone)]
pub struct RenderContext {
	now: DateTime<Utc>,
	inner: Context,
}

impl RenderContext {
	/// Creates a context rendered at `now`
	pub fn at(now: DateTime<Utc>) -> Self {
		let mut inner = Context::new();
		inner.insert("now", &now.to_rfc3339_opts(SecondsFormat::Secs, true));
		Self { now, inner }
	}

	/// Creates a context rendered at the current time
	pub fn new() -> Self {
		Self::at(Utc::now())
	}

	/// The render time
	pub fn now(&self) -> DateTime<Utc> {
		self.now
	}

	/// Adds a variable
	pub fn insert<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) {
		self.inner.insert(key, value);
	}

	/// Adds a variable, reporting serialization failures
	pub fn try_insert<T: Serialize + ?Sized>(
		&mut self,
		key: impl Into<String>,
		value: &T,
	) -> Result<()> {
		self.inner.try_insert(key, value).map_err(ViewError::Context)
	}

	/// Adds the displayable snapshot of `table` under `key`
	pub fn insert_table<R>(&mut self, key: impl Into<String>, table: &Table<R>) {
		self.inner.insert(key, &table.view());
	}

	/// Whether `key` is set
	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	/// Adds every variable of `other`, overwriting on collisions
	///
	/// The render time of `self` is kept.
	pub fn extend(&mut self, other: RenderContext) {
		let now = self.inner.get("now").cloned();
		self.inner.extend(other.inner);
		if let Some(now) = now {
			self.inner.insert("now", &now);
		}
	}

	/// The underlying engine context
	pub fn as_tera(&self) -> &Context {
		&self.inner
	}
}

impl Default for RenderContext {
	fn default() -> Self {
		Self::new()
	}
}
