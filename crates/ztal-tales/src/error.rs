//! Error types for template helpers

use thiserror::Error;

/// Errors raised while evaluating a template helper
#[derive(Debug, Error)]
pub enum TalesError {
	/// A JSON literal could not be parsed
	#[error("Invalid JSON literal: {0}")]
	Json(#[from] serde_json::Error),

	/// The divisor of a modulo was zero
	#[error("Modulo by zero")]
	DivisionByZero,

	/// A date argument could not be parsed
	#[error("Could not parse \"{role}\" date {input:?}, please use a yyyy-mm-dd format string")]
	DateParse {
		/// Which argument failed (`from`, `to`, `before`, ...)
		role: &'static str,
		/// The rejected input
		input: String,
	},

	/// A helper received an argument it cannot use
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}

/// Result type for template helpers
pub type Result<T> = std::result::Result<T, TalesError>;

impl From<TalesError> for tera::Error {
	fn from(err: TalesError) -> Self {
		tera::Error::msg(err.to_string())
	}
}
