//! Crate-level error types shared across the fulfillment core.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error produced by caller-supplied capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical fulfillment error exposed by public APIs.
///
/// The orchestrator itself only ever constructs the retry-exhaustion
/// [`StatusError`]; every other variant carries a capability failure verbatim,
/// with no wrapping or translation beyond the variant tag naming the step that
/// produced it.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Service responded with an unacceptable status.
	#[error(transparent)]
	Status(#[from] StatusError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Authority refresh or authentication failure.
	#[error(transparent)]
	Authority(BoxError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Fetch(BoxError),
	/// Response interpretation failure raised by a request's parse step.
	#[error(transparent)]
	Parse(BoxError),
}
impl Error {
	/// Wraps an authority-specific failure.
	pub fn authority(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Authority(Box::new(src))
	}

	/// Wraps a transport-specific failure.
	pub fn fetch(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Fetch(Box::new(src))
	}

	/// Wraps a response interpretation failure.
	pub fn parse(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Parse(Box::new(src))
	}
}

/// Service status error carrying the numeric status, its short label, and a
/// human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{status} {label}: {message}")]
pub struct StatusError {
	/// Numeric HTTP status code.
	pub status: u16,
	/// Short status label (e.g. `Unauthorized`).
	pub label: String,
	/// Human-readable description of the failure.
	pub message: String,
}
impl StatusError {
	/// Creates a status error from its parts.
	pub fn new(status: u16, label: impl Into<String>, message: impl Into<String>) -> Self {
		Self { status, label: label.into(), message: message.into() }
	}

	/// The error raised when a fulfillment's 401 retry budget is exhausted.
	pub fn retry_limit_exceeded() -> Self {
		Self::new(401, "Unauthorized", "Retry limit exceeded")
	}
}

/// Configuration and validation failures raised by the fulfillment core.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No fetch capability was supplied and the default transport is disabled.
	#[error("No fetch capability was supplied and the `reqwest` feature is disabled.")]
	MissingFetch,
	/// HTTP request construction failed.
	#[error(transparent)]
	Http(#[from] http::Error),
	/// Request URL cannot be parsed.
	#[error("Request URL is invalid.")]
	InvalidUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn retry_limit_exceeded_shape() {
		let err = StatusError::retry_limit_exceeded();

		assert_eq!(err.status, 401);
		assert_eq!(err.label, "Unauthorized");
		assert_eq!(err.message, "Retry limit exceeded");
		assert_eq!(err.to_string(), "401 Unauthorized: Retry limit exceeded");
	}

	#[test]
	fn capability_errors_surface_verbatim() {
		let source = std::io::Error::other("socket closed");
		let err = Error::fetch(source);

		assert_eq!(err.to_string(), "socket closed");
	}
}
