//! Observability for fulfillment calls.
//!
//! Two side channels coexist here. [`Logger`] is the synchronous per-milestone
//! callback every fulfillment accepts: the orchestrator hands it a [`LogEvent`]
//! inline at each protocol step, and it never influences control flow.
//! Feature-gated instrumentation mirrors it for fleet-wide visibility.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `rest_courier.fulfill`
//!   with the `stage` (call site) field.
//! - Enable `metrics` to increment the `rest_courier_fulfill_total` counter for
//!   every attempt/success/failure, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::{
	_prelude::*,
	authority::Authority,
	fetch::{FetchRequest, FetchResponse},
};

/// Protocol milestone emitted by the fulfillment orchestrator.
///
/// Each case borrows exactly the data available at its call site. Events are
/// delivered synchronously, never queued or retained.
#[derive(Clone, Copy, Debug)]
pub enum LogEvent<'a> {
	/// The authority is about to be refreshed.
	WillRefreshAuthority {
		/// Authority about to be refreshed.
		authority: &'a dyn Authority,
		/// Zero-based attempt index when the refresh was triggered by a mid-loop
		/// 401; `None` for the initial invalid-at-entry refresh.
		retry_attempt: Option<u32>,
	},
	/// A freshly prepared request is about to be authenticated.
	WillAuthenticate {
		/// Authority performing the authentication.
		authority: &'a dyn Authority,
		/// The unauthenticated transport request.
		request: &'a FetchRequest,
	},
	/// An authenticated request is about to be transmitted.
	WillTransmit {
		/// The authenticated transport request.
		request: &'a FetchRequest,
	},
	/// A response is about to be handed to the request's parse step.
	WillParse {
		/// The transport response, 401s excepted.
		response: &'a FetchResponse,
	},
}

/// Synchronous observer invoked inline at each protocol milestone.
///
/// The callback runs on the orchestrator's own control path: it must not block
/// or suspend, and a panic aborts the in-progress fulfillment exactly as a
/// failure at the surrounding step would. Implementations needing async work
/// must fire-and-forget or buffer.
pub trait Logger
where
	Self: Send + Sync,
{
	/// Records one milestone.
	fn log(&self, event: LogEvent<'_>);
}
impl<F> Logger for F
where
	F: Send + Sync + Fn(LogEvent<'_>),
{
	fn log(&self, event: LogEvent<'_>) {
		self(event)
	}
}

/// A logger which does nothing; the default for every fulfillment.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLogger;
impl Logger for NoLogger {
	fn log(&self, _event: LogEvent<'_>) {}
}

/// A logger which renders every milestone to stderr.
///
/// __Important__: this logger does not redact sensitive information.
/// Authorities and authenticated requests are printed as their own formatters
/// render them. Callers holding sensitive credentials must supply their own
/// redacting logger.
#[derive(Clone, Copy, Debug, Default)]
pub struct VerboseLogger;
impl Logger for VerboseLogger {
	fn log(&self, event: LogEvent<'_>) {
		match event {
			LogEvent::WillRefreshAuthority { authority, retry_attempt: Some(attempt) } =>
				eprintln!("+ fulfill:willRefreshAuthority {authority} (retry {attempt})"),
			LogEvent::WillRefreshAuthority { authority, retry_attempt: None } =>
				eprintln!("+ fulfill:willRefreshAuthority {authority}"),
			LogEvent::WillAuthenticate { authority, request } =>
				eprintln!("+ fulfill:willAuthenticate <{}> using {authority}", request.uri()),
			LogEvent::WillTransmit { request } =>
				eprintln!("+ fulfill:willTransmit {} <{}>", request.method(), request.uri()),
			LogEvent::WillParse { response } =>
				eprintln!("+ fulfill:willParse {}", response.status()),
		}
	}
}

/// Outcome labels recorded for each fulfillment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FulfillOutcome {
	/// Entry to the orchestrator.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FulfillOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FulfillOutcome::Attempt => "attempt",
			FulfillOutcome::Success => "success",
			FulfillOutcome::Failure => "failure",
		}
	}
}
impl Display for FulfillOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
