//! Fulfillment orchestration: the bounded authenticate/transmit/retry protocol.
//!
//! [`fulfill`] keeps one logical call alive across authentication expiry. An
//! authority that is invalid at entry is refreshed once up front, outside the
//! retry budget. The orchestrator then repeatedly prepares, authenticates, and
//! transmits the request, refreshing and retrying on 401 responses until the
//! authority's retry budget runs out. Every other status, success or failure,
//! is handed to the request's parse step untouched, and every capability
//! failure propagates verbatim without consuming a retry.

// self
use crate::{
	_prelude::*,
	authority::Authority,
	error::StatusError,
	fetch::Fetch,
	obs::{self, FulfillOutcome, FulfillSpan, LogEvent, Logger, NoLogger},
	request::Request,
};
#[cfg(feature = "reqwest")] use crate::fetch::ReqwestFetch;
#[cfg(not(feature = "reqwest"))] use crate::error::ConfigError;

/// Describes a request to fulfill using a service and how it should be issued.
///
/// Bundles the authority/request pairing with optional transport and logger
/// overrides. Ephemeral: build one per call and hand it to [`fulfill`].
pub struct FulfillOptions<'a, A, R>
where
	A: Authority,
	R: Request<A>,
{
	/// Authority used to authenticate the request.
	pub authority: &'a A,
	/// The logical call to fulfill.
	pub request: &'a R,
	/// Transport override; defaults to the crate's reqwest-backed transport.
	pub fetch: Option<&'a dyn Fetch>,
	/// Milestone observer; defaults to [`NoLogger`].
	pub logger: Option<&'a dyn Logger>,
}
impl<'a, A, R> FulfillOptions<'a, A, R>
where
	A: Authority,
	R: Request<A>,
{
	/// Creates options for the provided authority/request pairing.
	pub fn new(authority: &'a A, request: &'a R) -> Self {
		Self { authority, request, fetch: None, logger: None }
	}

	/// Sets or replaces the transport used for every network operation,
	/// authority refreshes included.
	pub fn with_fetch(mut self, fetch: &'a dyn Fetch) -> Self {
		self.fetch = Some(fetch);

		self
	}

	/// Sets or replaces the milestone logger.
	pub fn with_logger(mut self, logger: &'a dyn Logger) -> Self {
		self.logger = Some(logger);

		self
	}
}
impl<A, R> Debug for FulfillOptions<'_, A, R>
where
	A: Authority,
	R: Request<A>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FulfillOptions")
			.field("authority", &self.authority)
			.field("fetch_overridden", &self.fetch.is_some())
			.field("logger_overridden", &self.logger.is_some())
			.finish()
	}
}

/// Issues a request to a service, resolving once the parsed response is
/// available.
///
/// The protocol, in order:
/// 1. If the authority is invalid at entry, refresh it once; this refresh is
///    not counted against the retry budget.
/// 2. For each attempt up to and including the authority's retry limit (so a
///    limit of one yields two total attempts): prepare a fresh request,
///    authenticate it, transmit it. A not-ok response with status 401 refreshes
///    the authority and retries; any other response goes to
///    [`Request::parse`], whose result terminates the call.
/// 3. A budget spent entirely on 401s fails with
///    [`StatusError::retry_limit_exceeded`].
///
/// # Errors
///
/// Besides the retry-exhaustion [`StatusError`], every authority, transport,
/// and parse failure propagates immediately and verbatim; none of them
/// consumes a retry attempt.
pub async fn fulfill<A, R>(options: FulfillOptions<'_, A, R>) -> Result<R::Output>
where
	A: Authority,
	R: Request<A>,
{
	let span = FulfillSpan::new("fulfill");

	obs::record_fulfill_outcome(FulfillOutcome::Attempt);

	let result = span.instrument(fulfill_protocol(options)).await;

	match &result {
		Ok(_) => obs::record_fulfill_outcome(FulfillOutcome::Success),
		Err(_) => obs::record_fulfill_outcome(FulfillOutcome::Failure),
	}

	result
}

async fn fulfill_protocol<A, R>(options: FulfillOptions<'_, A, R>) -> Result<R::Output>
where
	A: Authority,
	R: Request<A>,
{
	let FulfillOptions { authority, request, fetch, logger } = options;
	#[cfg(feature = "reqwest")]
	let default_fetch;
	let fetch: &dyn Fetch = match fetch {
		Some(fetch) => fetch,
		#[cfg(feature = "reqwest")]
		None => {
			default_fetch = ReqwestFetch::default();

			&default_fetch
		},
		#[cfg(not(feature = "reqwest"))]
		None => return Err(ConfigError::MissingFetch.into()),
	};
	let logger = logger.unwrap_or(&NoLogger);

	if !authority.is_valid() {
		logger.log(LogEvent::WillRefreshAuthority { authority, retry_attempt: None });
		authority.refresh(fetch).await?;
	}

	// The bound is `retry_limit + 1` total attempts: a caller configuring one
	// retry gets two transmissions.
	for attempt in 0..=authority.retry_limit() {
		let unauthenticated = request.prepare(authority)?;

		logger.log(LogEvent::WillAuthenticate { authority, request: &unauthenticated });

		let authenticated = authority.authenticate(unauthenticated).await?;

		logger.log(LogEvent::WillTransmit { request: &authenticated });

		let response = fetch.fetch(authenticated).await?;

		// Only a 401 means "authentication went stale mid-flight"; every other
		// not-ok status is application-level and belongs to the parse step.
		if !response.status().is_success() && response.status() == StatusCode::UNAUTHORIZED {
			logger.log(LogEvent::WillRefreshAuthority { authority, retry_attempt: Some(attempt) });
			authority.refresh(fetch).await?;

			continue;
		}

		logger.log(LogEvent::WillParse { response: &response });

		return request.parse(authority, response).await;
	}

	Err(StatusError::retry_limit_exceeded().into())
}
