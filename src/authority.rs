//! Authority capability contract and the no-op reference implementation.

// self
use crate::{
	_prelude::*,
	fetch::{Fetch, FetchRequest},
};

/// Boxed future returned by [`Authority`] operations.
pub type AuthorityFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Capability used to authenticate fulfillment requests to a service.
///
/// Authorities are supplied by the caller and may outlive any single
/// fulfillment call; one instance may back several in-flight fulfillments at
/// once (e.g. one access token for a whole process). Credential state is
/// therefore interior and implementations synchronize it themselves; the
/// orchestrator never assumes exclusive access and issues
/// [`refresh`](Authority::refresh) calls without coordinating across
/// concurrent fulfillments.
pub trait Authority
where
	Self: Send + Sync + Debug + Display,
{
	/// The number of times this authority may be refreshed in response to a
	/// request failing with a 401 within one fulfillment call.
	fn retry_limit(&self) -> u32;

	/// Whether [`authenticate`](Authority::authenticate) is expected to succeed
	/// without a prior refresh.
	fn is_valid(&self) -> bool;

	/// Refreshes this authority so it can authenticate further requests.
	///
	/// Network operations go through the supplied fetch capability. Failures
	/// surface to the fulfillment caller verbatim; on success, subsequent
	/// [`is_valid`](Authority::is_valid) reads reflect the new state.
	fn refresh<'a>(&'a self, fetch: &'a dyn Fetch) -> AuthorityFuture<'a, ()>;

	/// Applies current credentials to an outgoing request and returns the
	/// authenticated version.
	///
	/// Called once per fulfillment attempt with a freshly prepared request, so
	/// volatile material (a nonce, a timestamp) can be minted here safely.
	/// Fails if credentials are absent or malformed.
	fn authenticate(&self, request: FetchRequest) -> AuthorityFuture<'_, FetchRequest>;
}

/// An authority which does not authenticate requests.
///
/// For services that require no authentication: zero retry budget, always
/// valid, a no-op refresh, and an identity authenticate.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuthority;
impl Authority for NoAuthority {
	fn retry_limit(&self) -> u32 {
		0
	}

	fn is_valid(&self) -> bool {
		true
	}

	fn refresh<'a>(&'a self, _fetch: &'a dyn Fetch) -> AuthorityFuture<'a, ()> {
		Box::pin(async { Ok(()) })
	}

	fn authenticate(&self, request: FetchRequest) -> AuthorityFuture<'_, FetchRequest> {
		Box::pin(async move { Ok(request) })
	}
}
impl Display for NoAuthority {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("NoAuthority")
	}
}
