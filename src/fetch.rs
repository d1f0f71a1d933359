//! Transport primitives for fulfillment calls.
//!
//! The module exposes [`Fetch`], the crate's only dependency on an HTTP stack,
//! alongside the [`FetchRequest`]/[`FetchResponse`] wire types it exchanges.
//! [`ReqwestFetch`] is the default transport behind the `reqwest` feature;
//! [`ScriptedFetch`] replays canned responses for tests and offline work.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Transport-level request exchanged with the fetch capability.
pub type FetchRequest = http::Request<Vec<u8>>;
/// Transport-level response produced by the fetch capability.
pub type FetchResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`Fetch::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<FetchResponse>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of dispatching fulfillment requests.
///
/// Implementations must be `Send + Sync` so one transport can serve several
/// in-flight fulfillments, and the futures they return must be `Send` so
/// callers can hop executors freely.
pub trait Fetch
where
	Self: Send + Sync,
{
	/// Dispatches the request and resolves with the service's response.
	///
	/// Transport-level failures (DNS, TCP, TLS) are errors; non-success HTTP
	/// statuses are responses, not errors, because status interpretation belongs
	/// to the caller.
	fn fetch(&self, request: FetchRequest) -> FetchFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// This is the crate's default transport. The wrapped client is cloned per
/// dispatch, which is cheap because reqwest clients are reference counted
/// internally, so one [`ReqwestFetch`] can back a whole process.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestFetch(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestFetch {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestFetch {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestFetch {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Fetch for ReqwestFetch {
	fn fetch(&self, request: FetchRequest) -> FetchFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client
				.execute(request.try_into().map_err(Error::fetch)?)
				.await
				.map_err(Error::fetch)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				FetchResponse::new(response.bytes().await.map_err(Error::fetch)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

/// Thread-safe scripted transport that replays queued responses, for tests and
/// offline development.
///
/// Responses are replayed in queue order and the method/URI of every dispatched
/// request is recorded, so callers can assert on attempt counts and request
/// freshness. Draining an empty script yields a [`ScriptExhausted`] transport
/// error.
#[derive(Debug, Default)]
pub struct ScriptedFetch {
	responses: Mutex<VecDeque<Result<FetchResponse>>>,
	dispatched: Mutex<Vec<(Method, Uri)>>,
}
impl ScriptedFetch {
	/// Queues a response to replay for the next dispatched request.
	pub fn push_response(&self, response: FetchResponse) {
		self.responses.lock().push_back(Ok(response));
	}

	/// Queues a bare response built from a status code and body bytes.
	pub fn push_status(&self, status: StatusCode, body: impl Into<Vec<u8>>) {
		let mut response = FetchResponse::new(body.into());

		*response.status_mut() = status;

		self.push_response(response);
	}

	/// Queues an error to raise for the next dispatched request.
	pub fn push_error(&self, error: Error) {
		self.responses.lock().push_back(Err(error));
	}

	/// Returns the number of requests dispatched so far.
	pub fn dispatch_count(&self) -> usize {
		self.dispatched.lock().len()
	}

	/// Returns the method/URI pair of every dispatched request, in order.
	pub fn dispatched(&self) -> Vec<(Method, Uri)> {
		self.dispatched.lock().clone()
	}
}
impl Fetch for ScriptedFetch {
	fn fetch(&self, request: FetchRequest) -> FetchFuture<'_> {
		self.dispatched.lock().push((request.method().clone(), request.uri().clone()));

		let next = self.responses.lock().pop_front();

		Box::pin(async move { next.unwrap_or_else(|| Err(Error::fetch(ScriptExhausted))) })
	}
}

/// Error raised when a [`ScriptedFetch`] runs out of queued responses.
#[derive(Clone, Copy, Debug, ThisError)]
#[error("Scripted transport has no responses left to replay.")]
pub struct ScriptExhausted;

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn scripted_fetch_replays_in_order() {
		let fetch = ScriptedFetch::default();

		fetch.push_status(StatusCode::OK, "first");
		fetch.push_status(StatusCode::NOT_FOUND, "second");

		let first = fetch
			.fetch(FetchRequest::new(Vec::new()))
			.await
			.expect("First scripted response should replay successfully.");
		let second = fetch
			.fetch(FetchRequest::new(Vec::new()))
			.await
			.expect("Second scripted response should replay successfully.");

		assert_eq!(first.status(), StatusCode::OK);
		assert_eq!(first.body(), b"first");
		assert_eq!(second.status(), StatusCode::NOT_FOUND);
		assert_eq!(fetch.dispatch_count(), 2);
	}

	#[tokio::test]
	async fn scripted_fetch_exhaustion_is_a_transport_error() {
		let fetch = ScriptedFetch::default();
		let err = fetch
			.fetch(FetchRequest::new(Vec::new()))
			.await
			.expect_err("An empty script should raise a transport error.");

		assert!(matches!(err, Error::Fetch(_)));
	}
}
