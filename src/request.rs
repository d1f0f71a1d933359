//! Request capability contract tying a logical API call to its authority.

// self
use crate::{
	_prelude::*,
	authority::Authority,
	fetch::{FetchRequest, FetchResponse},
};

/// Boxed future returned by [`Request::parse`].
pub type ParseFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Capability describing one logical call to a RESTful service.
///
/// A request knows two things: how to turn itself into an unauthenticated
/// transport request for a given authority, and how to turn the service's
/// response back into a typed value. The generic parameter pins the request to
/// the authority type it expects, so mismatched pairings fail at compile time.
pub trait Request<A>
where
	Self: Send + Sync,
	A: Authority,
{
	/// Typed value produced by [`parse`](Request::parse).
	type Output;

	/// Builds a fresh, unauthenticated transport request for this call.
	///
	/// Invoked once per fulfillment attempt and never cached across attempts,
	/// because some authorities encode volatile state into the authentication
	/// step. Repeated calls must each produce a fresh request.
	fn prepare(&self, authority: &A) -> Result<FetchRequest>;

	/// Interprets the service's response, decoding the payload into
	/// [`Output`](Request::Output).
	///
	/// Every status except 401 reaches this operation unfiltered, including
	/// other error statuses; rejecting a status unacceptable for this call is
	/// this operation's responsibility.
	fn parse<'a>(
		&'a self,
		authority: &'a A,
		response: FetchResponse,
	) -> ParseFuture<'a, Self::Output>;
}
