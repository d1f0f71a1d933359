//! Rust’s capability-driven REST fulfillment core—pluggable authorities, typed requests, and
//! retry-aware authentication in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authority;
pub mod data;
pub mod error;
pub mod ext;
pub mod fetch;
pub mod fulfill;
pub mod obs;
pub mod request;

#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::fetch::ReqwestFetch;

	/// Builds a reqwest fetch capability that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_fetch() -> ReqwestFetch {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestFetch::with_client(client)
	}
}

mod _prelude {
	pub use std::{
		collections::VecDeque,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
	};

	pub use http::{Method, StatusCode, Uri};
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::Client as ReqwestClient;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
#[cfg(test)] use rest_courier as _;
