//! Extension helpers for shaping transport requests.

// crates.io
use http::header::{HeaderName, HeaderValue};
// self
use crate::{_prelude::*, error::ConfigError, fetch::FetchRequest};

/// Builder-style query and header mutation for [`FetchRequest`] values.
///
/// Each method consumes the request and returns the rewritten version, so
/// [`Request::prepare`](crate::request::Request::prepare) implementations and
/// authorities can chain them while assembling a call. The query helpers
/// require the request URI to be absolute, because relative references carry
/// no parseable URL.
pub trait FetchRequestExt
where
	Self: Sized,
{
	/// Appends the query pairs to the request's URL, keeping existing pairs.
	fn append_query_pairs(self, pairs: &[(&str, &str)]) -> Result<Self>;

	/// Sets the query pairs on the request's URL, replacing every existing
	/// value of each supplied name.
	fn set_query_pairs(self, pairs: &[(&str, &str)]) -> Result<Self>;

	/// Appends the headers, keeping existing values of the same names.
	fn append_headers(self, headers: &[(&str, &str)]) -> Result<Self>;

	/// Sets the headers, replacing every existing value of each supplied name.
	fn set_headers(self, headers: &[(&str, &str)]) -> Result<Self>;
}
impl FetchRequestExt for FetchRequest {
	fn append_query_pairs(self, pairs: &[(&str, &str)]) -> Result<Self> {
		rewrite_url(self, |url| {
			let mut query = url.query_pairs_mut();

			for (name, value) in pairs {
				query.append_pair(name, value);
			}
		})
	}

	fn set_query_pairs(self, pairs: &[(&str, &str)]) -> Result<Self> {
		rewrite_url(self, |url| {
			let mut current = url
				.query_pairs()
				.map(|(name, value)| (name.into_owned(), value.into_owned()))
				.collect::<Vec<_>>();

			for (name, value) in pairs {
				current.retain(|(n, _)| n != name);
				current.push((name.to_string(), value.to_string()));
			}

			url.set_query(None);

			if current.is_empty() {
				return;
			}

			let mut query = url.query_pairs_mut();

			for (name, value) in &current {
				query.append_pair(name, value);
			}
		})
	}

	fn append_headers(mut self, headers: &[(&str, &str)]) -> Result<Self> {
		for (name, value) in headers {
			let (name, value) = parse_header(name, value)?;

			self.headers_mut().append(name, value);
		}

		Ok(self)
	}

	fn set_headers(mut self, headers: &[(&str, &str)]) -> Result<Self> {
		for (name, value) in headers {
			let (name, value) = parse_header(name, value)?;

			self.headers_mut().insert(name, value);
		}

		Ok(self)
	}
}

fn rewrite_url(request: FetchRequest, mutate: impl FnOnce(&mut Url)) -> Result<FetchRequest> {
	let (mut parts, body) = request.into_parts();
	let mut url =
		Url::parse(&parts.uri.to_string()).map_err(|source| ConfigError::InvalidUrl { source })?;

	mutate(&mut url);

	parts.uri =
		url.as_str().parse::<Uri>().map_err(|e| ConfigError::Http(http::Error::from(e)))?;

	Ok(FetchRequest::from_parts(parts, body))
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
	let name = HeaderName::from_bytes(name.as_bytes())
		.map_err(|e| ConfigError::Http(http::Error::from(e)))?;
	let value =
		HeaderValue::from_str(value).map_err(|e| ConfigError::Http(http::Error::from(e)))?;

	Ok((name, value))
}
