#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use rest_courier::{
	_preludet::*,
	authority::{Authority, AuthorityFuture, NoAuthority},
	error::{ConfigError, StatusError},
	ext::FetchRequestExt,
	fetch::{Fetch, FetchRequest, FetchResponse},
	fulfill::{FulfillOptions, fulfill},
	http::{HeaderValue, Method, header::AUTHORIZATION},
	request::{ParseFuture, Request},
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct Conditions {
	temperature: f64,
	summary: String,
}

/// Unauthenticated weather lookup against a mock service.
#[derive(Debug)]
struct CurrentConditions {
	base: String,
}
impl Request<NoAuthority> for CurrentConditions {
	type Output = Conditions;

	fn prepare(&self, _authority: &NoAuthority) -> Result<FetchRequest> {
		http::Request::builder()
			.method(Method::GET)
			.uri(format!("{}/conditions", self.base))
			.body(Vec::new())
			.map_err(|e| Error::from(ConfigError::Http(e)))?
			.append_query_pairs(&[("units", "metric")])
	}

	fn parse<'a>(
		&'a self,
		_authority: &'a NoAuthority,
		response: FetchResponse,
	) -> ParseFuture<'a, Conditions> {
		Box::pin(async move {
			let status = response.status();

			if !status.is_success() {
				return Err(StatusError::new(
					status.as_u16(),
					status.canonical_reason().unwrap_or("Unknown"),
					"Conditions endpoint responded with an unacceptable status",
				)
				.into());
			}

			serde_json::from_slice(response.body()).map_err(Error::parse)
		})
	}
}

/// Bearer-token authority that rotates to a fresh token on refresh.
#[derive(Debug)]
struct RotatingTokenAuthority {
	token: Mutex<String>,
}
impl RotatingTokenAuthority {
	fn new(token: &str) -> Self {
		Self { token: Mutex::new(token.into()) }
	}
}
impl Display for RotatingTokenAuthority {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RotatingTokenAuthority(<redacted>)")
	}
}
impl Authority for RotatingTokenAuthority {
	fn retry_limit(&self) -> u32 {
		1
	}

	fn is_valid(&self) -> bool {
		true
	}

	fn refresh<'a>(&'a self, _fetch: &'a dyn Fetch) -> AuthorityFuture<'a, ()> {
		Box::pin(async move {
			*self.token.lock() = "token-2".into();

			Ok(())
		})
	}

	fn authenticate(&self, mut request: FetchRequest) -> AuthorityFuture<'_, FetchRequest> {
		Box::pin(async move {
			let token = self.token.lock().clone();
			let value = HeaderValue::from_str(&format!("Bearer {token}"))
				.map_err(|e| Error::from(ConfigError::Http(http::Error::from(e))))?;

			request.headers_mut().insert(AUTHORIZATION, value);

			Ok(request)
		})
	}
}

/// Authenticated lookup used by the token rotation test.
#[derive(Debug)]
struct SecureConditions {
	base: String,
}
impl Request<RotatingTokenAuthority> for SecureConditions {
	type Output = Conditions;

	fn prepare(&self, _authority: &RotatingTokenAuthority) -> Result<FetchRequest> {
		http::Request::builder()
			.method(Method::GET)
			.uri(format!("{}/secure/conditions", self.base))
			.body(Vec::new())
			.map_err(|e| ConfigError::Http(e).into())
	}

	fn parse<'a>(
		&'a self,
		_authority: &'a RotatingTokenAuthority,
		response: FetchResponse,
	) -> ParseFuture<'a, Conditions> {
		Box::pin(async move { serde_json::from_slice(response.body()).map_err(Error::parse) })
	}
}

#[tokio::test]
async fn fulfills_an_unauthenticated_call_over_tls() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/conditions").query_param("units", "metric");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"temperature\":21.5,\"summary\":\"Clear\"}");
		})
		.await;
	let authority = NoAuthority;
	// The mock server's certificate is self-signed, which is exactly what the
	// insecure test transport exists to accept.
	let request = CurrentConditions { base: format!("https://{}", server.address()) };
	let fetch = test_reqwest_fetch();
	let conditions = fulfill(FulfillOptions::new(&authority, &request).with_fetch(&fetch))
		.await
		.expect("The conditions call should fulfill successfully over TLS.");

	mock.assert_async().await;

	assert_eq!(conditions, Conditions { temperature: 21.5, summary: "Clear".into() });
}

#[tokio::test]
async fn non_unauthorized_error_statuses_fail_through_parse() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/conditions");
			then.status(503).body("upstream unavailable");
		})
		.await;
	let authority = NoAuthority;
	let request = CurrentConditions { base: server.base_url() };
	let fetch = test_reqwest_fetch();
	let err = fulfill(FulfillOptions::new(&authority, &request).with_fetch(&fetch))
		.await
		.expect_err("A 503 should fail through the request's parse step.");

	mock.assert_async().await;

	match err {
		Error::Status(status) => {
			assert_eq!(status.status, 503);
			assert_eq!(status.label, "Service Unavailable");
		},
		other => panic!("Expected a status error, got {other:?}."),
	}
}

#[tokio::test]
async fn rotates_a_stale_token_after_unauthorized() {
	let server = MockServer::start_async().await;
	let stale = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/secure/conditions")
				.header("authorization", "Bearer token-1");
			then.status(401).body("token expired");
		})
		.await;
	let fresh = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/secure/conditions")
				.header("authorization", "Bearer token-2");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"temperature\":-3.0,\"summary\":\"Snow\"}");
		})
		.await;
	let authority = RotatingTokenAuthority::new("token-1");
	let request = SecureConditions { base: server.base_url() };
	let fetch = test_reqwest_fetch();
	let conditions = fulfill(FulfillOptions::new(&authority, &request).with_fetch(&fetch))
		.await
		.expect("The rotated token should authenticate the second attempt.");

	stale.assert_async().await;
	fresh.assert_async().await;

	assert_eq!(conditions, Conditions { temperature: -3.0, summary: "Snow".into() });
}
