//! Fetches the profile for an access token and folds every failure into [`Error`].
//!
//! Outcome classification:
//!
//! - transport failure before a response exists → [`Error::ProfileFetch`];
//! - non-success status whose body is a `{ message, status }` payload → [`Error::Provider`];
//! - non-success status with any other body → [`Error::ProfileFetch`] carrying the status;
//! - success status with a non-JSON body → [`Error::MalformedProfile`];
//! - success status with JSON → [`Profile`].

// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::{AuthScheme, StrategyConfig},
	error::TransportError,
	http::ProfileHttpClient,
	profile::{Profile, ProviderErrorPayload},
};

/// Header carrying the application's client identifier.
pub const CLIENT_ID_HEADER: &str = "Client-ID";

const BODY_PREVIEW_LIMIT: usize = 256;

/// Issues the authenticated profile request through an injected transport.
pub struct ProfileResolver<C>
where
	C: ?Sized + ProfileHttpClient,
{
	http_client: Arc<C>,
	profile_url: Url,
	client_id: String,
	auth_scheme: AuthScheme,
}
impl<C> ProfileResolver<C>
where
	C: ?Sized + ProfileHttpClient,
{
	/// Creates a resolver for the configured endpoint, client id, and auth scheme.
	pub fn new(config: &StrategyConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			profile_url: config.profile_url.clone(),
			client_id: config.client_id.as_str().to_owned(),
			auth_scheme: config.auth_scheme,
		}
	}

	/// Profile endpoint queried by [`user_profile`](Self::user_profile).
	pub fn profile_url(&self) -> &Url {
		&self.profile_url
	}

	/// Builds the outbound request; the token travels in the `Authorization` header only.
	pub fn profile_request(
		&self,
		access_token: &TokenSecret,
	) -> Result<HttpRequest, TransportError> {
		let authorization =
			access_token.authorization(self.auth_scheme).map_err(oauth2::http::Error::from)?;
		let request = Request::builder()
			.method(Method::GET)
			.uri(self.profile_url.as_str())
			.header(AUTHORIZATION, authorization)
			.header(CLIENT_ID_HEADER, self.client_id.as_str())
			.header(ACCEPT, "application/json")
			.body(Vec::new())?;

		Ok(request)
	}

	/// Performs exactly one request and normalizes the response.
	pub async fn user_profile(&self, access_token: &TokenSecret) -> Result<Profile> {
		let request = self.profile_request(access_token)?;
		let response = self.http_client.send(request).await.map_err(map_transport_error)?;

		classify_response(response)
	}
}
impl<C> Clone for ProfileResolver<C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			profile_url: self.profile_url.clone(),
			client_id: self.client_id.clone(),
			auth_scheme: self.auth_scheme,
		}
	}
}
impl<C> Debug for ProfileResolver<C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ProfileResolver")
			.field("profile_url", &self.profile_url.as_str())
			.field("client_id", &self.client_id)
			.field("auth_scheme", &self.auth_scheme)
			.finish()
	}
}

fn map_transport_error<E>(err: HttpClientError<E>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	let source = match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner },
		HttpClientError::Http(inner) => TransportError::Request(inner),
		HttpClientError::Io(inner) => TransportError::Io(inner),
		HttpClientError::Other(message) => TransportError::Other { message },
		_ => TransportError::Other { message: "unrecognized HTTP client failure".into() },
	};

	Error::ProfileFetch { source }
}

fn classify_response(response: HttpResponse) -> Result<Profile> {
	let status = response.status();
	let body = String::from_utf8_lossy(response.body()).into_owned();

	if status.is_success() {
		return Profile::parse(body);
	}

	Err(map_error_body(status.as_u16(), body))
}

fn map_error_body(status: u16, body: String) -> Error {
	match serde_json::from_str::<ProviderErrorPayload>(&body) {
		Ok(payload) => Error::Provider { message: payload.message, status: payload.status },
		Err(_) => TransportError::Status { status, body: truncate_preview(body) }.into(),
	}
}

fn truncate_preview(body: String) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body;
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;
	use crate::{http::HttpFuture, profile::ProviderStatus};

	struct UnreachableHttpClient;
	impl ProfileHttpClient for UnreachableHttpClient {
		type TransportError = std::io::Error;

		fn send(&self, _request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			let result: Result<HttpResponse, HttpClientError<std::io::Error>> =
				Err(HttpClientError::Other("not connected".into()));

			Box::pin(async move { result })
		}
	}

	fn response(status: u16, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() =
			StatusCode::from_u16(status).expect("Test status code should be valid.");

		response
	}

	#[test]
	fn profile_request_marks_the_token_sensitive() {
		let config = StrategyConfig::builder()
			.client_id("123")
			.client_secret("secret")
			.build()
			.expect("Minimal configuration should build.");
		let resolver = ProfileResolver::<UnreachableHttpClient>::new(&config, UnreachableHttpClient);
		let request =
			resolver.profile_request(&TokenSecret::new("abc")).expect("Request should build.");
		let authorization =
			request.headers().get(AUTHORIZATION).expect("Authorization header should be set.");

		assert!(authorization.is_sensitive());
		assert_eq!(authorization, "Bearer abc");
		assert_eq!(
			request.headers().get(CLIENT_ID_HEADER).and_then(|value| value.to_str().ok()),
			Some("123")
		);
		assert!(matches!(
			resolver.profile_request(&TokenSecret::new("a\nb")),
			Err(TransportError::Request(_))
		));
	}

	#[test]
	fn success_with_json_builds_a_profile() {
		let profile = classify_response(response(200, r#"{"_id":"1","name":"a"}"#))
			.expect("JSON body should resolve.");

		assert_eq!(profile.id, "1");
		assert_eq!(profile.username, "a");
	}

	#[test]
	fn success_with_garbage_is_a_parse_error() {
		let err = classify_response(response(200, "not a JSON")).expect_err("Body is not JSON.");

		assert!(matches!(err, Error::MalformedProfile(_)));
	}

	#[test]
	fn structured_error_payload_is_surfaced() {
		let err = classify_response(response(400, r#"{"message":"MESSAGE","status":"CODE"}"#))
			.expect_err("Error status should fail.");

		match err {
			Error::Provider { message, status } => {
				assert_eq!(message, "MESSAGE");
				assert_eq!(status, Some(ProviderStatus::Text("CODE".into())));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn out_of_range_status_still_surfaces_the_message() {
		let err = classify_response(response(
			401,
			r#"{"message":"invalid oauth token","status":70000}"#,
		))
		.expect_err("Error status should fail.");

		match err {
			Error::Provider { message, status } => {
				assert_eq!(message, "invalid oauth token");
				assert_eq!(status, Some(ProviderStatus::Other(serde_json::json!(70000))));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn unstructured_error_body_is_a_generic_failure() {
		let err =
			classify_response(response(502, "not a JSON")).expect_err("Error status should fail.");

		assert_eq!(err.to_string(), "Failed to fetch user profile.");
		assert!(matches!(
			err,
			Error::ProfileFetch { source: TransportError::Status { status: 502, .. } }
		));
	}

	#[test]
	fn transport_errors_are_wrapped() {
		let err = map_transport_error::<std::io::Error>(HttpClientError::Other("reset".into()));

		assert_eq!(err.to_string(), "Failed to fetch user profile.");
		assert!(matches!(err, Error::ProfileFetch { source: TransportError::Other { .. } }));
	}

	#[test]
	fn long_error_bodies_are_truncated() {
		let preview = truncate_preview("x".repeat(BODY_PREVIEW_LIMIT + 10));

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
	}
}
