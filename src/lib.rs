//! Authenticate requests with an access token the caller already obtained from Twitch: extract
//! the token, resolve the Twitch profile, and hand it to your own verification logic.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod http;
pub mod obs;
pub mod profile;
pub mod strategy;
#[cfg(feature = "test")]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// crates.io
	use oauth2::{
		HttpClientError, HttpRequest, HttpResponse,
		http::{HeaderMap, StatusCode},
	};
	// self
	use crate::{
		config::StrategyConfig,
		http::{HttpFuture, ProfileHttpClient},
	};
	#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

	/// Client identifier used by test configurations.
	pub const TEST_CLIENT_ID: &str = "123";
	/// Client secret used by test configurations.
	pub const TEST_CLIENT_SECRET: &str = "shh-its-a-secret";
	/// Profile payload returned by the stubbed profile endpoint.
	pub const PROFILE_FIXTURE: &str = r#"{
		"_id": "12345678",
		"name": "ghaiklor",
		"display_name": "Obrezkov Eugene",
		"email": "ghaiklor@gmail.com",
		"type": "user",
		"bio": null,
		"logo": null
	}"#;

	/// Error emitted by [`StubHttpClient`] when a network failure is scripted.
	#[derive(Debug, ThisError)]
	#[error("Stub transport failure: {0}.")]
	pub struct StubTransportError(pub String);

	/// Scripted reply served by [`StubHttpClient`].
	#[derive(Clone, Debug)]
	pub enum StubReply {
		/// Respond with the provided status and body.
		Response {
			/// HTTP status code.
			status: u16,
			/// Raw response body.
			body: String,
		},
		/// Fail before a response is produced.
		Network(String),
	}
	impl StubReply {
		/// Successful `200 OK` reply carrying `body`.
		pub fn ok(body: impl Into<String>) -> Self {
			Self::Response { status: 200, body: body.into() }
		}

		/// Reply with an arbitrary status code.
		pub fn status(status: u16, body: impl Into<String>) -> Self {
			Self::Response { status, body: body.into() }
		}
	}

	/// Request observed by [`StubHttpClient`].
	#[derive(Clone, Debug)]
	pub struct RecordedRequest {
		/// HTTP method.
		pub method: String,
		/// Request URI.
		pub uri: String,
		/// Request headers.
		pub headers: HeaderMap,
	}
	impl RecordedRequest {
		/// Returns a header value as a string slice.
		pub fn header(&self, name: &str) -> Option<&str> {
			self.headers.get(name).and_then(|value| value.to_str().ok())
		}
	}

	/// In-memory transport that serves scripted replies and records every request.
	///
	/// Replies are consumed in order; the last one keeps being served once the queue drains.
	#[derive(Debug, Default)]
	pub struct StubHttpClient {
		replies: Mutex<VecDeque<StubReply>>,
		requests: Mutex<Vec<RecordedRequest>>,
	}
	impl StubHttpClient {
		/// Creates a stub that always serves `reply`.
		pub fn new(reply: StubReply) -> Self {
			Self::sequence([reply])
		}

		/// Creates a stub serving `replies` in order.
		pub fn sequence(replies: impl IntoIterator<Item = StubReply>) -> Self {
			Self { replies: Mutex::new(replies.into_iter().collect()), requests: Default::default() }
		}

		/// Number of requests dispatched so far.
		pub fn calls(&self) -> usize {
			self.requests.lock().len()
		}

		/// Requests dispatched so far.
		pub fn requests(&self) -> Vec<RecordedRequest> {
			self.requests.lock().clone()
		}

		fn next_reply(&self) -> Option<StubReply> {
			let mut replies = self.replies.lock();

			if replies.len() > 1 { replies.pop_front() } else { replies.front().cloned() }
		}
	}
	impl ProfileHttpClient for StubHttpClient {
		type TransportError = StubTransportError;

		fn send(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
			self.requests.lock().push(RecordedRequest {
				method: request.method().to_string(),
				uri: request.uri().to_string(),
				headers: request.headers().to_owned(),
			});

			let result: Result<HttpResponse, HttpClientError<StubTransportError>> =
				match self.next_reply() {
					Some(StubReply::Response { status, body }) => match StatusCode::from_u16(status) {
						Ok(status) => {
							let mut response = HttpResponse::new(body.into_bytes());

							*response.status_mut() = status;

							Ok(response)
						},
						Err(e) => Err(HttpClientError::Other(e.to_string())),
					},
					Some(StubReply::Network(message)) =>
						Err(HttpClientError::Reqwest(Box::new(StubTransportError(message)))),
					None => Err(HttpClientError::Other("No stub reply scripted.".into())),
				};

			Box::pin(async move { result })
		}
	}

	/// Configuration shared by integration tests.
	pub fn test_config() -> StrategyConfig {
		StrategyConfig::builder()
			.client_id(TEST_CLIENT_ID)
			.client_secret(TEST_CLIENT_SECRET)
			.build()
			.expect("Test strategy configuration should build.")
	}

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	#[cfg(feature = "reqwest")]
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "test")] pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

pub use oauth2;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _, twitch_token_strategy as _};
