//! Transport seam for the authenticated profile request.
//!
//! The strategy never talks to an HTTP stack directly. It assembles an `oauth2`
//! [`HttpRequest`] (method, URL, authorization headers) and hands it to a
//! [`ProfileHttpClient`]. Implementations only execute the request and return the raw
//! [`HttpResponse`]; status classification and JSON handling stay in the profile resolver,
//! so swapping transports never changes how failures are reported.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{HttpClientError, HttpRequest, HttpResponse};
// self
use crate::_prelude::*;

/// Future returned by [`ProfileHttpClient::send`].
pub type HttpFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the profile request.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can be shared by
/// every request a strategy serves. Timeouts and retries, if any, belong here rather than in
/// the strategy.
pub trait ProfileHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Executes `request` and resolves with the response, whatever its status.
	fn send(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ProfileHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn send(&self, request: HttpRequest) -> HttpFuture<'_, Self::TransportError> {
		Box::pin(execute_reqwest(self.0.clone(), request))
	}
}

#[cfg(feature = "reqwest")]
async fn execute_reqwest(
	client: ReqwestClient,
	request: HttpRequest,
) -> Result<HttpResponse, HttpClientError<ReqwestError>> {
	let response =
		client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
	let status = response.status();
	let headers = response.headers().to_owned();
	let mut response_new = HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

	*response_new.status_mut() = status;
	*response_new.headers_mut() = headers;

	Ok(response_new)
}
