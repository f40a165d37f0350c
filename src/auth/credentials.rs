//! Credential pair pulled from an inbound request.

// self
use crate::{auth::TokenSecret, extract::TokenSource};

/// Access token (required) and refresh token (optional) supplied by the caller.
///
/// Values are only checked for presence; their format is opaque to the strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
	/// Access token used to resolve the profile.
	pub access_token: TokenSecret,
	/// Refresh token, when the caller sent one.
	pub refresh_token: Option<TokenSecret>,
	/// Request location the access token was read from.
	pub source: TokenSource,
}
impl Credentials {
	/// Creates credentials without a refresh token.
	pub fn new(access_token: TokenSecret, source: TokenSource) -> Self {
		Self { access_token, refresh_token: None, source }
	}

	/// Attaches a refresh token.
	pub fn with_refresh_token(mut self, refresh_token: TokenSecret) -> Self {
		self.refresh_token = Some(refresh_token);

		self
	}

	/// Refresh token value, or an empty string when absent.
	pub fn refresh_token_or_empty(&self) -> &str {
		self.refresh_token.as_ref().map(TokenSecret::expose).unwrap_or_default()
	}
}
