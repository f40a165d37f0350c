//! Redacted holder for tokens read from an inbound request.

// crates.io
use oauth2::http::{HeaderValue, header::InvalidHeaderValue};
// self
use crate::{_prelude::*, config::AuthScheme};

/// Access or refresh token sent by the caller.
///
/// Formatting never reveals the value. It leaves the crate only through
/// [`expose`](Self::expose) and the header built by [`authorization`](Self::authorization).
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a token value as-is.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Wraps `value` unless it is empty; an empty request field counts as absent.
	pub fn non_empty(value: &str) -> Option<Self> {
		(!value.is_empty()).then(|| Self(value.to_owned()))
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Builds the `Authorization` header value for `scheme`.
	///
	/// The value is flagged sensitive, so `http`'s debug output prints `Sensitive` in its place.
	pub fn authorization(&self, scheme: AuthScheme) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::try_from(format!("{scheme} {}", self.0))?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_values_are_absent() {
		assert!(TokenSecret::non_empty("").is_none());
		assert_eq!(TokenSecret::non_empty("abc").map(|secret| secret.0), Some("abc".into()));
	}

	#[test]
	fn authorization_header_is_sensitive() {
		let secret = TokenSecret::new("twitch-access-token");
		let bearer = secret.authorization(AuthScheme::Bearer).expect("Token is a valid header.");

		assert!(bearer.is_sensitive());
		assert_eq!(bearer.to_str().ok(), Some("Bearer twitch-access-token"));
		assert_eq!(format!("{bearer:?}"), "Sensitive");
		assert_eq!(
			secret.authorization(AuthScheme::OAuth).expect("Token is a valid header."),
			"OAuth twitch-access-token"
		);
		assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
	}

	#[test]
	fn control_characters_are_rejected() {
		assert!(TokenSecret::new("abc\ndef").authorization(AuthScheme::Bearer).is_err());
	}
}
