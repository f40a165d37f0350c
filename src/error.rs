//! Strategy-level error types shared across extraction, profile resolution, and verification.

// self
use crate::{_prelude::*, profile::ProviderStatus};

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error accepted from transports and verification callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error delivered through the error outcome.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// The profile endpoint could not be reached or answered without a structured error.
	#[error("Failed to fetch user profile.")]
	ProfileFetch {
		/// Underlying transport failure.
		#[source]
		source: TransportError,
	},
	/// The provider answered with a structured error payload.
	#[error("{message}")]
	Provider {
		/// Provider-supplied message.
		message: String,
		/// Provider-supplied status, when present.
		status: Option<ProviderStatus>,
	},
	/// The profile endpoint returned a body that is not valid JSON.
	#[error(transparent)]
	MalformedProfile(#[from] serde_json::Error),
	/// The application's verification callback failed.
	#[error("{source}")]
	Verification {
		/// Error reported by the callback, untouched.
		#[source]
		source: BoxError,
	},
}
impl From<TransportError> for Error {
	fn from(source: TransportError) -> Self {
		Self::ProfileFetch { source }
	}
}

/// Configuration and validation failures raised while building a strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `client_id` was not supplied.
	#[error("Strategy requires a client_id.")]
	MissingClientId,
	/// `client_secret` was not supplied.
	#[error("Strategy requires a client_secret.")]
	MissingClientSecret,
	/// An endpoint option is not a valid URL.
	#[error("The {endpoint} URL is invalid.")]
	InvalidUrl {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint option uses a scheme other than HTTP(S).
	#[error("The {endpoint} URL must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// A token field name is empty.
	#[error("The {option} option cannot be empty.")]
	EmptyFieldName {
		/// Option name.
		option: &'static str,
	},
	/// No token source was configured.
	#[error("At least one token source must be configured.")]
	NoTokenSources,
}

/// Transport-level failures while calling the profile endpoint.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the profile endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the profile endpoint.")]
	Io(#[from] std::io::Error),
	/// The outbound request could not be assembled (e.g. the token is not a valid header value).
	#[error("Profile request could not be constructed.")]
	Request(#[from] oauth2::http::Error),
	/// The profile endpoint answered with a non-success status.
	#[error("Profile endpoint responded with HTTP {status}: {body}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Preview of the response body.
		body: String,
	},
	/// Transport failure described only by a message.
	#[error("HTTP client error occurred while calling the profile endpoint: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_fetch_uses_generic_message() {
		let err = Error::from(TransportError::Other { message: "boom".into() });

		assert_eq!(err.to_string(), "Failed to fetch user profile.");
		assert!(StdError::source(&err).is_some());
	}

	#[test]
	fn provider_errors_display_the_provider_message() {
		let err = Error::Provider { message: "invalid oauth token".into(), status: None };

		assert_eq!(err.to_string(), "invalid oauth token");
	}

	#[test]
	fn verification_errors_keep_their_message() {
		let source: BoxError = "user store offline".into();
		let err = Error::Verification { source };

		assert_eq!(err.to_string(), "user store offline");
	}
}
