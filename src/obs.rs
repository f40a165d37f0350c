//! Optional observability helpers for the authenticate pipeline.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap every call in a `twitch_token.authenticate` span. The span's
//!   `stage`, `source` (where the access token was found), and `outcome` fields are filled in as
//!   the pipeline advances, and a `debug` event marks every terminal outcome.
//! - Enable `metrics` to increment the `twitch_token_authenticate_total` counter for every
//!   attempt/success/fail/error, labeled by `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Non-terminal stages of a single authentication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthStage {
	/// Reading credentials from the request.
	ExtractingToken,
	/// Calling the profile endpoint.
	FetchingProfile,
	/// Running the application's verification callback.
	Verifying,
}
impl AuthStage {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthStage::ExtractingToken => "extracting_token",
			AuthStage::FetchingProfile => "fetching_profile",
			AuthStage::Verifying => "verifying",
		}
	}
}
impl Display for AuthStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each authentication.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuthOutcome {
	/// Entry to `authenticate`.
	Attempt,
	/// A user was resolved.
	Success,
	/// Credentials were missing or the verifier declined.
	Fail,
	/// Profile resolution or verification errored.
	Error,
}
impl AuthOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthOutcome::Attempt => "attempt",
			AuthOutcome::Success => "success",
			AuthOutcome::Fail => "fail",
			AuthOutcome::Error => "error",
		}
	}
}
impl Display for AuthOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
