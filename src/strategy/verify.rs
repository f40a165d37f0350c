//! Application-supplied verification seam.
//!
//! A verifier maps a resolved Twitch identity onto the application's own user record (or
//! declines to). It always receives a [`VerifyContext`]; the `request` member is populated
//! only when the strategy was configured with `pass_request_to_callback`.
//!
//! Async closures implement [`Verifier`] directly:
//!
//! ```ignore
//! let verifier = |ctx: VerifyContext| async move {
//! 	VerifyResult::Ok(Verification::verified(ctx.profile.id))
//! };
//! ```

// self
use crate::{_prelude::*, auth::Credentials, extract::RequestParts, profile::Profile};

/// Result produced by a [`Verifier`].
pub type VerifyResult<U> = Result<Verification<U>, BoxError>;
/// Boxed future returned by [`Verifier::verify`].
pub type VerifyFuture<'a, U> = Pin<Box<dyn Future<Output = VerifyResult<U>> + 'a + Send>>;

/// Everything a verifier may inspect.
#[derive(Clone, Debug)]
pub struct VerifyContext {
	/// Inbound request, present only when the strategy passes it through.
	pub request: Option<RequestParts>,
	/// Credentials extracted from the request.
	pub credentials: Credentials,
	/// Freshly resolved profile.
	pub profile: Profile,
}
impl VerifyContext {
	/// Access token value.
	pub fn access_token(&self) -> &str {
		self.credentials.access_token.expose()
	}

	/// Refresh token value, when one was sent.
	pub fn refresh_token(&self) -> Option<&str> {
		self.credentials.refresh_token.as_ref().map(|token| token.expose())
	}
}

/// Verdict returned by a [`Verifier`].
#[derive(Clone, Debug, PartialEq)]
pub enum Verification<U> {
	/// The identity maps to `user`.
	Verified {
		/// Application user.
		user: U,
		/// Optional details forwarded to the success outcome.
		info: Option<Value>,
	},
	/// The identity is not accepted.
	Rejected {
		/// Optional details forwarded to the fail outcome.
		info: Option<Value>,
	},
}
impl<U> Verification<U> {
	/// Accepts the identity as `user`.
	pub fn verified(user: U) -> Self {
		Self::Verified { user, info: None }
	}

	/// Declines the identity.
	pub fn rejected() -> Self {
		Self::Rejected { info: None }
	}

	/// Attaches an info payload.
	pub fn with_info(self, info: Value) -> Self {
		match self {
			Self::Verified { user, .. } => Self::Verified { user, info: Some(info) },
			Self::Rejected { .. } => Self::Rejected { info: Some(info) },
		}
	}
}

/// Maps a resolved identity onto an application user.
pub trait Verifier
where
	Self: Send + Sync,
{
	/// Application user type.
	type User: Send;

	/// Resolves (or declines) the identity in `context`.
	fn verify(&self, context: VerifyContext) -> VerifyFuture<'_, Self::User>;
}
impl<F, Fut, U> Verifier for F
where
	F: Send + Sync + Fn(VerifyContext) -> Fut,
	Fut: 'static + Send + Future<Output = VerifyResult<U>>,
	U: Send,
{
	type User = U;

	fn verify(&self, context: VerifyContext) -> VerifyFuture<'_, Self::User> {
		Box::pin(self(context))
	}
}
