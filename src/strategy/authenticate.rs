//! Linear authenticate pipeline: extract → fetch profile → verify.

// self
use crate::{
	_prelude::*,
	extract::RequestParts,
	http::ProfileHttpClient,
	obs::{self, AuthOutcome, AuthSpan, AuthStage},
	strategy::{
		AuthStrategy, Outcome, StrategyFuture, TwitchTokenStrategy, Verification, VerifyContext,
	},
};

impl<U, C> TwitchTokenStrategy<U, C>
where
	U: 'static + Send,
	C: ?Sized + ProfileHttpClient,
{
	/// Runs the pipeline for `request` and records the outcome.
	pub async fn authenticate_request(&self, request: &RequestParts) -> Outcome<U> {
		obs::record_auth_outcome(AuthOutcome::Attempt);

		let span = AuthSpan::new(Self::NAME);
		let outcome = span.instrument(self.run(request, &span)).await;

		span.record_outcome(outcome.label());
		obs::record_auth_outcome(outcome.label());

		outcome
	}

	async fn run(&self, request: &RequestParts, span: &AuthSpan) -> Outcome<U> {
		span.record_stage(AuthStage::ExtractingToken);

		let credentials = match self.extractor.extract(request) {
			Ok(credentials) => credentials,
			Err(missing) => return missing.into(),
		};

		span.record_source(credentials.source);
		span.record_stage(AuthStage::FetchingProfile);

		let profile = match self.resolver.user_profile(&credentials.access_token).await {
			Ok(profile) => profile,
			Err(err) => return Outcome::Error(err),
		};

		span.record_stage(AuthStage::Verifying);

		let context = VerifyContext {
			request: self.config.pass_request_to_callback.then(|| request.clone()),
			credentials,
			profile,
		};

		match self.verifier.verify(context).await {
			Ok(Verification::Verified { user, info }) => Outcome::Success { user, info },
			Ok(Verification::Rejected { info }) => Outcome::Fail { info },
			Err(source) => Outcome::Error(Error::Verification { source }),
		}
	}
}
impl<U, C> AuthStrategy for TwitchTokenStrategy<U, C>
where
	U: 'static + Send,
	C: ?Sized + ProfileHttpClient,
{
	type User = U;

	fn name(&self) -> &str {
		Self::NAME
	}

	fn authenticate<'a>(
		&'a self,
		request: &'a RequestParts,
	) -> StrategyFuture<'a, Outcome<Self::User>> {
		Box::pin(self.authenticate_request(request))
	}
}
