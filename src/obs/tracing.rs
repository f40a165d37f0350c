// self
use crate::{
	_prelude::*,
	extract::TokenSource,
	obs::{AuthOutcome, AuthStage},
};

/// Pipeline future, wrapped in the authenticate span when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedStage<F> = tracing::instrument::Instrumented<F>;
/// Pipeline future, unchanged when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedStage<F> = F;

/// One `twitch_token.authenticate` span per call.
///
/// The span opens with empty `stage`, `source`, and `outcome` fields. The pipeline fills them
/// as it advances, so the closed span tells where the token came from and how the call ended.
#[derive(Clone, Debug)]
pub struct AuthSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl AuthSpan {
	/// Opens the span for `strategy`.
	pub fn new(strategy: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"twitch_token.authenticate",
				strategy,
				stage = tracing::field::Empty,
				source = tracing::field::Empty,
				outcome = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = strategy;

			Self {}
		}
	}

	/// Marks the stage the pipeline is entering.
	pub fn record_stage(&self, stage: AuthStage) {
		self.record("stage", stage.as_str());
	}

	/// Records the request location that supplied the access token.
	pub fn record_source(&self, source: TokenSource) {
		self.record("source", source.as_str());
	}

	/// Records the terminal outcome.
	pub fn record_outcome(&self, outcome: AuthOutcome) {
		self.record("outcome", outcome.as_str());
	}

	/// Runs `fut` inside the span.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedStage<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}

	fn record(&self, field: &'static str, value: &'static str) {
		#[cfg(feature = "tracing")]
		{
			self.span.record(field, value);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (field, value);
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn records_fields_around_an_instrumented_future() {
		let span = AuthSpan::new("twitch-token");
		let value = span
			.instrument(async {
				span.record_stage(AuthStage::ExtractingToken);
				span.record_source(TokenSource::Query);

				42
			})
			.await;

		span.record_outcome(AuthOutcome::Success);

		assert_eq!(value, 42);
	}
}
