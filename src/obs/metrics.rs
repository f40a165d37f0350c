// self
use crate::obs::AuthOutcome;

/// Records an authentication outcome via the global metrics recorder (when enabled).
pub fn record_auth_outcome(outcome: AuthOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("twitch_token_authenticate_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(feature = "tracing")]
	{
		if !matches!(outcome, AuthOutcome::Attempt) {
			tracing::debug!(outcome = outcome.as_str(), "Authentication finished.");
		}
	}

	#[cfg(not(any(feature = "metrics", feature = "tracing")))]
	{
		let _ = outcome;
	}
}
