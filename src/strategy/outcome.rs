//! Terminal result of a single authentication.

// self
use crate::{_prelude::*, extract::MissingCredential, obs::AuthOutcome};

/// Exactly one of these is produced per `authenticate` call.
#[derive(Debug)]
pub enum Outcome<U> {
	/// The verifier resolved a user.
	Success {
		/// Resolved application user.
		user: U,
		/// Optional verifier-supplied details.
		info: Option<Value>,
	},
	/// Credentials were missing or the verifier declined the identity.
	Fail {
		/// Reason object; `{ "message": ... }` when credentials were missing.
		info: Option<Value>,
	},
	/// Profile resolution or verification failed.
	Error(Error),
}
impl<U> Outcome<U> {
	/// Whether a user was resolved.
	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	/// Whether authentication failed without an error.
	pub fn is_fail(&self) -> bool {
		matches!(self, Self::Fail { .. })
	}

	/// Whether an error was reported.
	pub fn is_error(&self) -> bool {
		matches!(self, Self::Error(_))
	}

	/// Resolved user, if any.
	pub fn user(&self) -> Option<&U> {
		match self {
			Self::Success { user, .. } => Some(user),
			_ => None,
		}
	}

	/// Info payload attached to a success or fail outcome.
	pub fn info(&self) -> Option<&Value> {
		match self {
			Self::Success { info, .. } | Self::Fail { info } => info.as_ref(),
			Self::Error(_) => None,
		}
	}

	/// `message` member of a fail outcome's info payload.
	pub fn fail_message(&self) -> Option<&str> {
		match self {
			Self::Fail { info: Some(info) } => info.get("message").and_then(Value::as_str),
			_ => None,
		}
	}

	/// Reported error, if any.
	pub fn error(&self) -> Option<&Error> {
		match self {
			Self::Error(err) => Some(err),
			_ => None,
		}
	}

	/// Observability label for the outcome.
	pub fn label(&self) -> AuthOutcome {
		match self {
			Self::Success { .. } => AuthOutcome::Success,
			Self::Fail { .. } => AuthOutcome::Fail,
			Self::Error(_) => AuthOutcome::Error,
		}
	}
}
impl<U> From<MissingCredential> for Outcome<U> {
	fn from(missing: MissingCredential) -> Self {
		Self::Fail { info: Some(serde_json::json!({ "message": missing.to_string() })) }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn missing_credential_becomes_a_fail_reason() {
		let outcome: Outcome<()> = MissingCredential { field: "access_token".into() }.into();

		assert!(outcome.is_fail());
		assert_eq!(outcome.fail_message(), Some("You should provide access_token"));
		assert_eq!(outcome.label(), AuthOutcome::Fail);
	}

	#[test]
	fn accessors_follow_the_variant() {
		let outcome = Outcome::Success { user: 7, info: Some(serde_json::json!({ "info": "foo" })) };

		assert_eq!(outcome.user(), Some(&7));
		assert_eq!(outcome.info(), Some(&serde_json::json!({ "info": "foo" })));
		assert!(outcome.error().is_none());
		assert!(outcome.fail_message().is_none());
	}
}
