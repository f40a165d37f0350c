// crates.io
use serde_json::json;
// self
use twitch_token_strategy::{
	_preludet::*,
	config::{AuthScheme, StrategyConfig},
	error::TransportError,
	extract::{RequestParts, TokenSource},
	profile::{Profile, ProviderStatus},
	strategy::{
		AuthStrategy, Outcome, TwitchTokenStrategy, Verification, VerifyContext, VerifyResult,
	},
};

type StubStrategy<U> = TwitchTokenStrategy<U, StubHttpClient>;

#[derive(Clone, Debug, PartialEq)]
struct SeenContext {
	access_token: String,
	refresh_token: Option<String>,
	request_passed: bool,
	profile: Profile,
}

fn recording_strategy(
	config: StrategyConfig,
	http: Arc<StubHttpClient>,
) -> StubStrategy<SeenContext> {
	TwitchTokenStrategy::with_http_client(config, http, |ctx: VerifyContext| async move {
		let seen = SeenContext {
			access_token: ctx.access_token().to_owned(),
			refresh_token: ctx.refresh_token().map(str::to_owned),
			request_passed: ctx.request.is_some(),
			profile: ctx.profile,
		};

		VerifyResult::Ok(Verification::verified(seen).with_info(json!({ "info": "foo" })))
	})
}

fn body_request() -> RequestParts {
	RequestParts::new()
		.with_body_field("access_token", "access_token")
		.with_body_field("refresh_token", "refresh_token")
}

#[tokio::test]
async fn authenticates_with_token_from_body() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy = recording_strategy(test_config(), http.clone());
	let outcome = strategy.authenticate(&body_request()).await;
	let seen = outcome.user().expect("Body token should authenticate.");

	assert_eq!(strategy.name(), "twitch-token");
	assert_eq!(seen.access_token, "access_token");
	assert_eq!(seen.refresh_token.as_deref(), Some("refresh_token"));
	assert!(!seen.request_passed);
	assert_eq!(seen.profile.id, "12345678");
	assert_eq!(seen.profile.name.family_name, "Obrezkov");
	assert_eq!(outcome.info(), Some(&json!({ "info": "foo" })));
	assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn authenticates_with_token_from_query() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy = recording_strategy(test_config(), http.clone());
	let request = RequestParts::new()
		.with_query_string("access_token=access_token&refresh_token=refresh_token");
	let outcome = strategy.authenticate(&request).await;
	let seen = outcome.user().expect("Query token should authenticate.");

	assert_eq!(seen.access_token, "access_token");
	assert_eq!(seen.refresh_token.as_deref(), Some("refresh_token"));
	assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn body_token_wins_over_query_token() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy = recording_strategy(test_config(), http.clone());
	let request = RequestParts::new()
		.with_body_field("access_token", "body-token")
		.with_query_field("access_token", "query-token");
	let outcome = strategy.authenticate(&request).await;
	let seen = outcome.user().expect("Body token should authenticate.");

	assert_eq!(seen.access_token, "body-token");
	assert_eq!(seen.refresh_token, None);
	assert_eq!(
		http.requests()[0].header("authorization"),
		Some("Bearer body-token"),
		"Only the body token may reach the provider."
	);
}

#[tokio::test]
async fn missing_token_fails_without_network_call() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy = recording_strategy(test_config(), http.clone());
	let outcome = strategy.authenticate(&RequestParts::new()).await;

	assert!(outcome.is_fail());
	assert_eq!(outcome.fail_message(), Some("You should provide access_token"));
	assert_eq!(http.calls(), 0);
}

#[tokio::test]
async fn missing_token_message_uses_the_configured_field() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let config = StrategyConfig::builder()
		.client_id(TEST_CLIENT_ID)
		.client_secret(TEST_CLIENT_SECRET)
		.access_token_field("twitch_token")
		.build()
		.expect("Custom field configuration should build.");
	let strategy = recording_strategy(config, http.clone());
	let outcome = strategy.authenticate(&body_request()).await;

	assert_eq!(outcome.fail_message(), Some("You should provide twitch_token"));
	assert_eq!(http.calls(), 0);

	let outcome =
		strategy.authenticate(&RequestParts::new().with_body_field("twitch_token", "abc")).await;

	assert_eq!(outcome.user().map(|seen| seen.access_token.as_str()), Some("abc"));
}

#[tokio::test]
async fn header_source_is_opt_in() {
	let request = RequestParts::new().with_header("access_token", "header-token");
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let default_strategy = recording_strategy(test_config(), http.clone());

	assert!(default_strategy.authenticate(&request).await.is_fail());

	let config = StrategyConfig::builder()
		.client_id(TEST_CLIENT_ID)
		.client_secret(TEST_CLIENT_SECRET)
		.token_sources([TokenSource::Body, TokenSource::Query, TokenSource::Header])
		.build()
		.expect("Header source configuration should build.");
	let strategy = recording_strategy(config, http.clone());
	let outcome = strategy.authenticate(&request).await;

	assert_eq!(outcome.user().map(|seen| seen.access_token.as_str()), Some("header-token"));
	assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn passes_request_to_verifier_when_enabled() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let config = StrategyConfig::builder()
		.client_id(TEST_CLIENT_ID)
		.client_secret(TEST_CLIENT_SECRET)
		.pass_request_to_callback(true)
		.build()
		.expect("Pass-through configuration should build.");
	let strategy: StubStrategy<usize> =
		TwitchTokenStrategy::with_http_client(config, http, |ctx: VerifyContext| async move {
			let request = ctx.request.expect("Request should be passed to the verifier.");
			let info = json!({ "info": "foo" });

			VerifyResult::Ok(Verification::verified(request.body.len()).with_info(info))
		});
	let outcome = strategy.authenticate(&body_request()).await;

	assert_eq!(outcome.user(), Some(&2));
	assert_eq!(outcome.info(), Some(&json!({ "info": "foo" })));
}

#[tokio::test]
async fn sends_authorization_and_client_id_headers() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy = recording_strategy(test_config(), http.clone());

	strategy.authenticate(&body_request()).await;

	let requests = http.requests();
	let request = &requests[0];

	assert_eq!(request.method, "GET");
	assert_eq!(request.uri, StrategyConfig::DEFAULT_PROFILE_URL);
	assert_eq!(request.header("authorization"), Some("Bearer access_token"));
	assert_eq!(request.header("client-id"), Some(TEST_CLIENT_ID));
	assert!(!request.uri.contains("access_token="), "Token must not leak into the URL.");

	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let config = StrategyConfig::builder()
		.client_id(TEST_CLIENT_ID)
		.client_secret(TEST_CLIENT_SECRET)
		.auth_scheme(AuthScheme::OAuth)
		.build()
		.expect("Legacy scheme configuration should build.");
	let strategy = recording_strategy(config, http.clone());

	strategy.authenticate(&body_request()).await;

	assert_eq!(http.requests()[0].header("authorization"), Some("OAuth access_token"));
}

#[tokio::test]
async fn verifier_rejection_becomes_fail_with_info() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy: StubStrategy<()> =
		TwitchTokenStrategy::with_http_client(test_config(), http, |_ctx: VerifyContext| async move {
			VerifyResult::Ok(Verification::rejected().with_info(json!({ "message": "banned" })))
		});
	let outcome = strategy.authenticate(&body_request()).await;

	assert!(outcome.is_fail());
	assert_eq!(outcome.fail_message(), Some("banned"));
}

#[tokio::test]
async fn verifier_errors_pass_through() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy: StubStrategy<()> =
		TwitchTokenStrategy::with_http_client(test_config(), http, |_ctx: VerifyContext| async move {
			VerifyResult::Err("user store offline".into())
		});
	let outcome = strategy.authenticate(&body_request()).await;

	match outcome {
		Outcome::Error(Error::Verification { source }) =>
			assert_eq!(source.to_string(), "user store offline"),
		other => panic!("Unexpected outcome: {other:?}."),
	}
}

#[tokio::test]
async fn profile_errors_skip_verification() {
	let http = Arc::new(StubHttpClient::new(StubReply::Network("connection reset".into())));
	let verifier =
		|_ctx: VerifyContext| async move { VerifyResult::Err("verifier must not run".into()) };
	let strategy: StubStrategy<()> =
		TwitchTokenStrategy::with_http_client(test_config(), http.clone(), verifier);
	let outcome = strategy.authenticate(&body_request()).await;

	assert!(
		matches!(outcome.error(), Some(Error::ProfileFetch { source: TransportError::Network { .. } })),
		"Unexpected outcome: {outcome:?}."
	);
	assert_eq!(http.calls(), 1);
}

#[tokio::test]
async fn user_profile_maps_provider_failures() {
	let http = Arc::new(StubHttpClient::sequence([
		StubReply::ok("not a JSON"),
		StubReply::status(
			401,
			r#"{"error":"Unauthorized","status":401,"message":"invalid oauth token"}"#,
		),
		StubReply::status(500, "not a JSON"),
		StubReply::Network("ERROR".into()),
	]));
	let strategy = recording_strategy(test_config(), http.clone());
	let err = strategy.user_profile("accessToken").await.expect_err("Body is not JSON.");

	assert!(matches!(err, Error::MalformedProfile(_)));

	match strategy.user_profile("accessToken").await {
		Err(Error::Provider { message, status }) => {
			assert_eq!(message, "invalid oauth token");
			assert_eq!(status, Some(ProviderStatus::Code(401)));
		},
		other => panic!("Unexpected result: {other:?}."),
	}

	let err = strategy.user_profile("accessToken").await.expect_err("Server error should fail.");

	assert_eq!(err.to_string(), "Failed to fetch user profile.");

	let err = strategy.user_profile("accessToken").await.expect_err("Network error should fail.");

	assert_eq!(err.to_string(), "Failed to fetch user profile.");
	assert_eq!(http.calls(), 4);
}

#[tokio::test]
async fn repeated_calls_produce_identical_outcomes() {
	let http = Arc::new(StubHttpClient::new(StubReply::ok(PROFILE_FIXTURE)));
	let strategy = recording_strategy(test_config(), http.clone());
	let request = body_request();
	let first = strategy.authenticate(&request).await;
	let second = strategy.authenticate(&request).await;

	assert_eq!(first.user(), second.user());
	assert_eq!(first.info(), second.info());
	assert_eq!(http.calls(), 2);

	let first = strategy.authenticate(&RequestParts::new()).await;
	let second = strategy.authenticate(&RequestParts::new()).await;

	assert_eq!(first.fail_message(), second.fail_message());
}
