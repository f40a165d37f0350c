//! Demonstrates authenticating a form-encoded request that carries a Twitch access token,
//! with the profile endpoint served by a local mock.

// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
// self
use twitch_token_strategy::{
	config::StrategyConfig,
	extract::RequestParts,
	http::ReqwestHttpClient,
	profile::Profile,
	reqwest::Client,
	strategy::{
		AuthStrategy, Outcome, ReqwestTwitchTokenStrategy, TwitchTokenStrategy, Verification,
		VerifyContext, VerifyResult,
	},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let profile_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/kraken/user").header("authorization", "Bearer demo-access");
			then.status(200).header("content-type", "application/json").body(
				"{\"_id\":\"12345678\",\"name\":\"ghaiklor\",\"display_name\":\"Obrezkov Eugene\",\
				 \"email\":\"ghaiklor@gmail.com\"}",
			);
		})
		.await;
	let config = StrategyConfig::builder()
		.client_id("demo-client")
		.client_secret("super-secret")
		.profile_url(server.url("/kraken/user"))
		.pass_request_to_callback(true)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(Client::builder().build()?);
	let verifier = |ctx: VerifyContext| async move {
		let remote = ctx.request.as_ref().and_then(|request| request.body.get("state")).cloned();
		let Profile { username, emails, .. } = ctx.profile;

		match emails.first() {
			Some(email) => VerifyResult::Ok(Verification::verified(format!(
				"{username} <{}> (state: {})",
				email.value,
				remote.unwrap_or_default()
			))),
			None => VerifyResult::Ok(Verification::rejected()),
		}
	};
	let strategy: ReqwestTwitchTokenStrategy<String> =
		TwitchTokenStrategy::with_http_client(config, http_client, verifier);
	let request = RequestParts::new().with_form_body(b"access_token=demo-access&state=demo");

	match strategy.authenticate(&request).await {
		Outcome::Success { user, .. } => println!("Authenticated {user} via {}.", strategy.name()),
		Outcome::Fail { info } => println!("Authentication failed: {info:?}."),
		Outcome::Error(err) => return Err(eyre!(err)),
	}

	profile_mock.assert_async().await;

	Ok(())
}
