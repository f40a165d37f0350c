//! Strategy options and their validating builder.
//!
//! [`StrategyConfig`] is immutable once built. It can be assembled in code through
//! [`StrategyConfigBuilder`] or deserialized from any `serde` format; both paths run the same
//! validation, so a missing `client_id` or `client_secret` is always rejected up front.

// crates.io
use oauth2::{
	AuthUrl, ClientId, ClientSecret, EndpointNotSet, EndpointSet, TokenUrl, basic::BasicClient,
};
// self
use crate::{_prelude::*, error::ConfigError, extract::TokenSource};

/// `oauth2` client carrying the authorization and token endpoints.
pub type ConfiguredOAuth2Client =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Authorization header scheme used for the profile request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
	/// `Authorization: Bearer <token>`.
	#[default]
	Bearer,
	/// `Authorization: OAuth <token>`, accepted by the legacy Kraken API.
	#[serde(rename = "oauth")]
	OAuth,
}
impl AuthScheme {
	/// Returns the header prefix for the scheme.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthScheme::Bearer => "Bearer",
			AuthScheme::OAuth => "OAuth",
		}
	}
}
impl Display for AuthScheme {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Validated strategy options.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "StrategyConfigBuilder")]
pub struct StrategyConfig {
	/// Client identifier, also sent as the `Client-ID` header.
	pub client_id: ClientId,
	/// Client secret.
	pub client_secret: ClientSecret,
	/// Authorization endpoint.
	pub authorization_url: Url,
	/// Token endpoint.
	pub token_url: Url,
	/// Profile endpoint queried for every authentication.
	pub profile_url: Url,
	/// Request field carrying the access token.
	pub access_token_field: String,
	/// Request field carrying the refresh token.
	pub refresh_token_field: String,
	/// Sources searched for tokens, in priority order.
	pub token_sources: Vec<TokenSource>,
	/// Whether the verification callback receives the request.
	pub pass_request_to_callback: bool,
	/// Authorization header scheme.
	pub auth_scheme: AuthScheme,
}
impl StrategyConfig {
	/// Default authorization endpoint.
	pub const DEFAULT_AUTHORIZATION_URL: &str = "https://api.twitch.tv/kraken/oauth2/authorize";
	/// Default token endpoint.
	pub const DEFAULT_TOKEN_URL: &str = "https://api.twitch.tv/kraken/oauth2/token";
	/// Default profile endpoint.
	pub const DEFAULT_PROFILE_URL: &str = "https://api.twitch.tv/kraken/user";
	/// Default access token field name.
	pub const DEFAULT_ACCESS_TOKEN_FIELD: &str = "access_token";
	/// Default refresh token field name.
	pub const DEFAULT_REFRESH_TOKEN_FIELD: &str = "refresh_token";

	/// Creates an empty builder.
	pub fn builder() -> StrategyConfigBuilder {
		StrategyConfigBuilder::default()
	}

	/// Builds an `oauth2` client for the configured authorization and token endpoints.
	pub fn oauth2_client(&self) -> ConfiguredOAuth2Client {
		BasicClient::new(self.client_id.clone())
			.set_client_secret(self.client_secret.clone())
			.set_auth_uri(AuthUrl::from_url(self.authorization_url.clone()))
			.set_token_uri(TokenUrl::from_url(self.token_url.clone()))
	}
}
impl TryFrom<StrategyConfigBuilder> for StrategyConfig {
	type Error = ConfigError;

	fn try_from(builder: StrategyConfigBuilder) -> Result<Self, Self::Error> {
		builder.build()
	}
}

/// Builder for [`StrategyConfig`] values.
///
/// Unset options fall back to the Twitch defaults when [`build`](Self::build) runs.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct StrategyConfigBuilder {
	/// Client identifier (required).
	pub client_id: Option<String>,
	/// Client secret (required).
	pub client_secret: Option<String>,
	/// Authorization endpoint override.
	pub authorization_url: Option<String>,
	/// Token endpoint override.
	pub token_url: Option<String>,
	/// Profile endpoint override.
	pub profile_url: Option<String>,
	/// Access token field override.
	pub access_token_field: Option<String>,
	/// Refresh token field override.
	pub refresh_token_field: Option<String>,
	/// Token source order override.
	pub token_sources: Option<Vec<TokenSource>>,
	/// Whether the verification callback receives the request.
	pub pass_request_to_callback: bool,
	/// Authorization header scheme.
	pub auth_scheme: AuthScheme,
}
impl StrategyConfigBuilder {
	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.client_secret = Some(client_secret.into());

		self
	}

	/// Overrides the authorization endpoint.
	pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
		self.authorization_url = Some(url.into());

		self
	}

	/// Overrides the token endpoint.
	pub fn token_url(mut self, url: impl Into<String>) -> Self {
		self.token_url = Some(url.into());

		self
	}

	/// Overrides the profile endpoint.
	pub fn profile_url(mut self, url: impl Into<String>) -> Self {
		self.profile_url = Some(url.into());

		self
	}

	/// Overrides the access token field name.
	pub fn access_token_field(mut self, field: impl Into<String>) -> Self {
		self.access_token_field = Some(field.into());

		self
	}

	/// Overrides the refresh token field name.
	pub fn refresh_token_field(mut self, field: impl Into<String>) -> Self {
		self.refresh_token_field = Some(field.into());

		self
	}

	/// Overrides the token source order.
	pub fn token_sources<I>(mut self, sources: I) -> Self
	where
		I: IntoIterator<Item = TokenSource>,
	{
		self.token_sources = Some(sources.into_iter().collect());

		self
	}

	/// Passes the request to the verification callback.
	pub fn pass_request_to_callback(mut self, enabled: bool) -> Self {
		self.pass_request_to_callback = enabled;

		self
	}

	/// Overrides the authorization header scheme.
	pub fn auth_scheme(mut self, scheme: AuthScheme) -> Self {
		self.auth_scheme = scheme;

		self
	}

	/// Consumes the builder and validates the resulting options.
	pub fn build(self) -> Result<StrategyConfig, ConfigError> {
		let client_id = self
			.client_id
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingClientId)?;
		let client_secret = self
			.client_secret
			.filter(|value| !value.is_empty())
			.ok_or(ConfigError::MissingClientSecret)?;
		let authorization_url = parse_endpoint(
			"authorization",
			self.authorization_url.as_deref(),
			StrategyConfig::DEFAULT_AUTHORIZATION_URL,
		)?;
		let token_url =
			parse_endpoint("token", self.token_url.as_deref(), StrategyConfig::DEFAULT_TOKEN_URL)?;
		let profile_url = parse_endpoint(
			"profile",
			self.profile_url.as_deref(),
			StrategyConfig::DEFAULT_PROFILE_URL,
		)?;
		let access_token_field = field_name(
			"access_token_field",
			self.access_token_field,
			StrategyConfig::DEFAULT_ACCESS_TOKEN_FIELD,
		)?;
		let refresh_token_field = field_name(
			"refresh_token_field",
			self.refresh_token_field,
			StrategyConfig::DEFAULT_REFRESH_TOKEN_FIELD,
		)?;
		let token_sources = self.token_sources.unwrap_or_else(|| TokenSource::DEFAULT_ORDER.into());

		if token_sources.is_empty() {
			return Err(ConfigError::NoTokenSources);
		}

		Ok(StrategyConfig {
			client_id: ClientId::new(client_id),
			client_secret: ClientSecret::new(client_secret),
			authorization_url,
			token_url,
			profile_url,
			access_token_field,
			refresh_token_field,
			token_sources,
			pass_request_to_callback: self.pass_request_to_callback,
			auth_scheme: self.auth_scheme,
		})
	}
}
impl Debug for StrategyConfigBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyConfigBuilder")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("authorization_url", &self.authorization_url)
			.field("token_url", &self.token_url)
			.field("profile_url", &self.profile_url)
			.field("access_token_field", &self.access_token_field)
			.field("refresh_token_field", &self.refresh_token_field)
			.field("token_sources", &self.token_sources)
			.field("pass_request_to_callback", &self.pass_request_to_callback)
			.field("auth_scheme", &self.auth_scheme)
			.finish()
	}
}

fn parse_endpoint(
	endpoint: &'static str,
	value: Option<&str>,
	default: &str,
) -> Result<Url, ConfigError> {
	let url = Url::parse(value.unwrap_or(default))
		.map_err(|source| ConfigError::InvalidUrl { endpoint, source })?;

	match url.scheme() {
		"https" | "http" => Ok(url),
		_ => Err(ConfigError::UnsupportedScheme { endpoint, url: url.to_string() }),
	}
}

fn field_name(
	option: &'static str,
	value: Option<String>,
	default: &str,
) -> Result<String, ConfigError> {
	match value {
		Some(value) if value.is_empty() => Err(ConfigError::EmptyFieldName { option }),
		Some(value) => Ok(value),
		None => Ok(default.to_owned()),
	}
}
