//! Inbound request view and the ordered access-token extractor.
//!
//! [`RequestParts`] is a framework-neutral snapshot of the three string maps the strategy may
//! read (body, query, headers). [`TokenExtractor`] walks the configured [`TokenSource`] list in
//! order and returns the first non-empty value for each token field.

// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenSecret},
	config::StrategyConfig,
};

/// Location a token may be read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenSource {
	/// Parsed request body (form or JSON members).
	Body,
	/// URL query parameters.
	Query,
	/// Request headers, matched case-insensitively against the field name.
	Header,
}
impl TokenSource {
	/// Order used when no sources are configured explicitly.
	pub const DEFAULT_ORDER: [TokenSource; 2] = [TokenSource::Body, TokenSource::Query];

	/// Returns a stable label suitable for span or log fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenSource::Body => "body",
			TokenSource::Query => "query",
			TokenSource::Header => "header",
		}
	}
}
impl Display for TokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Framework-neutral view of an inbound request.
///
/// Header names are stored lowercased so lookups ignore case.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParts {
	/// Parsed body members.
	pub body: HashMap<String, String>,
	/// Query parameters.
	pub query: HashMap<String, String>,
	/// Headers keyed by lowercased name.
	pub headers: HashMap<String, String>,
}
impl RequestParts {
	/// Creates an empty request view.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a request view from a URL's query pairs.
	pub fn from_url(url: &Url) -> Self {
		Self::new().with_query_string(url.query().unwrap_or_default())
	}

	/// Sets a body member.
	pub fn with_body_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.body.insert(name.into(), value.into());

		self
	}

	/// Sets a query parameter.
	pub fn with_query_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(name.into(), value.into());

		self
	}

	/// Sets a header.
	pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
		self.headers.insert(name.as_ref().to_ascii_lowercase(), value.into());

		self
	}

	/// Merges the pairs of a raw (`a=1&b=2`) query string.
	pub fn with_query_string(mut self, query: &str) -> Self {
		self.query.extend(url::form_urlencoded::parse(query.as_bytes()).into_owned());

		self
	}

	/// Merges an `application/x-www-form-urlencoded` body.
	pub fn with_form_body(mut self, body: &[u8]) -> Self {
		self.body.extend(url::form_urlencoded::parse(body).into_owned());

		self
	}

	/// Merges the string members of a JSON object body; other members are ignored.
	pub fn with_json_body(mut self, body: &Value) -> Self {
		if let Some(members) = body.as_object() {
			self.body.extend(members.iter().filter_map(|(name, value)| {
				value.as_str().map(|value| (name.to_owned(), value.to_owned()))
			}));
		}

		self
	}

	/// Returns the value stored under `name` in `source`, empty or not.
	pub fn field(&self, source: TokenSource, name: &str) -> Option<&str> {
		let value = match source {
			TokenSource::Body => self.body.get(name),
			TokenSource::Query => self.query.get(name),
			TokenSource::Header => self.headers.get(&name.to_ascii_lowercase()),
		};

		value.map(String::as_str)
	}
}

/// Raised when no access token is present in any configured source.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("You should provide {field}")]
pub struct MissingCredential {
	/// Configured access token field name.
	pub field: String,
}

/// Locates credentials in a request following a fixed source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenExtractor {
	access_token_field: String,
	refresh_token_field: String,
	sources: Vec<TokenSource>,
}
impl TokenExtractor {
	/// Creates an extractor for the given field names and source order.
	pub fn new(
		access_token_field: impl Into<String>,
		refresh_token_field: impl Into<String>,
		sources: impl IntoIterator<Item = TokenSource>,
	) -> Self {
		Self {
			access_token_field: access_token_field.into(),
			refresh_token_field: refresh_token_field.into(),
			sources: sources.into_iter().collect(),
		}
	}

	/// Creates an extractor from validated strategy options.
	pub fn from_config(config: &StrategyConfig) -> Self {
		Self::new(
			&config.access_token_field,
			&config.refresh_token_field,
			config.token_sources.iter().copied(),
		)
	}

	/// Access token field name.
	pub fn access_token_field(&self) -> &str {
		&self.access_token_field
	}

	/// Refresh token field name.
	pub fn refresh_token_field(&self) -> &str {
		&self.refresh_token_field
	}

	/// Sources in evaluation order.
	pub fn sources(&self) -> &[TokenSource] {
		&self.sources
	}

	/// Extracts the credential pair, failing when no access token is found.
	pub fn extract(&self, request: &RequestParts) -> Result<Credentials, MissingCredential> {
		let (access_token, source) = self
			.lookup(request, &self.access_token_field)
			.ok_or_else(|| MissingCredential { field: self.access_token_field.clone() })?;
		let mut credentials = Credentials::new(access_token, source);

		if let Some((refresh_token, _)) = self.lookup(request, &self.refresh_token_field) {
			credentials = credentials.with_refresh_token(refresh_token);
		}

		Ok(credentials)
	}

	fn lookup(&self, request: &RequestParts, name: &str) -> Option<(TokenSecret, TokenSource)> {
		self.sources.iter().find_map(|&source| {
			let token = request.field(source, name).and_then(TokenSecret::non_empty)?;

			Some((token, source))
		})
	}
}
impl Default for TokenExtractor {
	fn default() -> Self {
		Self::new(
			StrategyConfig::DEFAULT_ACCESS_TOKEN_FIELD,
			StrategyConfig::DEFAULT_REFRESH_TOKEN_FIELD,
			TokenSource::DEFAULT_ORDER,
		)
	}
}
