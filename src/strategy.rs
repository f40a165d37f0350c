//! Strategy coordinator wiring extraction, profile resolution, and verification.
//!
//! [`TwitchTokenStrategy`] owns its configuration, the [`TokenExtractor`], the
//! [`ProfileResolver`], and the application's [`Verifier`]. Every call to
//! [`AuthStrategy::authenticate`] runs the same linear pipeline and yields exactly one
//! [`Outcome`]; nothing is shared between calls beyond what was captured at construction.

pub mod outcome;
pub mod verify;

mod authenticate;

pub use outcome::*;
pub use verify::*;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::StrategyConfig,
	extract::{RequestParts, TokenExtractor},
	http::ProfileHttpClient,
	profile::{Profile, ProfileResolver},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed future returned by [`AuthStrategy::authenticate`].
pub type StrategyFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestTwitchTokenStrategy<U> = TwitchTokenStrategy<U, ReqwestHttpClient>;

/// Uniform contract a host authentication framework drives.
pub trait AuthStrategy
where
	Self: Send + Sync,
{
	/// User type produced on success.
	type User: Send;

	/// Registration name of the strategy.
	fn name(&self) -> &str;

	/// Authenticates `request`, producing exactly one outcome.
	fn authenticate<'a>(
		&'a self,
		request: &'a RequestParts,
	) -> StrategyFuture<'a, Outcome<Self::User>>;
}

/// Authenticates requests carrying an existing Twitch access token.
pub struct TwitchTokenStrategy<U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	config: StrategyConfig,
	extractor: TokenExtractor,
	resolver: ProfileResolver<C>,
	verifier: Arc<dyn Verifier<User = U>>,
}
impl<U, C> TwitchTokenStrategy<U, C>
where
	U: 'static + Send,
	C: ?Sized + ProfileHttpClient,
{
	/// Registration name reported by [`AuthStrategy::name`].
	pub const NAME: &'static str = "twitch-token";

	/// Creates a strategy that issues profile requests through `http_client`.
	pub fn with_http_client<V>(
		config: StrategyConfig,
		http_client: impl Into<Arc<C>>,
		verifier: V,
	) -> Self
	where
		V: 'static + Verifier<User = U>,
	{
		let extractor = TokenExtractor::from_config(&config);
		let resolver = ProfileResolver::new(&config, http_client);

		Self { config, extractor, resolver, verifier: Arc::new(verifier) }
	}

	/// Options captured at construction.
	pub fn config(&self) -> &StrategyConfig {
		&self.config
	}

	/// Extractor derived from the options.
	pub fn extractor(&self) -> &TokenExtractor {
		&self.extractor
	}

	/// Resolver used for profile requests.
	pub fn resolver(&self) -> &ProfileResolver<C> {
		&self.resolver
	}

	/// Resolves the profile for `access_token` without running verification.
	pub async fn user_profile(&self, access_token: &str) -> Result<Profile> {
		self.resolver.user_profile(&TokenSecret::new(access_token)).await
	}
}
#[cfg(feature = "reqwest")]
impl<U> TwitchTokenStrategy<U, ReqwestHttpClient>
where
	U: 'static + Send,
{
	/// Creates a strategy backed by a default reqwest client.
	pub fn new<V>(config: StrategyConfig, verifier: V) -> Self
	where
		V: 'static + Verifier<User = U>,
	{
		Self::with_http_client(config, ReqwestHttpClient::default(), verifier)
	}
}
impl<U, C> Clone for TwitchTokenStrategy<U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			extractor: self.extractor.clone(),
			resolver: self.resolver.clone(),
			verifier: Arc::clone(&self.verifier),
		}
	}
}
impl<U, C> Debug for TwitchTokenStrategy<U, C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TwitchTokenStrategy")
			.field("config", &self.config)
			.field("extractor", &self.extractor)
			.field("resolver", &self.resolver)
			.finish()
	}
}
