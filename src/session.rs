//! Authenticated session state shared by the login flows and the request dispatcher.
//!
//! A [`Session`] owns one pooled HTTP client, one response cache, and the current token pair.
//! The token pair and its derived timing live behind a single mutex and are only ever replaced
//! as a unit, so readers never observe an access token from one server response paired with a
//! refresh token from another. Cloning a session yields another handle to the same state.

// self
use crate::{
	_prelude::*,
	auth::{self, Audience, TokenInfo, TokenPayload, TokenSecret},
	cache::ResponseCache,
	config::SessionConfig,
	error::{ConfigError, DecodeError},
	flows::RefreshMetrics,
	http::ReqwestHttpClient,
};

/// Refresh and expiry deadlines of the installed access token, in Unix seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenTiming {
	/// Instant after which the session refreshes proactively.
	pub refresh_after: u32,
	/// Instant after which the service rejects the access token.
	pub expires_at: u32,
}
impl TokenTiming {
	/// Returns `true` once `now` has reached the refresh deadline.
	pub fn refresh_due_at(&self, now: u32) -> bool {
		now >= self.refresh_after
	}

	/// Returns `true` once `now` has reached the expiry instant.
	pub fn is_expired_at(&self, now: u32) -> bool {
		now >= self.expires_at
	}
}

#[derive(Clone)]
pub(crate) struct TokenState {
	pub(crate) access_token: TokenSecret,
	pub(crate) refresh_token: TokenSecret,
	pub(crate) timing: TokenTiming,
}

/// Client session for the remote authentication-and-data service.
#[derive(Clone)]
pub struct Session {
	pub(crate) config: Arc<SessionConfig>,
	pub(crate) http_client: ReqwestHttpClient,
	pub(crate) cache: ResponseCache,
	pub(crate) refresh_metrics: Arc<RefreshMetrics>,
	pub(crate) refresh_guard: Arc<AsyncMutex<()>>,
	state: Arc<Mutex<Option<TokenState>>>,
}
impl Session {
	/// Creates an unauthenticated session with its own pooled HTTP client.
	pub fn new(config: SessionConfig) -> Result<Self> {
		let http_client = ReqwestHttpClient::from_config(&config)?;

		Self::with_http_client(config, http_client)
	}

	/// Creates an unauthenticated session against the production service.
	pub fn production() -> Result<Self> {
		let config = SessionConfig::builder().build().map_err(ConfigError::from)?;

		Self::new(config)
	}

	/// Creates an unauthenticated session that reuses the caller-provided HTTP client.
	pub fn with_http_client(
		config: SessionConfig,
		http_client: impl Into<ReqwestHttpClient>,
	) -> Result<Self> {
		let cache = ResponseCache::new(config.cache_ttl, config.cache_sweep_interval)?;

		Ok(Self {
			config: Arc::new(config),
			http_client: http_client.into(),
			cache,
			refresh_metrics: Default::default(),
			refresh_guard: Default::default(),
			state: Default::default(),
		})
	}

	/// Configuration the session was built with.
	pub fn config(&self) -> &SessionConfig {
		&self.config
	}

	/// Audience embedded in authentication requests.
	pub fn audience(&self) -> &Audience {
		&self.config.audience
	}

	/// Response cache used by [`Session::get`].
	pub fn cache(&self) -> &ResponseCache {
		&self.cache
	}

	/// Counters for refresh exchanges performed by this session.
	pub fn refresh_metrics(&self) -> &RefreshMetrics {
		&self.refresh_metrics
	}

	/// Returns `true` once a login flow has installed a token pair.
	pub fn is_authenticated(&self) -> bool {
		self.state.lock().is_some()
	}

	/// Deadlines of the installed access token, if any.
	pub fn timing(&self) -> Option<TokenTiming> {
		self.state.lock().as_ref().map(|state| state.timing)
	}

	/// Decodes the installed access token.
	///
	/// An unauthenticated session has an empty access token, which fails to decode.
	pub fn token_info(&self) -> Result<TokenInfo> {
		Ok(auth::decode(self.access_token().expose())?)
	}

	/// Drops the installed token pair and every cached response.
	pub fn sign_out(&self) {
		*self.state.lock() = None;

		self.cache.clear();
	}

	pub(crate) fn access_token(&self) -> TokenSecret {
		self.state.lock().as_ref().map(|state| state.access_token.clone()).unwrap_or_default()
	}

	pub(crate) fn refresh_token(&self) -> TokenSecret {
		self.state.lock().as_ref().map(|state| state.refresh_token.clone()).unwrap_or_default()
	}

	// Unauthenticated sessions are always due, which sends the empty refresh token upstream.
	pub(crate) fn refresh_due_at(&self, now: u32) -> bool {
		self.timing().is_none_or(|timing| timing.refresh_due_at(now))
	}

	/// Decodes `access_token` and replaces the whole token state.
	///
	/// Nothing is written when decoding fails.
	pub(crate) fn install(
		&self,
		access_token: String,
		refresh_token: String,
	) -> Result<TokenTiming, DecodeError> {
		let payload = TokenPayload::from_token(&access_token)?;
		let timing =
			TokenTiming { refresh_after: payload.refresh_after, expires_at: payload.expires_at };

		*self.state.lock() = Some(TokenState {
			access_token: access_token.into(),
			refresh_token: refresh_token.into(),
			timing,
		});

		Ok(timing)
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("audience", &self.config.audience)
			.field("base_url", &self.config.base_url.as_str())
			.field("timing", &self.timing())
			.field("refresh_token", &self.refresh_token())
			.finish()
	}
}

/// Current wall-clock time in Unix seconds, clamped to the `u32` range the tokens use.
pub(crate) fn unix_now() -> u32 {
	let secs = OffsetDateTime::now_utc().unix_timestamp();

	u32::try_from(secs.max(0)).unwrap_or(u32::MAX)
}
