//! Session configuration: service location, audience, ticket scheme, and cache policy.

// self
use crate::{
	_prelude::*,
	auth::{Audience, AudienceError},
	cache::ResponseCache,
};

/// Production core service hosting the authentication endpoints.
pub const DEFAULT_BASE_URL: &str = "https://prod.trackmania.core.nadeo.online/";
/// Authorization scheme announcing an identity-service ticket.
///
/// The production service expects `ubi_v1`; other deployments may announce tickets as
/// `ticket_v1`, which [`SessionConfigBuilder::ticket_scheme`] accepts as well.
pub const DEFAULT_TICKET_SCHEME: &str = "ubi_v1";
/// Application identifier presented to the identity ticket service.
pub const DEFAULT_TICKET_APPLICATION_ID: &str = "86263886-327a-4328-ac69-527f0d20a237";

const TICKET_PATH: &str = "v2/authentication/token/ubiservices";
const BASIC_PATH: &str = "v2/authentication/token/basic";
const REFRESH_PATH: &str = "v2/authentication/token/refresh";

/// Errors raised while constructing or validating a [`SessionConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum SessionConfigError {
	/// Base URL could not be parsed.
	#[error("Base URL is invalid: {0}.")]
	InvalidBaseUrl(#[from] url::ParseError),
	/// Base URL must use HTTP or HTTPS and carry a host.
	#[error("Base URL must be an absolute HTTP(S) URL: {url}.")]
	UnsupportedBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Audience failed validation.
	#[error(transparent)]
	InvalidAudience(#[from] AudienceError),
	/// Ticket scheme must be a single non-empty token.
	#[error("Ticket scheme must be a non-empty token without whitespace.")]
	InvalidTicketScheme,
	/// A duration must be strictly positive.
	#[error("The {field} must be positive.")]
	NonPositiveDuration {
		/// Offending field.
		field: &'static str,
	},
}

/// Absolute URLs of the authentication endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthEndpoints {
	/// Ticket exchange endpoint.
	pub ticket: Url,
	/// Basic-credential exchange endpoint.
	pub basic: Url,
	/// Refresh endpoint.
	pub refresh: Url,
}
impl AuthEndpoints {
	fn from_base(base: &Url) -> Result<Self, SessionConfigError> {
		Ok(Self {
			ticket: base.join(TICKET_PATH)?,
			basic: base.join(BASIC_PATH)?,
			refresh: base.join(REFRESH_PATH)?,
		})
	}
}

/// Immutable configuration shared by a [`Session`](crate::session::Session).
#[derive(Clone, Debug)]
pub struct SessionConfig {
	/// Service root the authentication paths are resolved against.
	pub base_url: Url,
	/// Precomputed authentication endpoints.
	pub endpoints: AuthEndpoints,
	/// Audience embedded in every authentication request.
	pub audience: Audience,
	/// Authorization scheme used for the ticket exchange.
	pub ticket_scheme: String,
	/// Application identifier handed to ticket issuers.
	pub ticket_application_id: String,
	/// Time-to-live for cached GET responses.
	pub cache_ttl: Duration,
	/// Interval between proactive cache sweeps.
	pub cache_sweep_interval: Duration,
	/// Optional `User-Agent` applied by the session's HTTP client.
	pub user_agent: Option<String>,
}
impl SessionConfig {
	/// Returns a builder seeded with production defaults.
	pub fn builder() -> SessionConfigBuilder {
		SessionConfigBuilder::new()
	}
}

/// Builder for [`SessionConfig`] values.
#[derive(Debug)]
pub struct SessionConfigBuilder {
	base_url: String,
	audience: String,
	ticket_scheme: String,
	ticket_application_id: String,
	cache_ttl: Duration,
	cache_sweep_interval: Duration,
	user_agent: Option<String>,
}
impl SessionConfigBuilder {
	/// Creates a builder seeded with production defaults.
	pub fn new() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.into(),
			audience: Audience::LIVE_SERVICES.into(),
			ticket_scheme: DEFAULT_TICKET_SCHEME.into(),
			ticket_application_id: DEFAULT_TICKET_APPLICATION_ID.into(),
			cache_ttl: ResponseCache::DEFAULT_TTL,
			cache_sweep_interval: ResponseCache::DEFAULT_SWEEP_INTERVAL,
			user_agent: None,
		}
	}

	/// Overrides the service root (a trailing slash is added when missing).
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = url.into();

		self
	}

	/// Overrides the audience.
	pub fn audience(mut self, audience: impl Into<String>) -> Self {
		self.audience = audience.into();

		self
	}

	/// Overrides the ticket authorization scheme.
	pub fn ticket_scheme(mut self, scheme: impl Into<String>) -> Self {
		self.ticket_scheme = scheme.into();

		self
	}

	/// Overrides the application identifier handed to ticket issuers.
	pub fn ticket_application_id(mut self, id: impl Into<String>) -> Self {
		self.ticket_application_id = id.into();

		self
	}

	/// Overrides the cached response TTL.
	pub fn cache_ttl(mut self, ttl: Duration) -> Self {
		self.cache_ttl = ttl;

		self
	}

	/// Overrides the cache sweep interval.
	pub fn cache_sweep_interval(mut self, interval: Duration) -> Self {
		self.cache_sweep_interval = interval;

		self
	}

	/// Sets the `User-Agent` header sent with every request.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Validates the inputs and produces a [`SessionConfig`].
	pub fn build(self) -> Result<SessionConfig, SessionConfigError> {
		let mut raw = self.base_url;

		if !raw.ends_with('/') {
			raw.push('/');
		}

		let base_url = Url::parse(&raw)?;

		if !matches!(base_url.scheme(), "http" | "https") || base_url.host().is_none() {
			return Err(SessionConfigError::UnsupportedBaseUrl { url: base_url.into() });
		}
		if self.ticket_scheme.is_empty() || self.ticket_scheme.chars().any(char::is_whitespace) {
			return Err(SessionConfigError::InvalidTicketScheme);
		}
		if !self.cache_ttl.is_positive() {
			return Err(SessionConfigError::NonPositiveDuration { field: "cache TTL" });
		}
		if !self.cache_sweep_interval.is_positive() {
			return Err(SessionConfigError::NonPositiveDuration { field: "cache sweep interval" });
		}

		let endpoints = AuthEndpoints::from_base(&base_url)?;

		Ok(SessionConfig {
			base_url,
			endpoints,
			audience: Audience::new(self.audience)?,
			ticket_scheme: self.ticket_scheme,
			ticket_application_id: self.ticket_application_id,
			cache_ttl: self.cache_ttl,
			cache_sweep_interval: self.cache_sweep_interval,
			user_agent: self.user_agent,
		})
	}
}
impl Default for SessionConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn defaults_target_production() {
		let config =
			SessionConfig::builder().build().expect("Production defaults should be valid.");

		assert_eq!(
			config.endpoints.ticket.as_str(),
			"https://prod.trackmania.core.nadeo.online/v2/authentication/token/ubiservices"
		);
		assert_eq!(
			config.endpoints.basic.as_str(),
			"https://prod.trackmania.core.nadeo.online/v2/authentication/token/basic"
		);
		assert_eq!(
			config.endpoints.refresh.as_str(),
			"https://prod.trackmania.core.nadeo.online/v2/authentication/token/refresh"
		);
		assert_eq!(config.audience.as_ref(), "NadeoLiveServices");
		assert_eq!(config.cache_ttl, Duration::minutes(1));
		assert_eq!(config.cache_sweep_interval, Duration::minutes(5));
	}

	#[test]
	fn builder_resolves_endpoints_under_base_path() {
		let config = SessionConfig::builder()
			.base_url("http://127.0.0.1:8080/core")
			.audience(Audience::CORE_SERVICES)
			.build()
			.expect("Local base URL should be accepted.");

		assert_eq!(
			config.endpoints.refresh.as_str(),
			"http://127.0.0.1:8080/core/v2/authentication/token/refresh"
		);
		assert_eq!(config.audience.as_ref(), "NadeoServices");
	}

	#[test]
	fn builder_validates_inputs() {
		assert!(matches!(
			SessionConfig::builder().base_url("ftp://example.com").build(),
			Err(SessionConfigError::UnsupportedBaseUrl { .. })
		));
		assert!(matches!(
			SessionConfig::builder().base_url("not a url").build(),
			Err(SessionConfigError::InvalidBaseUrl(_))
		));
		assert_eq!(
			SessionConfig::builder().audience("").build().map(|_| ()),
			Err(SessionConfigError::InvalidAudience(AudienceError::Empty))
		);
		assert_eq!(
			SessionConfig::builder()
				.audience("Nadeo Live")
				.build()
				.map(|config| config.audience.to_string()),
			Ok("Nadeo Live".to_owned()),
			"Only the service decides whether a non-empty audience is valid."
		);
		assert_eq!(
			SessionConfig::builder().ticket_scheme("ubi v1").build().map(|_| ()),
			Err(SessionConfigError::InvalidTicketScheme)
		);
		assert_eq!(
			SessionConfig::builder().cache_ttl(Duration::ZERO).build().map(|_| ()),
			Err(SessionConfigError::NonPositiveDuration { field: "cache TTL" })
		);
	}
}
