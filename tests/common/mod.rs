//! Fixtures shared by the integration suites.

#![allow(dead_code)]

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use httpmock::MockServer;
use time::{Duration, OffsetDateTime};
// self
pub use nadeo_client::_preludet::mint_token;
use nadeo_client::{
	config::{SessionConfig, SessionConfigBuilder},
	session::Session,
};

pub const BASIC_PATH: &str = "/v2/authentication/token/basic";
pub const TICKET_PATH: &str = "/v2/authentication/token/ubiservices";
pub const REFRESH_PATH: &str = "/v2/authentication/token/refresh";
pub const AUDIENCE_BODY: &str = "{\"audience\":\"NadeoLiveServices\"}";

/// Current Unix time in seconds.
pub fn now() -> u32 {
	u32::try_from(OffsetDateTime::now_utc().unix_timestamp())
		.expect("Test clock should fit the token timestamp range.")
}

/// Token that does not need a refresh for the next hour.
pub fn fresh_token() -> String {
	let now = now();

	mint_token(now + 3_600, now + 7_200)
}

/// Token whose refresh deadline has already passed but which has not expired yet.
pub fn due_token() -> String {
	let now = now();

	mint_token(now - 60, now + 600)
}

/// JSON body returned by the authentication endpoints on success.
pub fn token_pair(access: &str, refresh: &str) -> String {
	format!(r#"{{"accessToken":"{access}","refreshToken":"{refresh}"}}"#)
}

/// Value of the `Authorization` header reqwest sends for HTTP Basic credentials.
pub fn basic_header(username: &str, password: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Session whose authentication endpoints live on `server`.
pub fn session_for(server: &MockServer) -> Session {
	session_with(server, |builder| builder)
}

/// Session on `server` with extra configuration applied to the builder.
pub fn session_with(
	server: &MockServer,
	configure: impl FnOnce(SessionConfigBuilder) -> SessionConfigBuilder,
) -> Session {
	let config = configure(SessionConfig::builder().base_url(server.base_url()))
		.build()
		.expect("Test session config should be valid.");

	Session::new(config).expect("Test session should build.")
}

/// Short cache TTL used by expiry tests.
pub fn short_ttl() -> Duration {
	Duration::milliseconds(300)
}
