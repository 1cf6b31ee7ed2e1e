//! Transport primitives shared by the authentication flows and the request dispatcher.
//!
//! A session owns exactly one [`ReqwestHttpClient`], configured once at construction, so every
//! exchange reuses the same connection pool.

// std
use std::ops::Deref;
// crates.io
use reqwest::{RequestBuilder, StatusCode};
// self
use crate::{
	_prelude::*,
	config::SessionConfig,
	error::{ConfigError, TransportError},
};

/// Status and text body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl HttpReply {
	/// Returns `true` for the `200 OK` status the service uses for every success.
	pub fn is_ok(&self) -> bool {
		self.status == StatusCode::OK.as_u16()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a pooled client honoring the session configuration.
	pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
		let mut builder = ReqwestClient::builder();

		if let Some(user_agent) = &config.user_agent {
			builder = builder.user_agent(user_agent.as_str());
		}

		Ok(Self(builder.build().map_err(ConfigError::http_client_build)?))
	}

	/// Sends `request` and reads the full body as text.
	pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<HttpReply, TransportError> {
		let response = request.send().await?;
		let status = response.status().as_u16();
		let body = response.text().await?;

		Ok(HttpReply { status, body })
	}
}
impl From<ReqwestClient> for ReqwestHttpClient {
	fn from(client: ReqwestClient) -> Self {
		Self::with_client(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
