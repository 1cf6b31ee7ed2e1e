//! Shared helpers for flow implementations (exchange, envelope parsing, header values).

// crates.io
use reqwest::RequestBuilder;
// self
use crate::{
	_prelude::*,
	error::{AuthError, TransportError},
	http::HttpReply,
	session::{Session, TokenTiming},
};

/// Authorization scheme carrying access and refresh tokens.
pub(crate) const NADEO_SCHEME: &str = "nadeo_v1";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenPairResponse {
	access_token: String,
	refresh_token: String,
}

#[derive(Default, Deserialize)]
struct ErrorEnvelope {
	#[serde(default)]
	code: i64,
	#[serde(default)]
	message: String,
}

impl Session {
	/// Sends an authentication request and installs the returned token pair.
	pub(crate) async fn exchange(&self, request: RequestBuilder) -> Result<TokenTiming> {
		let reply = self.http_client.execute(request).await?;

		if !reply.is_ok() {
			return Err(auth_error(&reply).into());
		}

		let mut de = serde_json::Deserializer::from_str(&reply.body);
		let pair: TokenPairResponse = serde_path_to_error::deserialize(&mut de)
			.map_err(|source| TransportError::Body { source })?;

		Ok(self.install(pair.access_token, pair.refresh_token)?)
	}

	/// JSON body naming the session audience.
	pub(crate) fn audience_body(&self) -> String {
		serde_json::json!({ "audience": self.config.audience.as_ref() }).to_string()
	}
}

/// Builds an `Authorization` value for `scheme` and `token`.
pub(crate) fn authorization(scheme: &str, token: &str) -> String {
	format!("{scheme} t={token}")
}

/// Parses the `{code, message}` envelope, zero-valuing both when it is unreadable.
pub(crate) fn auth_error(reply: &HttpReply) -> AuthError {
	let envelope = serde_json::from_str::<ErrorEnvelope>(&reply.body).unwrap_or_default();

	AuthError { status: reply.status, code: envelope.code, message: envelope.message }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn envelope_fields_surface_verbatim() {
		let reply = HttpReply {
			status: 400,
			body: "{\"code\":0,\"message\":\"There was a validation error.\"}".into(),
		};

		assert_eq!(
			auth_error(&reply),
			AuthError { status: 400, code: 0, message: "There was a validation error.".into() }
		);
	}

	#[test]
	fn unreadable_envelope_is_zero_valued() {
		let reply = HttpReply { status: 503, body: "<html>Service Unavailable</html>".into() };

		assert_eq!(auth_error(&reply), AuthError { status: 503, code: 0, message: String::new() });
	}

	#[test]
	fn authorization_values_follow_scheme() {
		assert_eq!(authorization(NADEO_SCHEME, "abc"), "nadeo_v1 t=abc");
		assert_eq!(authorization("ubi_v1", "ticket"), "ubi_v1 t=ticket");
	}
}
