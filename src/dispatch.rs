//! Authenticated GET/POST relay with an opt-in response cache.
//!
//! Caching is keyed purely by the target string; callers needing parameterized caching encode
//! the parameters into the target. A cache hit returns before the refresh check, so it never
//! touches the network. Every other call runs [`Session::check_refresh`] first.

// crates.io
use reqwest::{
	Method,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	flows::common,
	obs::{FlowKind, FlowSpan},
	session::Session,
};

impl Session {
	/// Issues an authenticated GET to `target`.
	///
	/// With `use_cache`, a body cached for `target` within the TTL is returned without any
	/// network activity, and a fresh successful body is cached for the next caller.
	pub async fn get(&self, target: &str, use_cache: bool) -> Result<String> {
		if use_cache {
			if let Some(body) = self.cache.get(target) {
				return Ok(body);
			}
		}

		let body = self.dispatch(Method::GET, target, None).await?;

		if use_cache {
			self.cache.insert(target, body.clone());
		}

		Ok(body)
	}

	/// Issues an authenticated POST of `body` to `target`. Responses are never cached.
	pub async fn post(&self, target: &str, body: impl Into<String>) -> Result<String> {
		self.dispatch(Method::POST, target, Some(body.into())).await
	}

	async fn dispatch(&self, method: Method, target: &str, body: Option<String>) -> Result<String> {
		const KIND: FlowKind = FlowKind::Request;

		let span = FlowSpan::start(KIND, "dispatch");
		let result = span
			.instrument(async move {
				self.check_refresh().await?;

				let access_token = self.access_token();
				let mut request = self
					.http_client
					.request(method, target)
					.header(
						AUTHORIZATION,
						common::authorization(common::NADEO_SCHEME, access_token.expose()),
					)
					.header(ACCEPT, "application/json")
					.header(CONTENT_TYPE, "application/json");

				if let Some(body) = body {
					request = request.body(body);
				}

				let reply = self.http_client.execute(request).await?;

				if !reply.is_ok() {
					return Err(Error::Server { status: reply.status, body: reply.body });
				}

				Ok(reply.body)
			})
			.await;

		span.finish(result)
	}
}
