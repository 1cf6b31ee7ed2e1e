// crates.io
use reqwest::header::CONTENT_TYPE;
// self
use crate::{
	_prelude::*,
	obs::{FlowKind, FlowSpan},
	session::Session,
};

impl Session {
	/// Logs in with HTTP Basic credentials (`token/basic`).
	///
	/// The remote rejection is surfaced verbatim: an unknown user comes back as a 401 with
	/// "Username could not be found.", a wrong password as a 401 with "Invalid credentials.".
	pub async fn authenticate_basic(&self, username: &str, password: &str) -> Result<()> {
		const KIND: FlowKind = FlowKind::Basic;

		let span = FlowSpan::start(KIND, "authenticate_basic");
		let result = span
			.instrument(async move {
				let request = self
					.http_client
					.post(self.config.endpoints.basic.clone())
					.header(CONTENT_TYPE, "application/json")
					.basic_auth(username, Some(password))
					.body(self.audience_body());

				self.exchange(request).await.map(|_| ())
			})
			.await;

		span.finish(result)
	}
}
