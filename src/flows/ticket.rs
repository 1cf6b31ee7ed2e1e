// crates.io
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	ext::{TicketIssuer, TicketRequest},
	flows::common,
	obs::{FlowKind, FlowSpan},
	session::Session,
};

impl Session {
	/// Exchanges a pre-obtained identity ticket for a token pair (`token/ubiservices`).
	pub async fn authenticate_with_ticket(&self, ticket: &str) -> Result<()> {
		const KIND: FlowKind = FlowKind::Ticket;

		let span = FlowSpan::start(KIND, "authenticate_with_ticket");
		let result = span
			.instrument(async move {
				let request = self
					.http_client
					.post(self.config.endpoints.ticket.clone())
					.header(CONTENT_TYPE, "application/json")
					.header(AUTHORIZATION, common::authorization(&self.config.ticket_scheme, ticket))
					.body(self.audience_body());

				self.exchange(request).await.map(|_| ())
			})
			.await;

		span.finish(result)
	}

	/// Obtains a ticket from `issuer` for the given credentials, then exchanges it.
	pub async fn authenticate_with_issuer<I>(
		&self,
		issuer: &I,
		login: &str,
		password: &str,
	) -> Result<()>
	where
		I: ?Sized + TicketIssuer,
	{
		let request = TicketRequest {
			login,
			password,
			application_id: &self.config.ticket_application_id,
		};
		let ticket = issuer.issue_ticket(request).await.map_err(Error::ticket)?;

		self.authenticate_with_ticket(&ticket).await
	}
}
