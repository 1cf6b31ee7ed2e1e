//! Identity-ticket contract consumed by the ticket login flow.
//!
//! The identity service that turns a login/password pair into a ticket is an opaque
//! collaborator: the session only forwards the resulting string to the ticket exchange.

// self
use crate::_prelude::*;

/// Boxed future returned by [`TicketIssuer::issue_ticket`].
pub type TicketFuture<'a, Error> = Pin<Box<dyn Future<Output = Result<String, Error>> + 'a + Send>>;

/// Credentials handed to a [`TicketIssuer`].
#[derive(Clone, Copy)]
pub struct TicketRequest<'a> {
	/// Account login (usually an email address).
	pub login: &'a str,
	/// Account password.
	pub password: &'a str,
	/// Application identifier registered with the identity service.
	pub application_id: &'a str,
}
impl Debug for TicketRequest<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TicketRequest")
			.field("login", &self.login)
			.field("password", &"<redacted>")
			.field("application_id", &self.application_id)
			.finish()
	}
}

/// Produces identity tickets exchanged for session tokens.
pub trait TicketIssuer
where
	Self: Send + Sync,
{
	/// Issuer-specific failure.
	type Error: 'static + Send + Sync + StdError;

	/// Exchanges the credentials for an opaque ticket string.
	fn issue_ticket<'a>(&'a self, request: TicketRequest<'a>) -> TicketFuture<'a, Self::Error>;
}
