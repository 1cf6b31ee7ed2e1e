//! Proactive refresh with a singleflight guard.
//!
//! [`Session::check_refresh`] compares the wall clock against the `rat` (refresh-after) claim of
//! the installed access token rather than its expiry, so requests never go out with a token the
//! service is about to reject. Concurrent callers that find the deadline passed queue on one
//! guard; whoever acquires it after a successful refresh re-checks the deadline and returns
//! without a second exchange.

mod metrics;

pub use metrics::{RefreshEvent, RefreshMetrics, RefreshSnapshot};

// crates.io
use reqwest::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	error::RefreshError,
	flows::common,
	obs::{FlowKind, FlowSpan},
	session::{self, Session},
};

impl Session {
	/// Refreshes the token pair when the refresh deadline has been reached; no-op otherwise.
	///
	/// Sessions that never authenticated are always due; the service rejects their empty
	/// refresh token and that rejection is returned as [`RefreshError::Auth`].
	pub async fn check_refresh(&self) -> Result<()> {
		if !self.refresh_due_at(session::unix_now()) {
			return Ok(());
		}

		let _singleflight = self.refresh_guard.lock().await;

		if !self.refresh_due_at(session::unix_now()) {
			self.refresh_metrics.record(RefreshEvent::Coalesced);

			return Ok(());
		}

		self.refresh_exchange().await
	}

	/// Refreshes the token pair immediately, regardless of the refresh deadline.
	pub async fn refresh_now(&self) -> Result<()> {
		let _singleflight = self.refresh_guard.lock().await;

		self.refresh_exchange().await
	}

	async fn refresh_exchange(&self) -> Result<()> {
		const KIND: FlowKind = FlowKind::Refresh;

		let span = FlowSpan::start(KIND, "refresh_exchange");

		self.refresh_metrics.record(RefreshEvent::Attempt);

		let result = span
			.instrument(async move {
				let refresh_token = self.refresh_token();
				let request = self.http_client.post(self.config.endpoints.refresh.clone()).header(
					AUTHORIZATION,
					common::authorization(common::NADEO_SCHEME, refresh_token.expose()),
				);

				self.exchange(request)
					.await
					.map(|_| ())
					.map_err(|err| Error::Refresh(RefreshError::from(err)))
			})
			.await;

		self.refresh_metrics.record(if result.is_ok() {
			RefreshEvent::Success
		} else {
			RefreshEvent::Failure
		});

		span.finish(result)
	}
}
