//! Session client for Nadeo Live Services: ticket and basic logins, proactive token refresh,
//! and a short-lived response cache over one pooled HTTP client.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ext;
pub mod flows;
pub mod http;
pub mod obs;
pub mod session;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for tests; enabled via `cfg(test)` or the `test` crate
	//! feature.

	pub use crate::_prelude::*;

	// crates.io
	use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
	// self
	use crate::{config::SessionConfig, session::Session};

	/// Mints an unsigned three-segment access token carrying the given `rat` and `exp` claims.
	pub fn mint_token(refresh_after: u32, expires_at: u32) -> String {
		let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
		let payload = URL_SAFE_NO_PAD.encode(format!(
			r#"{{"jti":"test","iss":"NadeoServices","rat":{refresh_after},"exp":{expires_at},"aud":"NadeoLiveServices"}}"#
		));

		format!("{header}.{payload}.c2lnbmF0dXJl")
	}

	/// Builds an unauthenticated session whose authentication endpoints live under `base_url`.
	pub fn test_session(base_url: &str) -> Session {
		let config = SessionConfig::builder()
			.base_url(base_url)
			.build()
			.expect("Failed to build test session config.");

		Session::new(config).expect("Failed to build test session.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
