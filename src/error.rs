//! Session-level error types shared across flows, the dispatcher, and the token codec.

// self
use crate::_prelude::*;

/// Session-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical session error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, unreadable body).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Authentication endpoint rejected the credentials, ticket, or audience.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Proactive refresh failed; the previous tokens are still installed.
	#[error(transparent)]
	Refresh(#[from] RefreshError),
	/// Access token could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Resource endpoint answered with a non-200 status.
	#[error("Error {status} from server: {body}")]
	Server {
		/// HTTP status code.
		status: u16,
		/// Raw response body, unparsed.
		body: String,
	},
	/// Ticket issuer failed to produce a ticket.
	#[error("Ticket issuer failed to produce a ticket.")]
	Ticket {
		/// Issuer-specific failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps a ticket issuer failure.
	pub fn ticket(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Ticket { source: Box::new(src) }
	}
}

/// Configuration failures raised while assembling a session.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Session configuration failed validation.
	#[error(transparent)]
	Session(#[from] crate::config::SessionConfigError),
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Cache sweep thread could not be spawned.
	#[error("Cache sweep thread could not be spawned.")]
	SweeperSpawn(#[source] std::io::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO, unreadable bodies).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Unable to perform request: {source}")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Authentication endpoint answered 200 with a body that is not a token pair.
	#[error("Authentication endpoint returned a malformed token response.")]
	Body {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Rejection reported by an authentication endpoint.
///
/// The `code` and `message` come verbatim from the `{code, message}` envelope; both are
/// zero-valued when the envelope itself cannot be parsed. Known remote meanings include
/// 401 "Username could not be found." (unknown user), 401 "Invalid credentials." (wrong
/// password), and code 0 "There was a validation error." (bad audience).
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Error {code} from server: {message}")]
pub struct AuthError {
	/// HTTP status code of the rejection.
	pub status: u16,
	/// Service error code from the envelope.
	pub code: i64,
	/// Service error message from the envelope.
	pub message: String,
}

/// Failures raised while refreshing the session tokens.
#[derive(Debug, ThisError)]
pub enum RefreshError {
	/// Refresh exchange failed at the transport layer.
	#[error("Unable to refresh token: {0}")]
	Transport(#[source] TransportError),
	/// Refresh endpoint rejected the refresh token.
	#[error("Unable to refresh token: {0}")]
	Auth(#[source] AuthError),
	/// Refreshed access token could not be decoded.
	#[error("Unable to refresh token: {0}")]
	Decode(#[source] DecodeError),
}
impl From<Error> for RefreshError {
	fn from(e: Error) -> Self {
		match e {
			Error::Auth(err) => Self::Auth(err),
			Error::Decode(err) => Self::Decode(err),
			Error::Transport(err) => Self::Transport(err),
			other => Self::Transport(TransportError::network(other)),
		}
	}
}

/// Token structure failures raised by the codec.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Token is not made of three dot-separated segments.
	#[error("Token must have 3 dot-separated segments, found {found}.")]
	SegmentCount {
		/// Number of segments present.
		found: usize,
	},
	/// The payload segment is not valid base64url.
	#[error("Token payload is not valid base64.")]
	Base64 {
		/// Underlying decoding failure.
		#[source]
		source: base64::DecodeError,
	},
	/// The payload segment is not an object with integer `rat` and `exp` claims.
	#[error("Token payload is malformed at `{}`.", .source.path())]
	Json {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
