//! Structural decoder for the compact three-segment access tokens issued by the service.
//!
//! The signature is never verified locally; the service checks it on every call. Only the
//! middle segment is required to decode: its `rat` (refresh-after) and `exp` (expires-at)
//! claims, in seconds since the Unix epoch, drive proactive refresh. The header and the
//! remaining claims are surfaced when readable and ignored otherwise.

// crates.io
use base64::{
	Engine,
	engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
};
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, error::DecodeError};

/// JOSE header of an access token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct TokenHeader {
	/// Signing algorithm label.
	#[serde(default)]
	pub alg: Option<String>,
	/// Token type label.
	#[serde(default)]
	pub typ: Option<String>,
}

/// Timing claims every access token must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenPayload {
	/// Instant after which the token should be refreshed.
	#[serde(rename = "rat")]
	pub refresh_after: u32,
	/// Instant after which the service rejects the token.
	#[serde(rename = "exp")]
	pub expires_at: u32,
}
impl TokenPayload {
	/// Decodes the timing claims from the middle segment of `token`.
	pub fn from_token(token: &str) -> Result<Self, DecodeError> {
		Ok(split(token)?.1)
	}

	/// Refresh-after instant as a UTC datetime.
	pub fn refresh_after_at(&self) -> OffsetDateTime {
		unix_instant(self.refresh_after)
	}

	/// Expiry instant as a UTC datetime.
	pub fn expires_at_at(&self) -> OffsetDateTime {
		unix_instant(self.expires_at)
	}
}

/// Decoded view of an access token.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenInfo {
	/// Header segment, when it decodes to the expected shape.
	pub header: Option<TokenHeader>,
	/// Timing claims.
	pub payload: TokenPayload,
	/// Every claim of the payload object, untyped (`aud`, `sub`, `iat`, ...).
	pub claims: Map<String, Value>,
	/// Raw signature segment, still encoded.
	pub signature: String,
}
impl TokenInfo {
	/// Looks up a claim by name.
	pub fn claim(&self, name: &str) -> Option<&Value> {
		self.claims.get(name)
	}
}

/// Decodes `token` without verifying its signature.
///
/// Fails only when the token is not three segments or its middle segment does not decode into
/// an object carrying non-negative integer `rat` and `exp` claims.
pub fn decode(token: &str) -> Result<TokenInfo, DecodeError> {
	let (segments, payload, bytes) = split(token)?;

	Ok(TokenInfo {
		header: decode_base64(segments[0])
			.ok()
			.and_then(|raw| serde_json::from_slice(&raw).ok()),
		payload,
		claims: serde_json::from_slice(&bytes).unwrap_or_default(),
		signature: segments[2].to_owned(),
	})
}

fn split(token: &str) -> Result<([&str; 3], TokenPayload, Vec<u8>), DecodeError> {
	let segments = token.split('.').collect::<Vec<_>>();
	let &[header, payload, signature] = segments.as_slice() else {
		return Err(DecodeError::SegmentCount { found: segments.len() });
	};
	let bytes = decode_base64(payload).map_err(|source| DecodeError::Base64 { source })?;
	let mut de = serde_json::Deserializer::from_slice(&bytes);
	let timing =
		serde_path_to_error::deserialize(&mut de).map_err(|source| DecodeError::Json { source })?;

	Ok(([header, payload, signature], timing, bytes))
}

fn decode_base64(raw: &str) -> Result<Vec<u8>, base64::DecodeError> {
	let trimmed = raw.trim_end_matches('=');

	URL_SAFE_NO_PAD.decode(trimmed).or_else(|_| STANDARD_NO_PAD.decode(trimmed))
}

fn unix_instant(secs: u32) -> OffsetDateTime {
	OffsetDateTime::from_unix_timestamp(i64::from(secs)).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
