//! Audience identifier naming the downstream service a token is valid for.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

/// Error returned when audience validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum AudienceError {
	/// The audience was empty.
	#[error("Audience cannot be empty.")]
	Empty,
}

/// Validated audience embedded in every authentication request body.
///
/// Only emptiness is checked locally. Everything else is judged by the service, which answers an
/// unknown audience with a code-0 validation error.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Audience(String);
impl Audience {
	/// Audience for the core Nadeo services.
	pub const CORE_SERVICES: &'static str = "NadeoServices";
	/// Audience for Nadeo Live Services (the default).
	pub const LIVE_SERVICES: &'static str = "NadeoLiveServices";
	/// Audience for the club services.
	pub const CLUB_SERVICES: &'static str = "NadeoClubServices";

	/// Creates a new audience after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, AudienceError> {
		let view = value.as_ref();

		validate_view(view)?;

		Ok(Self(view.to_owned()))
	}
}
impl Default for Audience {
	fn default() -> Self {
		Self(Self::LIVE_SERVICES.to_owned())
	}
}
impl Deref for Audience {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for Audience {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for Audience {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<Audience> for String {
	fn from(value: Audience) -> Self {
		value.0
	}
}
impl TryFrom<String> for Audience {
	type Error = AudienceError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_view(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for Audience {
	type Err = AudienceError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for Audience {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Audience({})", self.0)
	}
}
impl Display for Audience {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_view(view: &str) -> Result<(), AudienceError> {
	if view.is_empty() {
		return Err(AudienceError::Empty);
	}

	Ok(())
}
