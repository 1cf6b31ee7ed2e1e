//! Login and refresh flows that install token pairs on a [`Session`](crate::session::Session).
//!
//! Every flow performs one exchange against a fixed authentication endpoint. A `200` response
//! carries `{accessToken, refreshToken}`; the access token is decoded and the pair replaces the
//! session state as a unit. Any other status is surfaced as an
//! [`AuthError`](crate::error::AuthError) built from the `{code, message}` envelope.

pub mod refresh;

mod basic;
pub(crate) mod common;
mod ticket;

pub use refresh::*;
