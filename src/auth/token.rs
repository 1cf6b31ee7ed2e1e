//! Access/refresh token models.

pub mod codec;
pub mod secret;
