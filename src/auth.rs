//! Auth-domain identifiers, token secrets, and the token codec.

pub mod audience;
pub mod token;

pub use audience::*;
pub use token::{codec::*, secret::*};
