//! Public extension contracts for collaborators the session does not implement itself.

pub mod ticket;

pub use ticket::*;
