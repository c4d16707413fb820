//! Console command implementations.

pub mod chat;
pub mod stats;
