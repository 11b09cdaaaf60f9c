//! Application layer for turn resolution.

pub mod session_locks;
pub mod turn_resolver;
