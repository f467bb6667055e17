//! Port implementations.
//!
//! - `live`: real git, JIRA, and terminal.
//! - `recording`: wraps a live adapter and writes every call to the cache.
//! - `replaying`: answers calls from the cache.

pub mod live;
pub mod recording;
pub mod replaying;
