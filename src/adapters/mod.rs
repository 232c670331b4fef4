//! Adapter implementations of the port traits.
//!
//! - `live`: real process execution, resolution and logging.
//! - `recording`: wraps a live runner and captures runs to a cassette.
//! - `replaying`: serves runs back from a cassette.

pub mod live;
pub mod recording;
pub mod replaying;
