//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the adapter core and an
//! external collaborator (process execution, connection-string resolution,
//! progress feedback). Implementations live in `src/adapters/`.

pub mod feedback;
pub mod process;
pub mod resolver;

pub use feedback::Feedback;
pub use process::{ProcessOutput, ProcessRunner};
pub use resolver::ConnectionResolver;
