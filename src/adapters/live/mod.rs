//! Live adapters for real external interactions.

pub mod feedback;
pub mod process;
pub mod resolver;

pub use feedback::LogFeedback;
pub use process::LiveProcessRunner;
pub use resolver::OgrConnectionResolver;
