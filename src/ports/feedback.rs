//! Feedback port for progress and console reporting.

/// Receives progress and log information while an algorithm runs.
pub trait Feedback: Send + Sync {
    /// Reports the command line about to be executed.
    fn push_command_info(&self, command: &str);

    /// Reports one line of console output from the external program.
    fn push_console_info(&self, line: &str);

    /// Reports a general informational message.
    fn push_info(&self, message: &str);
}
