//! Connection-string resolver port.

/// Maps an opaque layer reference to a connection string the external
/// tool understands.
pub trait ConnectionResolver: Send + Sync {
    /// Resolves `layer` into a non-empty, driver-specific connection string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidLayerReference`] when the reference is
    /// empty or resolves to nothing.
    fn connection_string(&self, layer: &str) -> crate::Result<String>;
}
