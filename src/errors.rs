#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failure inside the staged part of the export pipeline. The message is
    /// the original error's message, preserved across the restoration path.
    #[error("{message}")]
    Export { message: String },

    #[error("failed to mount editing surface: {0}")]
    Mount(anyhow::Error),

    #[error("a bridge is already installed for this process")]
    AlreadyInstalled,
}

impl BridgeError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(msg.into())
    }
}
