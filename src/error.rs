use thiserror::Error;

#[derive(Error, Debug)]
pub enum EntlookError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid lookup query: {0}")]
    InvalidQuery(String),

    #[error("'{0}' lookup is not yet implemented")]
    Unimplemented(&'static str),

    #[error("could not connect to control plane at {address}: {reason}")]
    ControlPlaneConnect { address: String, reason: String },

    #[error("could not ping control plane: {0}")]
    Ping(String),

    #[error("could not send usage event: {0}")]
    Telemetry(String),

    #[error("authentication with the platform failed: {0}")]
    Auth(String),

    #[error("entity search failed: {0}")]
    Search(String),

    #[error("failed to render entity record: {0}")]
    Render(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EntlookError>;
