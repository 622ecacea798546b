use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum TeleopError {
    #[error("need 2 servo ports but found {}", found.len())]
    PortDiscovery { found: Vec<String> },
    #[error("serial/bus communication error")]
    Communication,
    #[error("invalid response")]
    InvalidResponse,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("operation not supported by this servo model")]
    Unsupported,
}
