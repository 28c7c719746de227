use std::io::Error as IoError;
use thiserror::Error;

use crate::gateway::GatewayError;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Error connecting to server: {0}")]
    Connection(#[source] GatewayError),
    #[error("IO Error: `{0}`")]
    IoError(#[from] IoError),
    #[error("Input closed before a database was selected")]
    InputClosed,
}
