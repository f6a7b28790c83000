//! Robot error types.

use thiserror::Error;

/// Errors that can occur while delivering a program to the robot.
#[derive(Debug, Error)]
pub enum RobotError {
    /// The TCP connection could not be established.
    #[error("Failed to connect to robot at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The connection attempt did not finish in time.
    #[error("Timed out connecting to robot at {addr}")]
    Timeout { addr: String },

    /// Writing the program failed after connecting.
    #[error("Failed to send program to robot at {addr}: {source}")]
    Write {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The program contains characters outside ASCII.
    #[error("Program contains non-ASCII characters")]
    NonAscii,

    /// The robot is switched off or refused the program.
    #[error("Robot unavailable: {0}")]
    Unavailable(String),
}

/// Convenience type alias for robot results.
pub type Result<T> = std::result::Result<T, RobotError>;
