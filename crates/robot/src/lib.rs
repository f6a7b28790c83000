//! Robot collaborator for the order station.
//!
//! Turns pick moves into URScript programs and delivers each program once
//! over a plain TCP connection. There is no acknowledgement, retry or
//! framing: a program is written and the connection closed.

pub mod client;
pub mod error;
pub mod script;

pub use client::{InMemoryRobotClient, RobotClient, SentProgram, TcpRobotClient};
pub use error::RobotError;
pub use script::{Bin, Position, generate_move, wrap_program};
