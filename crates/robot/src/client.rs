//! Robot client trait with TCP and in-memory implementations.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::ItemId;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::error::{Result, RobotError};
use crate::script::wrap_program;

/// Default primary interface port of the robot controller.
pub const DEFAULT_PORT: u16 = 30002;

/// Default time allowed for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for delivering programs to the robot controller.
#[async_trait]
pub trait RobotClient: Send + Sync {
    /// Wraps `body` as the program for `item` and delivers it once.
    async fn send_program(&self, body: &str, item: ItemId) -> Result<()>;
}

#[async_trait]
impl<T: RobotClient + ?Sized> RobotClient for Arc<T> {
    async fn send_program(&self, body: &str, item: ItemId) -> Result<()> {
        (**self).send_program(body, item).await
    }
}

/// Sends each program over its own TCP connection.
#[derive(Debug, Clone)]
pub struct TcpRobotClient {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpRobotClient {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the `"host:port"` address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for TcpRobotClient {
    fn default() -> Self {
        Self::new("localhost", DEFAULT_PORT)
    }
}

#[async_trait]
impl RobotClient for TcpRobotClient {
    #[tracing::instrument(skip(self, body), fields(addr = %self.addr()))]
    async fn send_program(&self, body: &str, item: ItemId) -> Result<()> {
        let program = wrap_program(body, item);
        if !program.is_ascii() {
            return Err(RobotError::NonAscii);
        }

        let addr = self.addr();
        let mut stream = match tokio::time::timeout(self.connect_timeout, TcpStream::connect(&addr))
            .await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(RobotError::Connect { addr, source }),
            Err(_) => return Err(RobotError::Timeout { addr }),
        };

        stream
            .write_all(program.as_bytes())
            .await
            .map_err(|source| RobotError::Write {
                addr: addr.clone(),
                source,
            })?;
        stream
            .shutdown()
            .await
            .map_err(|source| RobotError::Write { addr, source })?;

        metrics::counter!("robot_programs_sent_total").increment(1);
        tracing::debug!(%item, bytes = program.len(), "program sent");
        Ok(())
    }
}

/// A program recorded by [`InMemoryRobotClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentProgram {
    pub item: ItemId,
    pub program: String,
}

#[derive(Debug, Default)]
struct InMemoryRobotState {
    sent: Vec<SentProgram>,
    fail_on_send: bool,
}

/// In-memory robot that records programs instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRobotClient {
    state: Arc<RwLock<InMemoryRobotState>>,
}

impl InMemoryRobotClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the client to reject every following send.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .fail_on_send = fail;
    }

    /// Returns every program recorded so far, oldest first.
    pub fn sent(&self) -> Vec<SentProgram> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sent
            .clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .sent
            .len()
    }
}

#[async_trait]
impl RobotClient for InMemoryRobotClient {
    async fn send_program(&self, body: &str, item: ItemId) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state.fail_on_send {
            return Err(RobotError::Unavailable("robot offline".to_string()));
        }

        state.sent.push(SentProgram {
            item,
            program: wrap_program(body, item),
        });
        Ok(())
    }
}
