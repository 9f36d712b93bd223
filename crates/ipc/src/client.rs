// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client side of the bus.
//!
//! Each call opens a fresh connection, writes one request and waits for one
//! response. The wait is bounded by the call timeout and can be abandoned
//! through a [`CancelToken`].

use std::io::{self, Cursor, Read};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::bus::BusError;
use crate::envelope::{self, ActionEnvelope, TypedValue};
use crate::{framing, BusRequest, BusResponse, ManagedObjects};

/// Default bound on a remote call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(25);

/// Granularity at which a blocked read re-checks cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared flag used to abandon an in-flight call.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-client call options.
#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Upper bound on one call; `None` waits until the owner replies.
    pub timeout: Option<Duration>,
    pub cancel: Option<CancelToken>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_CALL_TIMEOUT),
            cancel: None,
        }
    }
}

/// A client of the primary instance.
#[derive(Debug, Clone)]
pub struct BusClient {
    socket_path: PathBuf,
    options: CallOptions,
}

impl BusClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            options: CallOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Send one request and wait for its response.
    pub fn call(&self, request: &BusRequest) -> Result<BusResponse, BusError> {
        let deadline = self.options.timeout.map(|t| Instant::now() + t);
        self.check_cancelled()?;

        let mut stream = UnixStream::connect(&self.socket_path)?;
        if let Some(timeout) = self.options.timeout {
            stream.set_write_timeout(Some(timeout))?;
        }
        framing::write_message(&mut stream, request)?;

        let frame = self.read_frame(&mut stream, deadline)?;
        let response: BusResponse = framing::read_message(&mut Cursor::new(frame))?;
        match response {
            BusResponse::Error { message } => Err(BusError::Remote(message)),
            other => Ok(other),
        }
    }

    /// Accumulate one complete frame, polling so cancellation and the
    /// deadline are observed while the owner is busy.
    fn read_frame(
        &self,
        stream: &mut UnixStream,
        deadline: Option<Instant>,
    ) -> Result<Vec<u8>, BusError> {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            if let Some(total) = framing::frame_len(&buf)? {
                if buf.len() >= total {
                    buf.truncate(total);
                    return Ok(buf);
                }
            }

            self.check_cancelled()?;
            let wait = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Err(BusError::Timeout(self.options.timeout.unwrap_or_default()));
                    }
                    remaining.min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };
            stream.set_read_timeout(Some(wait))?;

            match stream.read(&mut chunk) {
                Ok(0) => {
                    return Err(BusError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed before a response arrived",
                    )))
                }
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::WouldBlock
                            | io::ErrorKind::TimedOut
                            | io::ErrorKind::Interrupted
                    ) => {}
                Err(e) => return Err(BusError::Io(e)),
            }
        }
    }

    fn check_cancelled(&self) -> Result<(), BusError> {
        match &self.options.cancel {
            Some(token) if token.is_cancelled() => Err(BusError::Cancelled),
            _ => Ok(()),
        }
    }

    fn expect_ok(&self, request: &BusRequest) -> Result<(), BusError> {
        match self.call(request)? {
            BusResponse::Ok => Ok(()),
            other => Err(BusError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    /// Version handshake; returns the owner's version.
    pub fn hello(&self, version: &str) -> Result<String, BusError> {
        let request = BusRequest::Hello {
            version: version.to_string(),
        };
        match self.call(&request)? {
            BusResponse::Hello { version } => Ok(version),
            other => Err(BusError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    /// Enumerate managed device objects.
    pub fn managed_objects(&self) -> Result<ManagedObjects, BusError> {
        match self.call(&BusRequest::GetManagedObjects)? {
            BusResponse::ManagedObjects { objects } => Ok(objects),
            other => Err(BusError::UnexpectedResponse(format!("{:?}", other))),
        }
    }

    /// Route an action envelope through the owner's router.
    pub fn activate_action(&self, envelope: &ActionEnvelope) -> Result<(), BusError> {
        let request = BusRequest::ActivateAction {
            envelope: envelope::encode(envelope)?,
        };
        self.expect_ok(&request)
    }

    /// Activate an application-level action on the owner.
    pub fn activate_app(&self, action: &str, target: Option<TypedValue>) -> Result<(), BusError> {
        let request = BusRequest::ActivateApp {
            action: action.to_string(),
            target,
        };
        self.expect_ok(&request)
    }

    pub fn open(&self, uris: Vec<String>) -> Result<(), BusError> {
        self.expect_ok(&BusRequest::Open { uris })
    }

    pub fn activate(&self) -> Result<(), BusError> {
        self.expect_ok(&BusRequest::Activate)
    }

    pub fn quit(&self) -> Result<(), BusError> {
        self.expect_ok(&BusRequest::Quit)
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
