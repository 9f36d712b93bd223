// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bus-name ownership: become the primary instance or connect to it.
//!
//! Ownership of the well-known name is an exclusive lock on `bus.lock` in
//! the state directory. The owner binds `bus.sock` and writes `bus.pid`;
//! everyone else talks to the owner through that socket.

use std::fs;
use std::io::{self, Read};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::client::BusClient;
use crate::{framing, BusRequest, BusResponse};

/// Socket filename within the state directory.
const SOCKET_NAME: &str = "bus.sock";
/// PID filename within the state directory.
const PID_NAME: &str = "bus.pid";
/// Lock filename for single instance guarantee.
const LOCK_NAME: &str = "bus.lock";

/// Per-connection read/write timeout on the owner side.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a client waits for a freshly locked owner to bind its socket.
const OWNER_POLL_ATTEMPTS: u32 = 150;
const OWNER_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Errors raised while registering on or talking over the bus.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("bus registration failed: {0}")]
    Registration(String),

    #[error("bus io error: {0}")]
    Io(#[from] io::Error),

    #[error("call timed out after {0:?}")]
    Timeout(Duration),

    #[error("call cancelled")]
    Cancelled,

    #[error("remote error: {0}")]
    Remote(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error(transparent)]
    Envelope(#[from] crate::EnvelopeError),
}

/// File locations of the bus within a state directory.
#[derive(Debug, Clone)]
pub struct BusPaths {
    dir: PathBuf,
}

impl BusPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn socket_path(&self) -> PathBuf {
        self.dir.join(SOCKET_NAME)
    }

    pub fn pid_path(&self) -> PathBuf {
        self.dir.join(PID_NAME)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(LOCK_NAME)
    }
}

/// Outcome of trying to own the bus name.
#[derive(Debug)]
pub enum Registration {
    /// This process owns the name and serves requests.
    Primary(BusOwner),
    /// Another process owns the name; talk to it through this client.
    Secondary(BusClient),
}

/// Try to become the bus owner, falling back to a client of the current owner.
pub fn register(paths: &BusPaths) -> Result<Registration, BusError> {
    fs::create_dir_all(paths.dir())?;

    match acquire_lock(&paths.lock_path())? {
        Some(lock) => {
            let owner = BusOwner::bind(paths.clone(), lock)?;
            tracing::debug!(socket = %paths.socket_path().display(), "registered as primary");
            Ok(Registration::Primary(owner))
        }
        None => {
            wait_for_owner(paths)?;
            tracing::debug!(socket = %paths.socket_path().display(), "primary already running");
            Ok(Registration::Secondary(BusClient::new(paths.socket_path())))
        }
    }
}

fn acquire_lock(lock_path: &Path) -> io::Result<Option<fs::File>> {
    use fs2::FileExt;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)?;
    match file.try_lock_exclusive() {
        Ok(()) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(None),
        Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => Ok(None),
        Err(e) => Err(e),
    }
}

/// The owner may hold the lock a moment before its socket accepts connections.
fn wait_for_owner(paths: &BusPaths) -> Result<(), BusError> {
    let socket_path = paths.socket_path();
    for _ in 0..OWNER_POLL_ATTEMPTS {
        if UnixStream::connect(&socket_path).is_ok() {
            return Ok(());
        }
        std::thread::sleep(OWNER_POLL_INTERVAL);
    }
    Err(BusError::Registration(format!(
        "{} is owned by another process but {} does not accept connections",
        crate::BUS_NAME,
        socket_path.display()
    )))
}

/// The registered owner of the bus name.
///
/// Dropping the owner removes the socket and PID files and releases the lock.
#[derive(Debug)]
pub struct BusOwner {
    listener: UnixListener,
    paths: BusPaths,
    _lock: fs::File,
}

impl BusOwner {
    fn bind(paths: BusPaths, lock: fs::File) -> Result<Self, BusError> {
        let socket_path = paths.socket_path();
        // A previous owner that died without cleanup leaves its socket behind
        let _ = fs::remove_file(&socket_path);

        let listener = UnixListener::bind(&socket_path).map_err(|e| {
            BusError::Registration(format!("failed to bind {}: {}", socket_path.display(), e))
        })?;
        fs::write(paths.pid_path(), format!("{}", std::process::id()))?;

        Ok(Self {
            listener,
            paths,
            _lock: lock,
        })
    }

    pub fn paths(&self) -> &BusPaths {
        &self.paths
    }

    /// Block until the next connection arrives.
    pub fn accept(&self) -> io::Result<BusConnection> {
        let (stream, _) = self.listener.accept()?;
        stream.set_read_timeout(Some(CONNECTION_TIMEOUT))?;
        stream.set_write_timeout(Some(CONNECTION_TIMEOUT))?;
        Ok(BusConnection { stream })
    }
}

impl Drop for BusOwner {
    fn drop(&mut self) {
        let _ = fs::remove_file(self.paths.pid_path());
        let _ = fs::remove_file(self.paths.socket_path());
    }
}

/// One accepted connection carrying a single request.
#[derive(Debug)]
pub struct BusConnection {
    stream: UnixStream,
}

impl BusConnection {
    /// Read the request, or `None` if the peer closed without sending one.
    pub fn read_request(&mut self) -> io::Result<Option<BusRequest>> {
        let mut first = [0u8; 1];
        loop {
            match self.stream.read(&mut first) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        let mut reader = (&first[..]).chain(&mut self.stream);
        framing::read_message(&mut reader).map(Some)
    }

    pub fn reply(&mut self, response: &BusResponse) -> io::Result<()> {
        framing::write_message(&mut self.stream, response)
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
