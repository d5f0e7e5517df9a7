//! Background TCP exchange between host and client
//!
//! A worker thread owns the socket and runs one exchange per cycle:
//! - host: send the latest published snapshot, then read one command
//! - client: read one snapshot (smoothed), then send the held command
//!
//! The game loop never touches the socket. It publishes into a mutex slot
//! and drains a channel, so neither side ever reads a half-written value.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use thiserror::Error;

use super::protocol::{decode_command, decode_fields, encode_command, encode_state};
use super::smoothing::SnapshotSmoother;
use crate::consts::*;
use crate::input::Command;
use crate::sim::GameState;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("cannot listen on port {port}: {source}")]
    Bind { port: u16, source: io::Error },
    #[error("no peer connected within {0:?}")]
    AcceptTimeout(Duration),
    #[error("cannot connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Which end of the link this process is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Host,
    Client,
}

/// Bound listener waiting for the single peer
pub struct PendingHost {
    listener: TcpListener,
}

impl PendingHost {
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Wait up to `timeout` for a client, then start the host worker
    pub fn accept(self, timeout: Duration) -> Result<NetSession, NetError> {
        self.listener.set_nonblocking(true)?;
        let started = Instant::now();
        let (stream, peer) = loop {
            match self.listener.accept() {
                Ok(conn) => break conn,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    if started.elapsed() >= timeout {
                        return Err(NetError::AcceptTimeout(timeout));
                    }
                    thread::sleep(Duration::from_millis(10));
                }
                Err(e) => return Err(e.into()),
            }
        };
        log::info!("Peer connected from {}", peer);
        NetSession::start(Role::Host, stream)
    }
}

/// A running host or client link
pub struct NetSession {
    role: Role,
    stop: Arc<AtomicBool>,
    stream: TcpStream,
    worker: Option<JoinHandle<()>>,
    /// Host: snapshot the worker sends next
    outgoing_state: Arc<Mutex<Option<GameState>>>,
    /// Client: command the worker sends every cycle until replaced
    outgoing_command: Arc<Mutex<Command>>,
    commands: Receiver<Command>,
    states: Receiver<GameState>,
}

impl NetSession {
    /// Bind the host port without waiting for a peer
    pub fn listen(port: u16) -> Result<PendingHost, NetError> {
        let listener = TcpListener::bind(("0.0.0.0", port))
            .map_err(|source| NetError::Bind { port, source })?;
        log::info!("Waiting for a player on port {}", port);
        Ok(PendingHost { listener })
    }

    /// Listen on `port` and block until one peer connects
    pub fn host(port: u16) -> Result<Self, NetError> {
        Self::listen(port)?.accept(Duration::from_millis(NET_ACCEPT_TIMEOUT_MS))
    }

    pub fn connect(host: &str, port: u16) -> Result<Self, NetError> {
        let addr = format!("{host}:{port}");
        let connect_err = |source: io::Error| NetError::Connect {
            addr: addr.clone(),
            source,
        };
        let target = addr
            .to_socket_addrs()
            .map_err(connect_err)?
            .next()
            .ok_or_else(|| connect_err(io::Error::new(io::ErrorKind::NotFound, "no address")))?;
        let stream = TcpStream::connect(target).map_err(connect_err)?;
        log::info!("Connected to {}", addr);
        Self::start(Role::Client, stream)
    }

    fn start(role: Role, stream: TcpStream) -> Result<Self, NetError> {
        stream.set_nonblocking(false)?;
        stream.set_nodelay(true)?;
        stream.set_read_timeout(Some(Duration::from_millis(NET_RECV_TIMEOUT_MS)))?;

        let stop = Arc::new(AtomicBool::new(false));
        let outgoing_state = Arc::new(Mutex::new(None));
        let outgoing_command = Arc::new(Mutex::new(Command::None));
        let (command_tx, commands) = unbounded();
        let (state_tx, states) = unbounded();

        let worker_stream = stream.try_clone()?;
        let worker_stop = Arc::clone(&stop);
        let worker = match role {
            Role::Host => {
                let slot = Arc::clone(&outgoing_state);
                thread::Builder::new()
                    .name("net-host".into())
                    .spawn(move || host_loop(worker_stream, worker_stop, slot, command_tx))?
            }
            Role::Client => {
                let slot = Arc::clone(&outgoing_command);
                thread::Builder::new()
                    .name("net-client".into())
                    .spawn(move || client_loop(worker_stream, worker_stop, slot, state_tx))?
            }
        };

        Ok(Self {
            role,
            stop,
            stream,
            worker: Some(worker),
            outgoing_state,
            outgoing_command,
            commands,
            states,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Worker still exchanging messages
    pub fn is_running(&self) -> bool {
        !self.stop.load(Ordering::Relaxed)
            && self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Host: replace the snapshot sent on the next cycle
    pub fn publish_state(&self, state: GameState) {
        *self.outgoing_state.lock() = Some(state);
    }

    /// Host: newest command received since the last call
    pub fn latest_command(&self) -> Option<Command> {
        self.commands.try_iter().last()
    }

    /// Client: command to send every cycle until replaced
    pub fn send_command(&self, command: Command) {
        *self.outgoing_command.lock() = command;
    }

    /// Client: newest smoothed snapshot received since the last call
    pub fn latest_state(&self) -> Option<GameState> {
        self.states.try_iter().last()
    }

    /// Stop the worker and wait for it to exit
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Network worker panicked");
            }
            log::info!("Network session closed");
        }
    }
}

impl Drop for NetSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Read one message. `Ok(None)` means nothing arrived before the timeout.
fn read_message(stream: &mut TcpStream, buf: &mut [u8]) -> io::Result<Option<String>> {
    match stream.read(buf) {
        Ok(0) => Err(io::ErrorKind::UnexpectedEof.into()),
        Ok(n) => Ok(Some(String::from_utf8_lossy(&buf[..n]).into_owned())),
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Errors after which the link cannot recover
fn is_disconnect(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::NotConnected
    )
}

/// Shared per-cycle error policy. Returns false when the loop should end.
fn keep_going(stop: &AtomicBool, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(_) if stop.load(Ordering::Relaxed) => false,
        Err(e) if is_disconnect(&e) => {
            log::info!("Peer disconnected: {}", e);
            stop.store(true, Ordering::Relaxed);
            false
        }
        Err(e) => {
            log::warn!("Network error: {}", e);
            true
        }
    }
}

fn host_cycle(
    stream: &mut TcpStream,
    buf: &mut [u8],
    slot: &Mutex<Option<GameState>>,
    commands: &Sender<Command>,
) -> io::Result<()> {
    let latest = *slot.lock();
    if let Some(state) = latest {
        stream.write_all(encode_state(&state).as_bytes())?;
    }
    if let Some(text) = read_message(stream, buf)? {
        match decode_command(&text) {
            Ok(command) => {
                if commands.send(command).is_err() {
                    return Err(io::ErrorKind::NotConnected.into());
                }
            }
            Err(e) => log::debug!("Ignoring message: {}", e),
        }
    }
    Ok(())
}

fn client_cycle(
    stream: &mut TcpStream,
    buf: &mut [u8],
    smoother: &mut SnapshotSmoother,
    slot: &Mutex<Command>,
    states: &Sender<GameState>,
) -> io::Result<()> {
    if let Some(text) = read_message(stream, buf)? {
        match decode_fields(&text) {
            Ok(fields) => {
                if states.send(smoother.push(fields)).is_err() {
                    return Err(io::ErrorKind::NotConnected.into());
                }
            }
            Err(e) => log::debug!("Ignoring snapshot: {}", e),
        }
    }
    let command = *slot.lock();
    stream.write_all(encode_command(command).as_bytes())
}

fn host_loop(
    mut stream: TcpStream,
    stop: Arc<AtomicBool>,
    slot: Arc<Mutex<Option<GameState>>>,
    commands: Sender<Command>,
) {
    let mut buf = [0u8; NET_BUFFER_SIZE];
    while !stop.load(Ordering::Relaxed) {
        let cycle = host_cycle(&mut stream, &mut buf, &slot, &commands);
        if !keep_going(&stop, cycle) {
            break;
        }
        thread::sleep(Duration::from_millis(NET_CYCLE_MS));
    }
}

fn client_loop(
    mut stream: TcpStream,
    stop: Arc<AtomicBool>,
    slot: Arc<Mutex<Command>>,
    states: Sender<GameState>,
) {
    let mut buf = [0u8; NET_BUFFER_SIZE];
    let mut smoother = SnapshotSmoother::default();
    while !stop.load(Ordering::Relaxed) {
        let cycle = client_cycle(&mut stream, &mut buf, &mut smoother, &slot, &states);
        if !keep_going(&stop, cycle) {
            break;
        }
        thread::sleep(Duration::from_millis(NET_CYCLE_MS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_times_out() {
        let pending = NetSession::listen(0).unwrap();
        let err = pending.accept(Duration::from_millis(50)).err().unwrap();
        assert!(matches!(err, NetError::AcceptTimeout(_)));
    }

    #[test]
    fn test_connect_refused() {
        // Bind then drop to get a port nobody is listening on
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let err = NetSession::connect("127.0.0.1", port).err().unwrap();
        assert!(matches!(err, NetError::Connect { .. }));
    }
}
