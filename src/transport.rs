//! Transport & Auth Manager.
//!
//! A [`Connection`] owns the RPC channel of one service (MOUNT or NFS). It is
//! opened lazily: the portmapper on the server is asked over TCP for the
//! service's port, a source port below 1024 is tried first when configured,
//! and the channel gets `AUTH_UNIX` credentials built from the session's
//! uid and gid.

use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::{lookup_host, TcpSocket, TcpStream};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{NfsError, Result};
use crate::protocol::nfs::portmap::pmapproc_getport;
use crate::protocol::rpc::{unix_credentials, RpcClient};
use crate::xdr::{mount, nfs3, portmap};

/// Highest privileged source port; the scan runs downward from here.
pub const MAX_PRIVILEGED_PORT: u16 = 1023;

/// RPC channel of a connected service.
pub type Channel = RpcClient<TcpStream>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Service {
    Mount,
    Nfs,
}

impl Service {
    pub fn program(&self) -> u32 {
        match self {
            Service::Mount => mount::PROGRAM,
            Service::Nfs => nfs3::PROGRAM,
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            Service::Mount => mount::VERSION,
            Service::Nfs => nfs3::VERSION,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Mount => write!(f, "MOUNT"),
            Service::Nfs => write!(f, "NFS"),
        }
    }
}

/// Lazily opened channel to one service.
#[derive(Debug)]
pub struct Connection {
    service: Service,
    channel: Option<Channel>,
}

impl Connection {
    pub fn new(service: Service) -> Self {
        Connection { service, channel: None }
    }

    pub fn service(&self) -> Service {
        self.service
    }

    /// Checks the socket: a channel whose peer address can no longer be read,
    /// or whose last exchange failed, is not connected.
    pub fn is_connected(&self) -> bool {
        self.channel.as_ref().is_some_and(|channel| {
            !channel.is_broken() && channel.stream().peer_addr().is_ok()
        })
    }

    /// Returns the live channel, opening it first when needed.
    pub async fn connect(&mut self, config: &ClientConfig) -> Result<&mut Channel> {
        if !self.is_connected() {
            // a dead or broken channel still holds its socket
            self.disconnect().await;
            let host = config
                .host
                .as_deref()
                .ok_or_else(|| NfsError::usage("Host not set, use 'host <name>' first"))?;
            let (prog, vers) = (self.service.program(), self.service.version());
            let port = getport(host, config, prog, vers).await?;
            let stream = open_stream(host, port, config).await?;
            let mut channel = RpcClient::new(stream, prog, vers, config.timeout);
            channel.set_credentials(unix_credentials(
                &config.machine_name(),
                config.uid,
                config.gid,
            )?);
            debug!("{} channel ready on {}:{}", self.service, host, port);
            self.channel = Some(channel);
        }
        self.channel.as_mut().ok_or_else(|| {
            NfsError::Transport(io::Error::new(io::ErrorKind::NotConnected, "channel not open"))
        })
    }

    /// Installs credentials for the current uid and gid on a live channel.
    pub fn refresh_credentials(&mut self, config: &ClientConfig) -> Result<()> {
        if let Some(channel) = self.channel.as_mut() {
            channel.set_credentials(unix_credentials(
                &config.machine_name(),
                config.uid,
                config.gid,
            )?);
        }
        Ok(())
    }

    /// Drops the channel and closes its socket. Idempotent.
    pub async fn disconnect(&mut self) {
        if let Some(channel) = self.channel.take() {
            let mut stream = channel.into_inner();
            if let Err(e) = stream.shutdown().await {
                debug!("{} socket shutdown: {:?}", self.service, e);
            }
            debug!("{} connection closed", self.service);
        }
    }
}

/// Asks the portmapper on `host` for the TCP port of `prog`/`vers`.
pub async fn getport(host: &str, config: &ClientConfig, prog: u32, vers: u32) -> Result<u16> {
    let stream = open_ephemeral(host, config.portmap_port, config.timeout).await?;
    let mut channel = RpcClient::new(stream, portmap::PROGRAM, portmap::VERSION, config.timeout);
    let mapping = portmap::mapping { prog, vers, prot: portmap::IPPROTO_TCP, port: 0 };
    let port = pmapproc_getport(&mut channel, &mapping).await;
    if let Err(e) = channel.into_inner().shutdown().await {
        debug!("portmapper socket shutdown: {:?}", e);
    }
    let port = port?;
    if port == portmap::PORT_UNREGISTERED {
        return Err(NfsError::Transport(io::Error::new(
            io::ErrorKind::NotFound,
            format!("program {} version {} is not registered on {}", prog, vers, host),
        )));
    }
    u16::try_from(port).map_err(|_| {
        NfsError::Transport(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("portmapper returned port {}", port),
        ))
    })
}

async fn resolve(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port)).await?.collect();
    if addrs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: no address found", host),
        ));
    }
    Ok(addrs)
}

/// Connects to the first reachable address of `host`, from a privileged
/// source port when configured and allowed.
async fn open_stream(host: &str, port: u16, config: &ClientConfig) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in resolve(host, port).await? {
        if config.privileged_port {
            match connect_privileged(addr, config.timeout).await {
                Ok(Some(stream)) => return Ok(stream),
                Ok(None) => {
                    warn!("No privileged source port for {}, using an ephemeral port", addr)
                }
                Err(e) => {
                    debug!("connect {} failed: {:?}", addr, e);
                    last_err = Some(e);
                    continue;
                }
            }
        }
        match connect_from(new_socket(addr)?, addr, config.timeout).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                debug!("connect {} failed: {:?}", addr, e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other(format!("Can't connect to {}", host))))
}

async fn open_ephemeral(host: &str, port: u16, timeout: Duration) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in resolve(host, port).await? {
        match connect_from(new_socket(addr)?, addr, timeout).await {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::other(format!("Can't connect to {}", host))))
}

/// Scans source ports from [`MAX_PRIVILEGED_PORT`] downward. `None` means no
/// port could be used, either because binding them is not permitted or
/// because every one is taken.
async fn connect_privileged(addr: SocketAddr, timeout: Duration) -> io::Result<Option<TcpStream>> {
    let local_ip = match addr {
        SocketAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        SocketAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    };
    for port in (1..=MAX_PRIVILEGED_PORT).rev() {
        let socket = new_socket(addr)?;
        match socket.bind(SocketAddr::new(local_ip, port)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                debug!("binding port {} not permitted: {:?}", port, e);
                return Ok(None);
            }
            Err(_) => continue,
        }
        match connect_from(socket, addr, timeout).await {
            Ok(stream) => return Ok(Some(stream)),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::AddrInUse | io::ErrorKind::AddrNotAvailable
                ) =>
            {
                continue
            }
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

fn new_socket(addr: SocketAddr) -> io::Result<TcpSocket> {
    let socket = match addr {
        SocketAddr::V4(_) => TcpSocket::new_v4()?,
        SocketAddr::V6(_) => TcpSocket::new_v6()?,
    };
    socket.set_reuseaddr(true)?;
    socket.set_keepalive(true)?;
    Ok(socket)
}

async fn connect_from(
    socket: TcpSocket,
    addr: SocketAddr,
    timeout: Duration,
) -> io::Result<TcpStream> {
    let stream = tokio::time::timeout(timeout, socket.connect(addr)).await.map_err(|_| {
        io::Error::new(io::ErrorKind::TimedOut, format!("connect {} timed out", addr))
    })??;
    stream.set_nodelay(true)?;
    debug!("Connected {:?} -> {:?}", stream.local_addr(), stream.peer_addr());
    Ok(stream)
}
