//! Calling side of an ONC-RPC channel bound to one program and version.

use std::io::{self, Cursor};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{trace, warn};

use crate::error::{NfsError, Result};
use crate::protocol::rpc::{read_record, write_fragment};
use crate::protocol::xdr::{self, deserialize, Serialize};

/// Longest machine name AUTH_UNIX credentials may carry.
const MAX_MACHINE_NAME_LEN: usize = 255;

/// Builds the `AUTH_UNIX` credential a session presents on every call:
/// the local machine name, the caller's uid and gid, and the gid once more
/// as the only auxiliary group.
pub fn unix_credentials(
    machine_name: &str,
    uid: u32,
    gid: u32,
) -> io::Result<xdr::rpc::opaque_auth> {
    let stamp =
        SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as u32).unwrap_or(0);
    let mut machinename = machine_name.as_bytes().to_vec();
    machinename.truncate(MAX_MACHINE_NAME_LEN);
    let auth = xdr::rpc::auth_unix { stamp, machinename, uid, gid, gids: vec![gid] };
    xdr::rpc::opaque_auth::unix(&auth)
}

/// RPC channel over a connected byte stream
///
/// Every [`call`](RpcClient::call) writes one CALL record and waits, bounded by
/// the configured timeout, for the REPLY carrying the same xid. Replies with
/// other xids are stale answers to abandoned calls and are skipped. An
/// exchange that fails partway (timeout, I/O error, undecodable header)
/// leaves the stream at an unknown record boundary, so the channel refuses
/// further calls from then on.
#[derive(Debug)]
pub struct RpcClient<S> {
    stream: S,
    prog: u32,
    vers: u32,
    cred: xdr::rpc::opaque_auth,
    next_xid: u32,
    timeout: Duration,
    broken: bool,
}

impl<S> RpcClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Binds a channel to `prog`/`vers`; calls carry `AUTH_NULL` until
    /// [`set_credentials`](RpcClient::set_credentials) installs something else.
    pub fn new(stream: S, prog: u32, vers: u32, timeout: Duration) -> Self {
        let seed =
            SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.subsec_nanos()).unwrap_or(1);
        Self {
            stream,
            prog,
            vers,
            cred: xdr::rpc::opaque_auth::default(),
            next_xid: seed,
            timeout,
            broken: false,
        }
    }

    pub fn set_credentials(&mut self, cred: xdr::rpc::opaque_auth) {
        self.cred = cred;
    }

    pub fn program(&self) -> (u32, u32) {
        (self.prog, self.vers)
    }

    /// An earlier exchange failed and the stream can no longer be trusted.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Issues procedure `proc` with `args` and returns a reader positioned at
    /// the procedure's results, right after the accepted reply header.
    pub async fn call<A>(&mut self, proc: u32, args: &A) -> Result<Cursor<Vec<u8>>>
    where
        A: Serialize + ?Sized,
    {
        if self.broken {
            return Err(NfsError::Transport(io::Error::new(
                io::ErrorKind::NotConnected,
                "channel closed after a failed exchange",
            )));
        }
        let xid = self.next_xid;
        self.next_xid = self.next_xid.wrapping_add(1);

        let mut buf = Vec::new();
        xdr::rpc::call_message(xid, self.prog, self.vers, proc, self.cred.clone())
            .serialize(&mut buf)?;
        args.serialize(&mut buf)?;
        trace!("rpc call xid:{} prog:{} vers:{} proc:{}", xid, self.prog, self.vers, proc);

        let stream = &mut self.stream;
        let exchange = async move {
            write_fragment(stream, &buf).await?;
            loop {
                let mut reply = Cursor::new(read_record(stream).await?);
                let msg = deserialize::<xdr::rpc::rpc_msg>(&mut reply)?;
                if msg.xid == xid {
                    return Ok::<_, io::Error>((msg, reply));
                }
                warn!("Skipping reply with xid {} while waiting for {}", msg.xid, xid);
            }
        };
        let outcome = match tokio::time::timeout(self.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no reply to procedure {} within {:?}", proc, self.timeout),
            )),
        };
        let (msg, reply) = match outcome {
            Ok(exchanged) => exchanged,
            Err(e) => {
                warn!("procedure {} failed, dropping the channel: {}", proc, e);
                self.broken = true;
                return Err(e.into());
            }
        };

        match msg.body {
            xdr::rpc::rpc_body::REPLY(xdr::rpc::reply_body::MSG_ACCEPTED(accepted)) => {
                match accepted.reply_data {
                    xdr::rpc::accept_body::SUCCESS => Ok(reply),
                    xdr::rpc::accept_body::PROG_UNAVAIL => {
                        Err(NfsError::Rpc(format!("program {} unavailable", self.prog)))
                    }
                    xdr::rpc::accept_body::PROG_MISMATCH(info) => Err(NfsError::Rpc(format!(
                        "program {} version {} unsupported, server offers {}..{}",
                        self.prog, self.vers, info.low, info.high
                    ))),
                    xdr::rpc::accept_body::PROC_UNAVAIL => {
                        Err(NfsError::Rpc(format!("procedure {} unavailable", proc)))
                    }
                    xdr::rpc::accept_body::GARBAGE_ARGS => Err(NfsError::Rpc(format!(
                        "server could not decode procedure {} arguments",
                        proc
                    ))),
                }
            }
            xdr::rpc::rpc_body::REPLY(xdr::rpc::reply_body::MSG_DENIED(rejected)) => {
                match rejected {
                    xdr::rpc::rejected_reply::RPC_MISMATCH(info) => Err(NfsError::Rpc(format!(
                        "RPC version mismatch, server offers {}..{}",
                        info.low, info.high
                    ))),
                    xdr::rpc::rejected_reply::AUTH_ERROR(stat) => {
                        Err(NfsError::Rpc(format!("authentication error {:?}", stat)))
                    }
                }
            }
            xdr::rpc::rpc_body::CALL(_) => Err(NfsError::Transport(io::Error::new(
                io::ErrorKind::InvalidData,
                "received a Call instead of a Reply",
            ))),
        }
    }
}
