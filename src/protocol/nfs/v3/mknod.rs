//! Client side of the `MKNOD` procedure (procedure 11) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.11.
//!
//! The `MKNOD` procedure creates a special file: a character or block device
//! with its major and minor numbers, a socket, or a named pipe.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_mknod<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::dir::MKNOD3args,
) -> Result<nfs3::dir::diropres3ok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_mknod({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_MKNOD, args).await
}
