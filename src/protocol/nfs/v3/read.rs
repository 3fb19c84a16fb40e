//! Client side of the `READ` procedure (procedure 6) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.6.
//!
//! The `READ` procedure reads `count` bytes at `offset` from a regular file.
//! The server may return fewer bytes than requested; `eof` tells whether the
//! end of the file was reached.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

pub async fn nfsproc3_read<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::file::READ3args,
) -> Result<nfs3::file::READ3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_read({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_READ, args).await
}
