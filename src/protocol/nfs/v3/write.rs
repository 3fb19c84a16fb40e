//! Client side of the `WRITE` procedure (procedure 7) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.7.
//!
//! The `WRITE` procedure stores data at an offset of a regular file.
//!
//! The reply's `count` can be lower than the bytes sent and `committed` tells
//! how durable the stored data is, which may exceed what `stable` asked for.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

/// Issues `WRITE` with the stability level carried in `args`.
pub async fn nfsproc3_write<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::file::WRITE3args,
) -> Result<nfs3::file::WRITE3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!(
        "nfsproc3_write({:?}, offset:{}, count:{}, {:?})",
        args.file, args.offset, args.count, args.stable
    );
    call(client, nfs3::NFSProgram::NFSPROC3_WRITE, args).await
}
