//! Client side of the `LOOKUP` procedure (procedure 3) for NFS version 3 protocol
//! as defined in RFC 1813 section 3.3.3.
//!
//! The `LOOKUP` procedure translates one file name in a directory into a file
//! handle. It is the single step of path resolution: one call per component.
//!
//! On success the server returns:
//! - The file handle of the named object
//! - The object attributes, which the server may omit
//! - The attributes of the searched directory

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use super::call;
use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::nfs3;

/// Issues `LOOKUP` for one name in one directory.
pub async fn nfsproc3_lookup<S>(
    client: &mut RpcClient<S>,
    args: &nfs3::LOOKUP3args,
) -> Result<nfs3::LOOKUP3resok>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("nfsproc3_lookup({:?})", args);
    call(client, nfs3::NFSProgram::NFSPROC3_LOOKUP, args).await
}
