//! Client side of the GETPORT procedure (procedure 3) for port mapper protocol
//! as defined in RFC 1057 A.2 section.
//! https://datatracker.ietf.org/doc/rfc1057/

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::error::Result;
use crate::protocol::rpc::RpcClient;
use crate::protocol::xdr::{deserialize, portmap};

/// Asks for the port of `mapping.prog`/`mapping.vers` over `mapping.prot`.
/// The `port` field of the request is ignored by the server; a reply of
/// [`portmap::PORT_UNREGISTERED`] means the program is not registered.
pub async fn pmapproc_getport<S>(
    client: &mut RpcClient<S>,
    mapping: &portmap::mapping,
) -> Result<u32>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    debug!("pmapproc_getport({:?})", mapping);
    let mut reply =
        client.call(portmap::PortmapProgram::PMAPPROC_GETPORT as u32, mapping).await?;
    let port = deserialize::<u32>(&mut reply)?;
    debug!("pmapproc_getport --> {:?}", port);
    Ok(port)
}
