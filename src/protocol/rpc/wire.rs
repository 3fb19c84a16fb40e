//! RPC message framing as specified in RFC 5531 (previously RFC 1057 section 10).
//!
//! On a stream transport every RPC message travels as one record, split into
//! fragments. Each fragment starts with a 4-byte big-endian header: the highest
//! bit marks the last fragment of the record and the lower 31 bits carry the
//! fragment length.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::protocol::rpc;

/// Reads a single record-marked fragment from a stream
///
/// Appends the fragment body to `append_to` and returns true if it was the
/// last fragment of the record. The accumulated record may not grow past
/// [`rpc::MAX_RPC_RECORD_LENGTH`].
async fn read_fragment<S: AsyncRead + Unpin>(
    socket: &mut S,
    append_to: &mut Vec<u8>,
) -> io::Result<bool> {
    let mut header_buf = [0_u8; 4];
    socket.read_exact(&mut header_buf).await?;
    let fragment_header = u32::from_be_bytes(header_buf);
    let is_last = (fragment_header & (1 << 31)) > 0;
    let length = (fragment_header & ((1 << 31) - 1)) as usize;
    trace!("Reading fragment length:{}, last:{}", length, is_last);
    if append_to.len().saturating_add(length) > rpc::MAX_RPC_RECORD_LENGTH {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("RPC record length {} exceeds max {}", length, rpc::MAX_RPC_RECORD_LENGTH),
        ));
    }
    let start_offset = append_to.len();
    append_to.resize(append_to.len() + length, 0);
    socket.read_exact(&mut append_to[start_offset..]).await?;
    trace!("Finishing Reading fragment length:{}, last:{}", length, is_last);
    Ok(is_last)
}

/// Reads fragments until the last one and returns the reassembled record.
pub async fn read_record<S: AsyncRead + Unpin>(socket: &mut S) -> io::Result<Vec<u8>> {
    let mut record = Vec::new();
    while !read_fragment(socket, &mut record).await? {}
    Ok(record)
}

/// Writes data as record-marked fragments to a stream
///
/// Large buffers are divided into fragments of at most 2^31 - 1 bytes, the
/// last one flagged with the high header bit. An empty buffer still produces
/// one empty last fragment so that the peer sees a complete record.
pub async fn write_fragment<S: AsyncWrite + Unpin>(socket: &mut S, buf: &[u8]) -> io::Result<()> {
    // Maximum fragment size is 2^31 - 1 bytes
    const MAX_FRAGMENT_SIZE: usize = (1 << 31) - 1;

    let mut offset = 0;
    loop {
        let remaining = buf.len() - offset;
        let fragment_size = std::cmp::min(remaining, MAX_FRAGMENT_SIZE);
        let is_last = offset + fragment_size >= buf.len();

        let fragment_header =
            if is_last { fragment_size as u32 + (1 << 31) } else { fragment_size as u32 };

        let header_buf = u32::to_be_bytes(fragment_header);
        socket.write_all(&header_buf).await?;

        trace!("Writing fragment length:{}, last:{}", fragment_size, is_last);
        socket.write_all(&buf[offset..offset + fragment_size]).await?;

        offset += fragment_size;
        if is_last {
            break;
        }
    }
    socket.flush().await
}
