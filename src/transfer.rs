//! Data Transfer.
//!
//! Reads are bounded by the size the server reports for the file, so reading
//! at or past the end returns no data instead of failing. Writes go to regular
//! files only, at the durability configured for the session, and a write the
//! server only partly accepted is returned as [`NfsError::ShortWrite`].

use tracing::debug;

use crate::attr::Attributes;
use crate::error::{NfsError, Result};
use crate::remote::{RemoteFs, WriteReply};
use crate::session::Session;

/// Bytes to request at `offset` of a file of `size` bytes.
fn clamp(size: u64, offset: u64, maxlen: u32) -> u32 {
    if offset >= size {
        return 0;
    }
    u32::try_from(size - offset).map_or(maxlen, |left| left.min(maxlen))
}

fn readable(path: &str, attributes: &Attributes) -> Result<()> {
    if attributes.is_dir() {
        return Err(NfsError::IsDirectory(path.to_string()));
    }
    if attributes.is_symlink() {
        return Err(NfsError::IsSymlink(path.to_string()));
    }
    Ok(())
}

impl<R: RemoteFs> Session<R> {
    /// Reads at most `maxlen` bytes of `path` at `offset`, following symbolic
    /// links. The data is what the server returned, which may be less than
    /// was asked for.
    pub async fn read(&mut self, path: &str, offset: u64, maxlen: u32) -> Result<Vec<u8>> {
        let resolved = self.resolve(path, true).await?;
        readable(path, &resolved.attributes)?;

        let count = clamp(resolved.attributes.size, offset, maxlen);
        if count == 0 {
            return Ok(Vec::new());
        }
        let reply = self.remote.read(&resolved.handle, offset, count).await?;
        debug!("read {:?} offset:{} count:{} -> {}", path, offset, count, reply.data.len());
        Ok(reply.data)
    }

    /// Reads the whole of `path` in `read_chunk` sized steps until a step
    /// returns nothing.
    pub async fn read_to_end(&mut self, path: &str) -> Result<Vec<u8>> {
        let resolved = self.resolve(path, true).await?;
        readable(path, &resolved.attributes)?;

        let size = resolved.attributes.size;
        let chunk = self.config.read_chunk.max(1);
        let mut contents = Vec::new();
        loop {
            let offset = contents.len() as u64;
            let count = clamp(size, offset, chunk);
            if count == 0 {
                break;
            }
            let reply = self.remote.read(&resolved.handle, offset, count).await?;
            if reply.data.is_empty() {
                break;
            }
            contents.extend_from_slice(&reply.data);
        }
        debug!("read {:?}: {} bytes", path, contents.len());
        Ok(contents)
    }

    /// Writes `data` to `path` at `offset`. A symbolic link in last position
    /// is not followed, and the target must be a regular file.
    pub async fn write(&mut self, path: &str, offset: u64, data: &[u8]) -> Result<WriteReply> {
        let resolved = self.resolve(path, false).await?;
        if !resolved.attributes.is_regular() {
            return Err(NfsError::NotRegularFile(path.to_string()));
        }
        let requested = u32::try_from(data.len()).map_err(|_| {
            NfsError::usage(format!("{}: {} bytes is too much for one write", path, data.len()))
        })?;

        let stable = self.config.write_stability;
        let reply = self.remote.write(&resolved.handle, offset, data, stable).await?;
        debug!(
            "write {:?} offset:{} count:{} -> {} {:?}",
            path, offset, requested, reply.count, reply.committed
        );
        if reply.count < requested {
            return Err(NfsError::ShortWrite { accepted: reply.count, requested });
        }
        Ok(reply)
    }
}
