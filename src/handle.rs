//! Owned file handle buffer.
//!
//! A [`FileHandle`] is the server's opaque name for a remote object. It carries
//! no path and no type, compares byte for byte and is always deep-copied:
//! every call argument is built from a fresh copy of the bytes, never from a
//! reference into session state.

use std::fmt;
use std::str::FromStr;

use crate::error::NfsError;
use crate::xdr::{mount, nfs3};

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct FileHandle(Vec<u8>);

impl FileHandle {
    pub fn new(bytes: Vec<u8>) -> Self {
        FileHandle(bytes)
    }

    /// Replaces the content with `len` zero bytes.
    pub fn allocate(&mut self, len: usize) {
        self.0 = vec![0; len];
    }

    /// Replaces the content with a deep copy of `src`.
    pub fn copy_from(&mut self, src: &FileHandle) {
        self.0.clear();
        self.0.extend_from_slice(&src.0);
    }

    /// Reinterprets the handle returned by `MOUNTPROC3_MNT`.
    pub fn from_mount(fhandle: &mount::fhandle3) -> Self {
        FileHandle(fhandle.clone())
    }

    /// Frees the buffer and leaves an empty handle behind. Releasing twice is
    /// the same as releasing once.
    pub fn release(&mut self) {
        self.0 = Vec::new();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fresh wire copy for one call.
    pub fn to_nfs(&self) -> nfs3::nfs_fh3 {
        nfs3::nfs_fh3 { data: self.0.clone() }
    }
}

impl From<nfs3::nfs_fh3> for FileHandle {
    fn from(fh: nfs3::nfs_fh3) -> Self {
        FileHandle(fh.data)
    }
}

impl From<&FileHandle> for nfs3::nfs_fh3 {
    fn from(fh: &FileHandle) -> Self {
        fh.to_nfs()
    }
}

/// Lower-case hex, two digits per byte.
impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileHandle({})", self)
    }
}

/// Parses the hex form printed by `Display`, with an optional `0x` prefix.
impl FromStr for FileHandle {
    type Err = NfsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let digits = text.trim();
        let digits =
            digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")).unwrap_or(digits);
        if digits.len() % 2 != 0 {
            return Err(NfsError::usage(format!("{}: odd number of hex digits", text)));
        }
        if digits.len() / 2 > nfs3::NFS3_FHSIZE as usize {
            return Err(NfsError::usage(format!(
                "{}: handle longer than {} bytes",
                text,
                nfs3::NFS3_FHSIZE
            )));
        }
        let bytes = (0..digits.len())
            .step_by(2)
            .map(|i| {
                digits
                    .get(i..i + 2)
                    // from_str_radix alone would take a leading sign
                    .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| NfsError::usage(format!("{}: not a hex handle", text)))
            })
            .collect::<Result<Vec<u8>, NfsError>>()?;
        Ok(FileHandle(bytes))
    }
}
