//! `MOUNT` version 3 (RFC 1813 Appendix I) XDR types.
//!
//! MNT hands out the root handle of an export, UMNT releases it and EXPORT
//! lists what the server offers together with the groups allowed to mount it.

#![allow(dead_code)]
// RFC names
#![allow(non_camel_case_types)]

use std::fmt;
use std::io::{Read, Write};

use num_derive::{FromPrimitive, ToPrimitive};

use super::*;

/// MOUNT program number for RPC
pub const PROGRAM: u32 = 100005;
/// MOUNT protocol version 3
pub const VERSION: u32 = 3;

/// Maximum bytes in a path name
pub const MNTPATHLEN: u32 = 1024;
/// Maximum bytes in a name
pub const MNTNAMLEN: u32 = 255;
/// Maximum bytes in a V3 file handle
pub const FHSIZE3: u32 = 64;

/// File handle for NFS version 3
pub type fhandle3 = Vec<u8>;
/// Directory path on the server
pub type dirpath = Vec<u8>;
/// Name in the directory
pub type name = Vec<u8>;

/// Status codes returned by `MOUNT` protocol operations
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum mountstat3 {
    /// No error
    #[default]
    MNT3_OK = 0, /* no error */
    /// Not owner
    MNT3ERR_PERM = 1, /* Not owner */
    /// No such file or directory
    MNT3ERR_NOENT = 2, /* No such file or directory */
    /// I/O error
    MNT3ERR_IO = 5, /* I/O error */
    /// Permission denied
    MNT3ERR_ACCES = 13, /* Permission denied */
    /// Not a directory
    MNT3ERR_NOTDIR = 20, /* Not a directory */
    /// Invalid argument
    MNT3ERR_INVAL = 22, /* Invalid argument */
    /// Filename too long
    MNT3ERR_NAMETOOLONG = 63, /* Filename too long */
    /// Operation not supported
    MNT3ERR_NOTSUPP = 10004, /* Operation not supported */
    /// A failure on the server
    MNT3ERR_SERVERFAULT = 10006, /* A failure on the server */
}
SerializeEnum!(mountstat3);
DeserializeEnum!(mountstat3);

impl fmt::Display for mountstat3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            mountstat3::MNT3_OK => "No error",
            mountstat3::MNT3ERR_PERM => "Not owner",
            mountstat3::MNT3ERR_NOENT => "No such file or directory",
            mountstat3::MNT3ERR_IO => "I/O error",
            mountstat3::MNT3ERR_ACCES => "Permission denied",
            mountstat3::MNT3ERR_NOTDIR => "Not a directory",
            mountstat3::MNT3ERR_INVAL => "Invalid argument",
            mountstat3::MNT3ERR_NAMETOOLONG => "File name too long",
            mountstat3::MNT3ERR_NOTSUPP => "Operation is not supported",
            mountstat3::MNT3ERR_SERVERFAULT => "Other server error",
        };
        write!(f, "({}) {}", *self as u32, reason)
    }
}

/// Successful response to a mount request
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default)]
pub struct mountres3_ok {
    /// File handle for the mounted directory
    pub fhandle: fhandle3, // really same thing as nfs::nfs_fh3
    /// List of authentication flavors supported by the server
    pub auth_flavors: Vec<u32>,
}
impl Deserialize for mountres3_ok {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.fhandle.deserialize(src)?;
        if self.fhandle.len() > FHSIZE3 as usize {
            return Err(utils::invalid_data("file handle longer than FHSIZE3"));
        }
        self.auth_flavors.deserialize(src)
    }
}
SerializeStruct!(mountres3_ok, fhandle, auth_flavors);

/// One exported directory and the client groups allowed to mount it
///
/// ```text
/// struct exportnode {
///     dirpath  ex_dir;
///     groups   ex_groups;
///     exports  ex_next;
/// };
/// ```
///
/// Both `groups` and `exports` are XDR linked lists; they are flattened here
/// into vectors by [`exports`].
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct exportnode {
    /// Exported directory path
    pub ex_dir: dirpath,
    /// Group names allowed to mount it; empty means everyone
    pub ex_groups: Vec<name>,
}

/// Reply body of `MOUNTPROC3_EXPORT`
#[allow(non_camel_case_types)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct exports(pub Vec<exportnode>);

impl Serialize for exports {
    fn serialize<R: Write>(&self, dest: &mut R) -> std::io::Result<()> {
        for node in &self.0 {
            true.serialize(dest)?;
            node.ex_dir.serialize(dest)?;
            for group in &node.ex_groups {
                true.serialize(dest)?;
                group.serialize(dest)?;
            }
            false.serialize(dest)?;
        }
        false.serialize(dest)
    }
}

impl Deserialize for exports {
    fn deserialize<R: Read>(&mut self, src: &mut R) -> std::io::Result<()> {
        self.0.clear();
        while deserialize::<bool>(src)? {
            let mut node =
                exportnode { ex_dir: deserialize::<dirpath>(src)?, ex_groups: Vec::new() };
            while deserialize::<bool>(src)? {
                node.ex_groups.push(deserialize::<name>(src)?);
            }
            self.0.push(node);
        }
        Ok(())
    }
}

/// Procedure numbers for the `MOUNT` version 3 protocol
#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, FromPrimitive, ToPrimitive)]
pub enum MountProgram {
    /// Null procedure for service availability testing
    MOUNTPROC3_NULL = 0,
    /// Mount a file system
    MOUNTPROC3_MNT = 1,
    /// Get list of mounted file systems
    MOUNTPROC3_DUMP = 2,
    /// Unmount a file system
    MOUNTPROC3_UMNT = 3,
    /// Unmount all file systems
    MOUNTPROC3_UMNTALL = 4,
    /// Get list of exported file systems
    MOUNTPROC3_EXPORT = 5,
    /// Invalid procedure number
    INVALID,
}
SerializeEnum!(MountProgram);
DeserializeEnum!(MountProgram);
