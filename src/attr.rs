//! Attribute Translator.
//!
//! [`Attributes`] is the decoded `fattr3` a resolution returns. [`SetAttributes`]
//! is what creating and SETATTR calls send: every field is independently
//! present or absent. An absent mode, uid, gid or size leaves the value alone,
//! an absent time asks the server to stamp its own clock.

use filetime::FileTime;

use crate::xdr::nfs3;

/// Type of a remote object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileType {
    Regular,
    Directory,
    BlockDevice,
    CharDevice,
    Symlink,
    Socket,
    Fifo,
}

impl FileType {
    /// Letter `ls -l` shows for this type.
    pub fn type_letter(&self) -> char {
        match self {
            FileType::Regular => '-',
            FileType::Directory => 'd',
            FileType::BlockDevice => 'b',
            FileType::CharDevice => 'c',
            FileType::Symlink => 'l',
            FileType::Socket => 's',
            FileType::Fifo => 'p',
        }
    }
}

impl From<nfs3::ftype3> for FileType {
    fn from(ftype: nfs3::ftype3) -> Self {
        match ftype {
            nfs3::ftype3::NF3REG => FileType::Regular,
            nfs3::ftype3::NF3DIR => FileType::Directory,
            nfs3::ftype3::NF3BLK => FileType::BlockDevice,
            nfs3::ftype3::NF3CHR => FileType::CharDevice,
            nfs3::ftype3::NF3LNK => FileType::Symlink,
            nfs3::ftype3::NF3SOCK => FileType::Socket,
            nfs3::ftype3::NF3FIFO => FileType::Fifo,
        }
    }
}

impl From<FileType> for nfs3::ftype3 {
    fn from(file_type: FileType) -> Self {
        match file_type {
            FileType::Regular => nfs3::ftype3::NF3REG,
            FileType::Directory => nfs3::ftype3::NF3DIR,
            FileType::BlockDevice => nfs3::ftype3::NF3BLK,
            FileType::CharDevice => nfs3::ftype3::NF3CHR,
            FileType::Symlink => nfs3::ftype3::NF3LNK,
            FileType::Socket => nfs3::ftype3::NF3SOCK,
            FileType::Fifo => nfs3::ftype3::NF3FIFO,
        }
    }
}

/// Metadata of a remote object as last reported by the server.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Attributes {
    pub file_type: FileType,
    /// Permission bits, including setuid, setgid and sticky.
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
    pub used: u64,
    /// Device numbers of a block or character device.
    pub rdev: (u32, u32),
    pub fsid: u64,
    pub fileid: u64,
    pub atime: FileTime,
    pub mtime: FileTime,
    pub ctime: FileTime,
}

impl Attributes {
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }

    pub fn is_regular(&self) -> bool {
        self.file_type == FileType::Regular
    }

    /// Attributes carried by an optional reply field, if the server sent them.
    pub fn from_post_op(attr: &nfs3::post_op_attr) -> Option<Attributes> {
        match attr {
            nfs3::post_op_attr::attributes(fattr) => Some(Attributes::from(fattr)),
            nfs3::post_op_attr::Void => None,
        }
    }
}

impl From<&nfs3::fattr3> for Attributes {
    fn from(fattr: &nfs3::fattr3) -> Self {
        Attributes {
            file_type: fattr.ftype.into(),
            mode: fattr.mode,
            nlink: fattr.nlink,
            uid: fattr.uid,
            gid: fattr.gid,
            size: fattr.size,
            used: fattr.used,
            rdev: (fattr.rdev.specdata1, fattr.rdev.specdata2),
            fsid: fattr.fsid,
            fileid: fattr.fileid,
            atime: fattr.atime.into(),
            mtime: fattr.mtime.into(),
            ctime: fattr.ctime.into(),
        }
    }
}

impl From<&Attributes> for nfs3::fattr3 {
    fn from(attr: &Attributes) -> Self {
        nfs3::fattr3 {
            ftype: attr.file_type.into(),
            mode: attr.mode,
            nlink: attr.nlink,
            uid: attr.uid,
            gid: attr.gid,
            size: attr.size,
            used: attr.used,
            rdev: nfs3::specdata3 { specdata1: attr.rdev.0, specdata2: attr.rdev.1 },
            fsid: attr.fsid,
            fileid: attr.fileid,
            atime: attr.atime.into(),
            mtime: attr.mtime.into(),
            ctime: attr.ctime.into(),
        }
    }
}

/// How a settable timestamp is treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SetTime {
    /// Leave the timestamp as it is.
    Keep,
    /// Stamp the server's current time.
    #[default]
    ServerTime,
    /// Set an explicit time.
    At(FileTime),
}

/// Attributes to apply on creation or SETATTR.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SetAttributes {
    pub mode: Option<u32>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub size: Option<u64>,
    pub atime: SetTime,
    pub mtime: SetTime,
}

impl SetAttributes {
    /// Attributes of a new object owned by `uid`/`gid`. Only permission bits of
    /// `mode` are kept.
    pub fn new_object(mode: u32, uid: u32, gid: u32) -> Self {
        SetAttributes {
            mode: Some(mode & 0o777),
            uid: Some(uid),
            gid: Some(gid),
            ..SetAttributes::default()
        }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_owner(mut self, uid: u32, gid: Option<u32>) -> Self {
        self.uid = Some(uid);
        self.gid = gid;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Leaves both timestamps untouched.
    pub fn keep_times(mut self) -> Self {
        self.atime = SetTime::Keep;
        self.mtime = SetTime::Keep;
        self
    }
}

impl From<&SetAttributes> for nfs3::sattr3 {
    fn from(attrs: &SetAttributes) -> Self {
        nfs3::sattr3 {
            mode: attrs.mode.map_or(nfs3::set_mode3::Void, nfs3::set_mode3::mode),
            uid: attrs.uid.map_or(nfs3::set_uid3::Void, nfs3::set_uid3::uid),
            gid: attrs.gid.map_or(nfs3::set_gid3::Void, nfs3::set_gid3::gid),
            size: attrs.size.map_or(nfs3::set_size3::Void, nfs3::set_size3::size),
            atime: match attrs.atime {
                SetTime::Keep => nfs3::set_atime::DONT_CHANGE,
                SetTime::ServerTime => nfs3::set_atime::SET_TO_SERVER_TIME,
                SetTime::At(time) => nfs3::set_atime::SET_TO_CLIENT_TIME(time.into()),
            },
            mtime: match attrs.mtime {
                SetTime::Keep => nfs3::set_mtime::DONT_CHANGE,
                SetTime::ServerTime => nfs3::set_mtime::SET_TO_SERVER_TIME,
                SetTime::At(time) => nfs3::set_mtime::SET_TO_CLIENT_TIME(time.into()),
            },
        }
    }
}

impl From<&nfs3::sattr3> for SetAttributes {
    fn from(sattr: &nfs3::sattr3) -> Self {
        SetAttributes {
            mode: match sattr.mode {
                nfs3::set_mode3::mode(mode) => Some(mode),
                nfs3::set_mode3::Void => None,
            },
            uid: match sattr.uid {
                nfs3::set_uid3::uid(uid) => Some(uid),
                nfs3::set_uid3::Void => None,
            },
            gid: match sattr.gid {
                nfs3::set_gid3::gid(gid) => Some(gid),
                nfs3::set_gid3::Void => None,
            },
            size: match sattr.size {
                nfs3::set_size3::size(size) => Some(size),
                nfs3::set_size3::Void => None,
            },
            atime: match sattr.atime {
                nfs3::set_atime::DONT_CHANGE => SetTime::Keep,
                nfs3::set_atime::SET_TO_SERVER_TIME => SetTime::ServerTime,
                nfs3::set_atime::SET_TO_CLIENT_TIME(time) => SetTime::At(time.into()),
            },
            mtime: match sattr.mtime {
                nfs3::set_mtime::DONT_CHANGE => SetTime::Keep,
                nfs3::set_mtime::SET_TO_SERVER_TIME => SetTime::ServerTime,
                nfs3::set_mtime::SET_TO_CLIENT_TIME(time) => SetTime::At(time.into()),
            },
        }
    }
}

/// Packs device numbers the way Linux `makedev` does.
pub fn makedev(major: u32, minor: u32) -> u64 {
    let (major, minor) = (major as u64, minor as u64);
    ((major & 0x0000_0fff) << 8)
        | ((major & 0xffff_f000) << 32)
        | (minor & 0x0000_00ff)
        | ((minor & 0xffff_ff00) << 12)
}

pub fn major(dev: u64) -> u32 {
    (((dev >> 8) & 0x0000_0fff) | ((dev >> 32) & 0xffff_f000)) as u32
}

pub fn minor(dev: u64) -> u32 {
    ((dev & 0x0000_00ff) | ((dev >> 12) & 0xffff_ff00)) as u32
}
