//! NFSv3/MOUNTv3 implementation of [`RemoteFs`].

use async_trait::async_trait;
use tracing::debug;

use crate::attr::{self, Attributes, SetAttributes};
use crate::config::ClientConfig;
use crate::error::{NfsError, Result};
use crate::handle::FileHandle;
use crate::protocol::nfs::{mount, v3};
use crate::remote::{
    DirEntry, DirPage, Export, FsStat, NodeKind, ReadReply, RemoteFs, Stability, WriteReply,
    COOKIEVERF_SIZE,
};
use crate::transport::{Connection, Service};
use crate::xdr::nfs3;

/// Client of one server's MOUNT and NFS services.
///
/// Each service has its own [`Connection`], opened on the first call that
/// needs it. Calls on one client never overlap: every method takes
/// `&mut self` and waits for its reply.
#[derive(Debug)]
pub struct Nfs3Client {
    config: ClientConfig,
    mount: Connection,
    nfs: Connection,
}

impl Nfs3Client {
    pub fn new(config: ClientConfig) -> Self {
        Nfs3Client {
            config,
            mount: Connection::new(Service::Mount),
            nfs: Connection::new(Service::Nfs),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_connected(&self, service: Service) -> bool {
        match service {
            Service::Mount => self.mount.is_connected(),
            Service::Nfs => self.nfs.is_connected(),
        }
    }

    /// Sends MOUNT NULL, opening the connection if needed.
    pub async fn ping_mount(&mut self) -> Result<()> {
        let channel = self.mount.connect(&self.config).await?;
        mount::mountproc3_null(channel).await
    }

    /// Sends NFS NULL, opening the connection if needed.
    pub async fn ping_nfs(&mut self) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        v3::nfsproc3_null(channel).await
    }
}

fn diropargs(dir: &FileHandle, name: &str) -> nfs3::diropargs3 {
    nfs3::diropargs3 { dir: dir.to_nfs(), name: name.into() }
}

fn to_stable_how(stability: Stability) -> nfs3::file::stable_how {
    match stability {
        Stability::Unstable => nfs3::file::stable_how::UNSTABLE,
        Stability::DataSync => nfs3::file::stable_how::DATA_SYNC,
        Stability::FileSync => nfs3::file::stable_how::FILE_SYNC,
    }
}

fn from_stable_how(stable: nfs3::file::stable_how) -> Stability {
    match stable {
        nfs3::file::stable_how::UNSTABLE => Stability::Unstable,
        nfs3::file::stable_how::DATA_SYNC => Stability::DataSync,
        nfs3::file::stable_how::FILE_SYNC => Stability::FileSync,
    }
}

/// Device numbers travel packed and are split again into `specdata3`.
fn device_data(major: u32, minor: u32, attrs: nfs3::sattr3) -> nfs3::dir::devicedata3 {
    let dev = attr::makedev(major, minor);
    nfs3::dir::devicedata3 {
        dev_attributes: attrs,
        spec: nfs3::specdata3 { specdata1: attr::major(dev), specdata2: attr::minor(dev) },
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[async_trait]
impl RemoteFs for Nfs3Client {
    async fn configure(&mut self, config: &ClientConfig) -> Result<()> {
        let host_changed =
            self.config.host != config.host || self.config.portmap_port != config.portmap_port;
        let credentials_changed = self.config.uid != config.uid
            || self.config.gid != config.gid
            || self.config.machine_name != config.machine_name;
        self.config = config.clone();
        if host_changed {
            debug!("host changed to {:?}, dropping connections", self.config.host);
            self.disconnect().await;
        } else if credentials_changed {
            self.mount.refresh_credentials(&self.config)?;
            self.nfs.refresh_credentials(&self.config)?;
        }
        Ok(())
    }

    async fn exports(&mut self) -> Result<Vec<Export>> {
        let channel = self.mount.connect(&self.config).await?;
        let exports = mount::mountproc3_export(channel).await?;
        Ok(exports
            .0
            .into_iter()
            .map(|node| Export {
                dir: lossy(&node.ex_dir),
                groups: node.ex_groups.iter().map(|group| lossy(group)).collect(),
            })
            .collect())
    }

    async fn mount(&mut self, path: &str) -> Result<FileHandle> {
        let channel = self.mount.connect(&self.config).await?;
        let response = mount::mountproc3_mnt(channel, path).await?;
        Ok(FileHandle::from_mount(&response.fhandle))
    }

    async fn umount(&mut self, path: &str) -> Result<()> {
        let channel = self.mount.connect(&self.config).await?;
        mount::mountproc3_umnt(channel, path).await
    }

    async fn lookup(
        &mut self,
        dir: &FileHandle,
        name: &str,
    ) -> Result<(FileHandle, Option<Attributes>)> {
        let channel = self.nfs.connect(&self.config).await?;
        let res = v3::nfsproc3_lookup(channel, &diropargs(dir, name)).await?;
        let attributes = Attributes::from_post_op(&res.obj_attributes);
        Ok((FileHandle::from(res.object), attributes))
    }

    async fn getattr(&mut self, fh: &FileHandle) -> Result<Attributes> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::GETATTR3args { object: fh.to_nfs() };
        let res = v3::nfsproc3_getattr(channel, &args).await?;
        Ok(Attributes::from(&res.obj_attributes))
    }

    async fn readlink(&mut self, fh: &FileHandle) -> Result<String> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::file::READLINK3args { symlink: fh.to_nfs() };
        let res = v3::nfsproc3_readlink(channel, &args).await?;
        Ok(lossy(res.data.as_ref()))
    }

    async fn readdir(
        &mut self,
        dir: &FileHandle,
        cookie: u64,
        cookieverf: [u8; COOKIEVERF_SIZE],
        count: u32,
    ) -> Result<DirPage> {
        let channel = self.nfs.connect(&self.config).await?;
        let args =
            nfs3::dir::READDIR3args { dir: dir.to_nfs(), cookie, cookieverf, dircount: count };
        let res = v3::nfsproc3_readdir(channel, &args).await?;
        let entries = res
            .reply
            .entries
            .into_iter()
            .map(|entry| DirEntry {
                name: lossy(entry.name.as_ref()),
                cookie: entry.cookie,
                fileid: entry.fileid,
            })
            .collect();
        Ok(DirPage { entries, eof: res.reply.eof, cookieverf: res.cookieverf })
    }

    async fn read(&mut self, fh: &FileHandle, offset: u64, count: u32) -> Result<ReadReply> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::file::READ3args { file: fh.to_nfs(), offset, count };
        let res = v3::nfsproc3_read(channel, &args).await?;
        let mut data = res.data;
        data.truncate(res.count as usize);
        Ok(ReadReply { data, eof: res.eof })
    }

    async fn write(
        &mut self,
        fh: &FileHandle,
        offset: u64,
        data: &[u8],
        stable: Stability,
    ) -> Result<WriteReply> {
        let count = u32::try_from(data.len())
            .map_err(|_| NfsError::usage(format!("{} bytes is too large a write", data.len())))?;
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::file::WRITE3args {
            file: fh.to_nfs(),
            offset,
            count,
            stable: to_stable_how(stable),
            data: data.to_vec(),
        };
        let res = v3::nfsproc3_write(channel, &args).await?;
        Ok(WriteReply { count: res.count, committed: from_stable_how(res.committed) })
    }

    async fn create(
        &mut self,
        dir: &FileHandle,
        name: &str,
        attrs: &SetAttributes,
    ) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::file::CREATE3args {
            dirops: diropargs(dir, name),
            how: nfs3::file::createhow3::GUARDED(attrs.into()),
        };
        v3::nfsproc3_create(channel, &args).await?;
        Ok(())
    }

    async fn mkdir(&mut self, dir: &FileHandle, name: &str, attrs: &SetAttributes) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        let args =
            nfs3::dir::MKDIR3args { dirops: diropargs(dir, name), attributes: attrs.into() };
        v3::nfsproc3_mkdir(channel, &args).await?;
        Ok(())
    }

    async fn symlink(
        &mut self,
        dir: &FileHandle,
        name: &str,
        target: &str,
        attrs: &SetAttributes,
    ) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::dir::SYMLINK3args {
            dirops: diropargs(dir, name),
            symlink: nfs3::symlinkdata3 {
                symlink_attributes: attrs.into(),
                symlink_data: target.into(),
            },
        };
        v3::nfsproc3_symlink(channel, &args).await?;
        Ok(())
    }

    async fn mknod(
        &mut self,
        dir: &FileHandle,
        name: &str,
        kind: NodeKind,
        attrs: &SetAttributes,
    ) -> Result<()> {
        let sattr: nfs3::sattr3 = attrs.into();
        let what = match kind {
            NodeKind::Socket => nfs3::dir::mknoddata3::NF3SOCK(sattr),
            NodeKind::Fifo => nfs3::dir::mknoddata3::NF3FIFO(sattr),
            NodeKind::BlockDevice { major, minor } => {
                nfs3::dir::mknoddata3::NF3BLK(device_data(major, minor, sattr))
            }
            NodeKind::CharDevice { major, minor } => {
                nfs3::dir::mknoddata3::NF3CHR(device_data(major, minor, sattr))
            }
        };
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::dir::MKNOD3args { where_dir: diropargs(dir, name), what };
        v3::nfsproc3_mknod(channel, &args).await?;
        Ok(())
    }

    async fn remove(&mut self, dir: &FileHandle, name: &str) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        v3::nfsproc3_remove(channel, &diropargs(dir, name)).await?;
        Ok(())
    }

    async fn rmdir(&mut self, dir: &FileHandle, name: &str) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        v3::nfsproc3_rmdir(channel, &diropargs(dir, name)).await?;
        Ok(())
    }

    async fn rename(
        &mut self,
        from_dir: &FileHandle,
        from_name: &str,
        to_dir: &FileHandle,
        to_name: &str,
    ) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::dir::RENAME3args {
            from: diropargs(from_dir, from_name),
            to: diropargs(to_dir, to_name),
        };
        v3::nfsproc3_rename(channel, &args).await?;
        Ok(())
    }

    async fn link(&mut self, file: &FileHandle, dir: &FileHandle, name: &str) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::file::LINK3args { file: file.to_nfs(), link: diropargs(dir, name) };
        v3::nfsproc3_link(channel, &args).await?;
        Ok(())
    }

    async fn setattr(&mut self, fh: &FileHandle, attrs: &SetAttributes) -> Result<()> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::SETATTR3args {
            object: fh.to_nfs(),
            new_attribute: attrs.into(),
            guard: nfs3::sattrguard3::Void,
        };
        v3::nfsproc3_setattr(channel, &args).await?;
        Ok(())
    }

    async fn fsstat(&mut self, fh: &FileHandle) -> Result<FsStat> {
        let channel = self.nfs.connect(&self.config).await?;
        let args = nfs3::fs::FSSTAT3args { fsroot: fh.to_nfs() };
        let res = v3::nfsproc3_fsstat(channel, &args).await?;
        Ok(FsStat {
            total_bytes: res.tbytes,
            free_bytes: res.fbytes,
            avail_bytes: res.abytes,
            total_files: res.tfiles,
            free_files: res.ffiles,
            avail_files: res.afiles,
            invarsec: res.invarsec,
        })
    }

    async fn disconnect(&mut self) {
        self.mount.disconnect().await;
        self.nfs.disconnect().await;
    }
}
