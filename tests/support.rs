#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{self, Cursor};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use filetime::FileTime;
use num_traits::FromPrimitive;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};

use nfs_shell::protocol::rpc::{read_record, write_fragment};
use nfs_shell::remote::COOKIEVERF_SIZE;
use nfs_shell::xdr::mount::{self, mountstat3};
use nfs_shell::xdr::nfs3::{self, nfsstat3};
use nfs_shell::xdr::{deserialize, portmap, rpc, Serialize};
use nfs_shell::{
    Attributes, ClientConfig, DirEntry, DirPage, Export, FileHandle, FileType, FsStat, NfsError,
    NodeKind, ReadReply, RemoteFs, Result, Session, SetAttributes, Stability, WriteReply,
};

pub const ROOT: u64 = 1;
pub const HANDLE_LEN: usize = 32;
pub const COOKIEVERF: [u8; COOKIEVERF_SIZE] = *b"mockverf";
pub const EXPORT: &str = "/srv/data";

/// Handle the mock hands out for object `id`: 24 filler bytes and the id.
pub fn handle_of(id: u64) -> FileHandle {
    let mut bytes = vec![0xfe; HANDLE_LEN - 8];
    bytes.extend_from_slice(&id.to_be_bytes());
    FileHandle::new(bytes)
}

fn id_of(fh: &FileHandle) -> Result<u64> {
    let bytes = fh.as_bytes();
    if bytes.len() != HANDLE_LEN {
        return Err(nfsstat3::NFS3ERR_BADHANDLE.into());
    }
    let mut id = [0; 8];
    id.copy_from_slice(&bytes[HANDLE_LEN - 8..]);
    Ok(u64::from_be_bytes(id))
}

#[derive(Clone, Debug)]
pub enum Content {
    File(Vec<u8>),
    Dir(Vec<(String, u64)>),
    Symlink(String),
    Special(NodeKind),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub parent: u64,
    pub content: Content,
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub nlink: u32,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub nodes: HashMap<u64, Node>,
    next_id: u64,
    pub exports: Vec<Export>,
    /// Entries per READDIR page.
    pub page_size: usize,
    /// Accept at most this many bytes per WRITE.
    pub short_write: Option<u32>,
    pub omit_lookup_attributes: bool,
    /// Answer READDIR with an empty page that is not final.
    pub stall_listing: bool,
    /// Send only the record mark of the next reply on the wire and go silent.
    pub stall_next_reply: bool,
    pub lookups: usize,
    pub getattrs: usize,
    pub readlinks: usize,
    pub readdirs: Vec<(u64, [u8; COOKIEVERF_SIZE], u32)>,
    pub reads: Vec<(u64, u32)>,
    pub writes: Vec<(u64, usize, Stability)>,
    pub setattrs: Vec<(u64, SetAttributes)>,
    pub created: Vec<(String, SetAttributes)>,
    pub mounts: Vec<String>,
    pub umounts: Vec<String>,
    pub configured: Vec<ClientConfig>,
    pub disconnects: usize,
}

impl MockState {
    pub fn calls(&self) -> usize {
        self.lookups + self.getattrs + self.readlinks + self.readdirs.len() + self.reads.len()
    }

    fn node(&self, id: u64) -> Result<&Node> {
        self.nodes.get(&id).ok_or_else(|| nfsstat3::NFS3ERR_STALE.into())
    }

    fn attributes(&self, id: u64) -> Result<Attributes> {
        let node = self.node(id)?;
        let (file_type, size, rdev) = match &node.content {
            Content::File(data) => (FileType::Regular, data.len() as u64, (0, 0)),
            Content::Dir(_) => (FileType::Directory, 4096, (0, 0)),
            Content::Symlink(target) => (FileType::Symlink, target.len() as u64, (0, 0)),
            Content::Special(NodeKind::Socket) => (FileType::Socket, 0, (0, 0)),
            Content::Special(NodeKind::Fifo) => (FileType::Fifo, 0, (0, 0)),
            Content::Special(NodeKind::BlockDevice { major, minor }) => {
                (FileType::BlockDevice, 0, (*major, *minor))
            }
            Content::Special(NodeKind::CharDevice { major, minor }) => {
                (FileType::CharDevice, 0, (*major, *minor))
            }
        };
        Ok(Attributes {
            file_type,
            mode: node.mode,
            nlink: node.nlink,
            uid: node.uid,
            gid: node.gid,
            size,
            used: size,
            rdev,
            fsid: 7,
            fileid: id,
            atime: FileTime::zero(),
            mtime: FileTime::zero(),
            ctime: FileTime::zero(),
        })
    }

    fn entries(&self, dir: u64) -> Result<&Vec<(String, u64)>> {
        match &self.node(dir)?.content {
            Content::Dir(entries) => Ok(entries),
            _ => Err(nfsstat3::NFS3ERR_NOTDIR.into()),
        }
    }

    fn entries_mut(&mut self, dir: u64) -> Result<&mut Vec<(String, u64)>> {
        match self.nodes.get_mut(&dir).map(|node| &mut node.content) {
            Some(Content::Dir(entries)) => Ok(entries),
            Some(_) => Err(nfsstat3::NFS3ERR_NOTDIR.into()),
            None => Err(nfsstat3::NFS3ERR_STALE.into()),
        }
    }

    fn child(&self, dir: u64, name: &str) -> Result<u64> {
        let entries = self.entries(dir)?;
        match name {
            "." => Ok(dir),
            ".." => Ok(self.node(dir)?.parent),
            _ => entries
                .iter()
                .find(|(entry, _)| entry == name)
                .map(|(_, id)| *id)
                .ok_or_else(|| nfsstat3::NFS3ERR_NOENT.into()),
        }
    }

    fn insert(&mut self, dir: u64, name: &str, content: Content, attrs: &SetAttributes) -> Result<u64> {
        if self.entries(dir)?.iter().any(|(entry, _)| entry == name) {
            return Err(nfsstat3::NFS3ERR_EXIST.into());
        }
        let id = self.next_id;
        self.next_id += 1;
        let node = Node {
            parent: dir,
            content,
            mode: attrs.mode.unwrap_or(0o644),
            uid: attrs.uid.unwrap_or(0),
            gid: attrs.gid.unwrap_or(0),
            nlink: 1,
        };
        self.nodes.insert(id, node);
        self.entries_mut(dir)?.push((name.to_string(), id));
        Ok(id)
    }

    fn unlink(&mut self, dir: u64, name: &str) -> Result<u64> {
        let id = self.child(dir, name)?;
        self.entries_mut(dir)?.retain(|(entry, _)| entry != name);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.nlink -= 1;
            if node.nlink == 0 {
                self.nodes.remove(&id);
            }
        }
        Ok(id)
    }
}

/// In-memory [`RemoteFs`] shared between a test and the session under test.
#[derive(Clone, Debug)]
pub struct MockFs(Arc<Mutex<MockState>>);

impl Default for MockFs {
    fn default() -> Self {
        MockFs::new()
    }
}

impl MockFs {
    /// An empty export root, listed whole in one page.
    pub fn new() -> Self {
        let mut state = MockState {
            next_id: ROOT + 1,
            page_size: usize::MAX,
            exports: vec![Export { dir: EXPORT.to_string(), groups: vec!["admins".to_string()] }],
            ..MockState::default()
        };
        let root =
            Node { parent: ROOT, content: Content::Dir(Vec::new()), mode: 0o755, uid: 0, gid: 0, nlink: 2 };
        state.nodes.insert(ROOT, root);
        MockFs(Arc::new(Mutex::new(state)))
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        self.0.lock().expect("mock state poisoned")
    }

    fn add(&self, parent: u64, name: &str, content: Content) -> u64 {
        let attrs = SetAttributes::new_object(0o644, 0, 0);
        self.state().insert(parent, name, content, &attrs).expect("add mock node")
    }

    pub fn add_dir(&self, parent: u64, name: &str) -> u64 {
        let id = self.add(parent, name, Content::Dir(Vec::new()));
        self.state().nodes.get_mut(&id).expect("new dir").mode = 0o755;
        id
    }

    pub fn add_file(&self, parent: u64, name: &str, data: &[u8]) -> u64 {
        self.add(parent, name, Content::File(data.to_vec()))
    }

    pub fn add_symlink(&self, parent: u64, name: &str, target: &str) -> u64 {
        self.add(parent, name, Content::Symlink(target.to_string()))
    }

    /// Walks `path` from the root by name, without following links.
    pub fn find(&self, path: &str) -> Option<u64> {
        let state = self.state();
        path.split('/')
            .filter(|name| !name.is_empty())
            .try_fold(ROOT, |dir, name| state.child(dir, name).ok())
    }

    pub fn node(&self, id: u64) -> Option<Node> {
        self.state().nodes.get(&id).cloned()
    }

    pub fn contents(&self, id: u64) -> Option<Vec<u8>> {
        match self.node(id)?.content {
            Content::File(data) => Some(data),
            _ => None,
        }
    }

    pub fn lookups(&self) -> usize {
        self.state().lookups
    }
}

#[async_trait]
impl RemoteFs for MockFs {
    async fn configure(&mut self, config: &ClientConfig) -> Result<()> {
        self.state().configured.push(config.clone());
        Ok(())
    }

    async fn exports(&mut self) -> Result<Vec<Export>> {
        Ok(self.state().exports.clone())
    }

    async fn mount(&mut self, path: &str) -> Result<FileHandle> {
        let mut state = self.state();
        state.mounts.push(path.to_string());
        if state.exports.iter().any(|export| export.dir == path) {
            Ok(handle_of(ROOT))
        } else {
            Err(NfsError::Mount { status: mountstat3::MNT3ERR_NOENT })
        }
    }

    async fn umount(&mut self, path: &str) -> Result<()> {
        self.state().umounts.push(path.to_string());
        Ok(())
    }

    async fn lookup(
        &mut self,
        dir: &FileHandle,
        name: &str,
    ) -> Result<(FileHandle, Option<Attributes>)> {
        let mut state = self.state();
        state.lookups += 1;
        let id = state.child(id_of(dir)?, name)?;
        let attributes =
            if state.omit_lookup_attributes { None } else { Some(state.attributes(id)?) };
        Ok((handle_of(id), attributes))
    }

    async fn getattr(&mut self, fh: &FileHandle) -> Result<Attributes> {
        let mut state = self.state();
        state.getattrs += 1;
        state.attributes(id_of(fh)?)
    }

    async fn readlink(&mut self, fh: &FileHandle) -> Result<String> {
        let mut state = self.state();
        state.readlinks += 1;
        match &state.node(id_of(fh)?)?.content {
            Content::Symlink(target) => Ok(target.clone()),
            _ => Err(nfsstat3::NFS3ERR_INVAL.into()),
        }
    }

    async fn readdir(
        &mut self,
        dir: &FileHandle,
        cookie: u64,
        cookieverf: [u8; COOKIEVERF_SIZE],
        count: u32,
    ) -> Result<DirPage> {
        let mut state = self.state();
        state.readdirs.push((cookie, cookieverf, count));
        if cookie != 0 && cookieverf != COOKIEVERF {
            return Err(nfsstat3::NFS3ERR_BAD_COOKIE.into());
        }
        if state.stall_listing {
            return Ok(DirPage { entries: Vec::new(), eof: false, cookieverf: COOKIEVERF });
        }
        let entries = state.entries(id_of(dir)?)?;
        let start = cookie as usize;
        if start > entries.len() {
            return Err(nfsstat3::NFS3ERR_BAD_COOKIE.into());
        }
        let end = start.saturating_add(state.page_size).min(entries.len());
        let page = entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, (name, id))| DirEntry {
                name: name.clone(),
                cookie: (start + i + 1) as u64,
                fileid: *id,
            })
            .collect();
        Ok(DirPage { entries: page, eof: end == entries.len(), cookieverf: COOKIEVERF })
    }

    async fn read(&mut self, fh: &FileHandle, offset: u64, count: u32) -> Result<ReadReply> {
        let mut state = self.state();
        state.reads.push((offset, count));
        match &state.node(id_of(fh)?)?.content {
            Content::File(data) => {
                let start = (offset as usize).min(data.len());
                let end = start.saturating_add(count as usize).min(data.len());
                Ok(ReadReply { data: data[start..end].to_vec(), eof: end == data.len() })
            }
            Content::Dir(_) => Err(nfsstat3::NFS3ERR_ISDIR.into()),
            _ => Err(nfsstat3::NFS3ERR_INVAL.into()),
        }
    }

    async fn write(
        &mut self,
        fh: &FileHandle,
        offset: u64,
        data: &[u8],
        stable: Stability,
    ) -> Result<WriteReply> {
        let mut state = self.state();
        let id = id_of(fh)?;
        state.writes.push((offset, data.len(), stable));
        let accepted = state.short_write.map_or(data.len(), |limit| data.len().min(limit as usize));
        match state.nodes.get_mut(&id).map(|node| &mut node.content) {
            Some(Content::File(contents)) => {
                let offset = offset as usize;
                if contents.len() < offset + accepted {
                    contents.resize(offset + accepted, 0);
                }
                contents[offset..offset + accepted].copy_from_slice(&data[..accepted]);
                Ok(WriteReply { count: accepted as u32, committed: stable })
            }
            Some(Content::Dir(_)) => Err(nfsstat3::NFS3ERR_ISDIR.into()),
            Some(_) => Err(nfsstat3::NFS3ERR_INVAL.into()),
            None => Err(nfsstat3::NFS3ERR_STALE.into()),
        }
    }

    async fn create(&mut self, dir: &FileHandle, name: &str, attrs: &SetAttributes) -> Result<()> {
        let mut state = self.state();
        state.created.push((name.to_string(), *attrs));
        state.insert(id_of(dir)?, name, Content::File(Vec::new()), attrs)?;
        Ok(())
    }

    async fn mkdir(&mut self, dir: &FileHandle, name: &str, attrs: &SetAttributes) -> Result<()> {
        let mut state = self.state();
        state.created.push((name.to_string(), *attrs));
        state.insert(id_of(dir)?, name, Content::Dir(Vec::new()), attrs)?;
        Ok(())
    }

    async fn symlink(
        &mut self,
        dir: &FileHandle,
        name: &str,
        target: &str,
        attrs: &SetAttributes,
    ) -> Result<()> {
        let mut state = self.state();
        state.created.push((name.to_string(), *attrs));
        state.insert(id_of(dir)?, name, Content::Symlink(target.to_string()), attrs)?;
        Ok(())
    }

    async fn mknod(
        &mut self,
        dir: &FileHandle,
        name: &str,
        kind: NodeKind,
        attrs: &SetAttributes,
    ) -> Result<()> {
        let mut state = self.state();
        state.created.push((name.to_string(), *attrs));
        state.insert(id_of(dir)?, name, Content::Special(kind), attrs)?;
        Ok(())
    }

    async fn remove(&mut self, dir: &FileHandle, name: &str) -> Result<()> {
        let mut state = self.state();
        let dir = id_of(dir)?;
        let id = state.child(dir, name)?;
        if let Content::Dir(_) = state.node(id)?.content {
            return Err(nfsstat3::NFS3ERR_ISDIR.into());
        }
        state.unlink(dir, name)?;
        Ok(())
    }

    async fn rmdir(&mut self, dir: &FileHandle, name: &str) -> Result<()> {
        let mut state = self.state();
        let dir = id_of(dir)?;
        let id = state.child(dir, name)?;
        match &state.node(id)?.content {
            Content::Dir(entries) if entries.is_empty() => {}
            Content::Dir(_) => return Err(nfsstat3::NFS3ERR_NOTEMPTY.into()),
            _ => return Err(nfsstat3::NFS3ERR_NOTDIR.into()),
        }
        state.unlink(dir, name)?;
        Ok(())
    }

    async fn rename(
        &mut self,
        from_dir: &FileHandle,
        from_name: &str,
        to_dir: &FileHandle,
        to_name: &str,
    ) -> Result<()> {
        let mut state = self.state();
        let (from_dir, to_dir) = (id_of(from_dir)?, id_of(to_dir)?);
        let id = state.child(from_dir, from_name)?;
        state.entries(to_dir)?;
        state.entries_mut(from_dir)?.retain(|(entry, _)| entry != from_name);
        let entries = state.entries_mut(to_dir)?;
        entries.retain(|(entry, _)| entry != to_name);
        entries.push((to_name.to_string(), id));
        if let Some(node) = state.nodes.get_mut(&id) {
            node.parent = to_dir;
        }
        Ok(())
    }

    async fn link(&mut self, file: &FileHandle, dir: &FileHandle, name: &str) -> Result<()> {
        let mut state = self.state();
        let (id, dir) = (id_of(file)?, id_of(dir)?);
        state.node(id)?;
        if state.entries(dir)?.iter().any(|(entry, _)| entry == name) {
            return Err(nfsstat3::NFS3ERR_EXIST.into());
        }
        state.entries_mut(dir)?.push((name.to_string(), id));
        if let Some(node) = state.nodes.get_mut(&id) {
            node.nlink += 1;
        }
        Ok(())
    }

    async fn setattr(&mut self, fh: &FileHandle, attrs: &SetAttributes) -> Result<()> {
        let mut state = self.state();
        let id = id_of(fh)?;
        state.setattrs.push((id, *attrs));
        let node = state.nodes.get_mut(&id).ok_or(NfsError::from(nfsstat3::NFS3ERR_STALE))?;
        if let Some(mode) = attrs.mode {
            node.mode = mode;
        }
        if let Some(uid) = attrs.uid {
            node.uid = uid;
        }
        if let Some(gid) = attrs.gid {
            node.gid = gid;
        }
        if let (Some(size), Content::File(data)) = (attrs.size, &mut node.content) {
            data.resize(size as usize, 0);
        }
        Ok(())
    }

    async fn fsstat(&mut self, fh: &FileHandle) -> Result<FsStat> {
        self.state().node(id_of(fh)?)?;
        Ok(FsStat {
            total_bytes: 1 << 30,
            free_bytes: 1 << 29,
            avail_bytes: 1 << 28,
            total_files: 1000,
            free_files: 900,
            avail_files: 800,
            invarsec: 0,
        })
    }

    async fn disconnect(&mut self) {
        self.state().disconnects += 1;
    }
}

/// Session over `fs` with the export mounted.
pub async fn mounted(fs: &MockFs) -> Session<MockFs> {
    let mut session = Session::with_remote(ClientConfig::default(), fs.clone());
    session.mount(EXPORT).await.expect("mount export");
    session
}

/// Same, with the parameters in `config`.
pub async fn mounted_with(fs: &MockFs, config: ClientConfig) -> Session<MockFs> {
    let mut session = Session::with_remote(config, fs.clone());
    session.mount(EXPORT).await.expect("mount export");
    session
}

/// One call the mock server received.
#[derive(Clone, Debug)]
pub struct Call {
    pub prog: u32,
    pub proc: u32,
    pub cred: Option<rpc::auth_unix>,
}

/// TCP server speaking record-marked ONC-RPC on one port for PORTMAP, MOUNT
/// and NFS, backed by a [`MockFs`].
pub struct MockServer {
    pub addr: SocketAddr,
    pub fs: MockFs,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockServer {
    pub async fn start(fs: MockFs) -> MockServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        let calls = Arc::new(Mutex::new(Vec::new()));

        let (server_fs, server_calls) = (fs.clone(), calls.clone());
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, server_fs.clone(), server_calls.clone(), addr.port()));
            }
        });
        MockServer { addr, fs, calls }
    }

    /// Client parameters pointing at this server.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_host("127.0.0.1")
            .with_portmap_port(self.addr.port())
            .with_privileged_port(false)
            .with_timeout(Duration::from_secs(5))
            .with_machine_name("mockclient")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls poisoned").clone()
    }

    pub fn calls_to(&self, prog: u32) -> Vec<Call> {
        self.calls().into_iter().filter(|call| call.prog == prog).collect()
    }
}

async fn serve(mut stream: TcpStream, mut fs: MockFs, calls: Arc<Mutex<Vec<Call>>>, port: u16) {
    loop {
        let record = match read_record(&mut stream).await {
            Ok(record) => record,
            Err(_) => return,
        };
        let reply = match dispatch(record, &mut fs, &calls, port).await {
            Ok(reply) => reply,
            Err(_) => return,
        };
        let stall = std::mem::take(&mut fs.state().stall_next_reply);
        if stall {
            let mark = (1_u32 << 31) | reply.len() as u32;
            if stream.write_all(&mark.to_be_bytes()).await.is_err() {
                return;
            }
            continue;
        }
        if write_fragment(&mut stream, &reply).await.is_err() {
            return;
        }
    }
}

fn reply_header(xid: u32, reply_data: rpc::accept_body) -> rpc::rpc_msg {
    let accepted = rpc::accepted_reply { verf: rpc::opaque_auth::default(), reply_data };
    rpc::rpc_msg { xid, body: rpc::rpc_body::REPLY(rpc::reply_body::MSG_ACCEPTED(accepted)) }
}

async fn dispatch(
    record: Vec<u8>,
    fs: &mut MockFs,
    calls: &Mutex<Vec<Call>>,
    port: u16,
) -> io::Result<Vec<u8>> {
    let mut src = Cursor::new(record);
    let msg = deserialize::<rpc::rpc_msg>(&mut src)?;
    let call = match msg.body {
        rpc::rpc_body::CALL(call) => call,
        rpc::rpc_body::REPLY(_) => {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "reply sent to server"))
        }
    };
    let cred = if call.cred.flavor == rpc::auth_flavor::AUTH_UNIX {
        Some(deserialize::<rpc::auth_unix>(&mut Cursor::new(call.cred.body.clone()))?)
    } else {
        None
    };
    calls.lock().expect("calls poisoned").push(Call { prog: call.prog, proc: call.proc, cred });

    let body = match call.prog {
        portmap::PROGRAM => portmap_call(call.proc, &mut src, port)?,
        mount::PROGRAM => mount_call(call.proc, &mut src, fs).await?,
        nfs3::PROGRAM => nfs_call(call.proc, &mut src, fs).await?,
        _ => {
            let mut out = Vec::new();
            reply_header(msg.xid, rpc::accept_body::PROG_UNAVAIL).serialize(&mut out)?;
            return Ok(out);
        }
    };
    let mut out = Vec::new();
    match body {
        Some(body) => {
            reply_header(msg.xid, rpc::accept_body::SUCCESS).serialize(&mut out)?;
            out.extend_from_slice(&body);
        }
        None => reply_header(msg.xid, rpc::accept_body::PROC_UNAVAIL).serialize(&mut out)?,
    }
    Ok(out)
}

fn portmap_call(proc: u32, src: &mut Cursor<Vec<u8>>, port: u16) -> io::Result<Option<Vec<u8>>> {
    let mut out = Vec::new();
    match portmap::PortmapProgram::from_u32(proc) {
        Some(portmap::PortmapProgram::PMAPPROC_NULL) => {}
        Some(portmap::PortmapProgram::PMAPPROC_GETPORT) => {
            let mapping = deserialize::<portmap::mapping>(src)?;
            let known = matches!(mapping.prog, mount::PROGRAM | nfs3::PROGRAM)
                && mapping.vers == 3
                && mapping.prot == portmap::IPPROTO_TCP;
            let port = if known { port as u32 } else { portmap::PORT_UNREGISTERED };
            port.serialize(&mut out)?;
        }
        _ => return Ok(None),
    }
    Ok(Some(out))
}

fn mount_status(e: &NfsError) -> mountstat3 {
    match e {
        NfsError::Mount { status } => *status,
        _ => mountstat3::MNT3ERR_SERVERFAULT,
    }
}

async fn mount_call(
    proc: u32,
    src: &mut Cursor<Vec<u8>>,
    fs: &mut MockFs,
) -> io::Result<Option<Vec<u8>>> {
    let mut out = Vec::new();
    match mount::MountProgram::from_u32(proc) {
        Some(mount::MountProgram::MOUNTPROC3_NULL) => {}
        Some(mount::MountProgram::MOUNTPROC3_MNT) => {
            let path = deserialize::<mount::dirpath>(src)?;
            match fs.mount(&String::from_utf8_lossy(&path)).await {
                Ok(root) => {
                    mountstat3::MNT3_OK.serialize(&mut out)?;
                    let res = mount::mountres3_ok {
                        fhandle: root.as_bytes().to_vec(),
                        auth_flavors: vec![rpc::auth_flavor::AUTH_UNIX as u32],
                    };
                    res.serialize(&mut out)?;
                }
                Err(e) => mount_status(&e).serialize(&mut out)?,
            }
        }
        Some(mount::MountProgram::MOUNTPROC3_UMNT) => {
            let path = deserialize::<mount::dirpath>(src)?;
            let _ = fs.umount(&String::from_utf8_lossy(&path)).await;
        }
        Some(mount::MountProgram::MOUNTPROC3_EXPORT) => {
            let exports = fs.exports().await.unwrap_or_default();
            let nodes = exports
                .into_iter()
                .map(|export| mount::exportnode {
                    ex_dir: export.dir.into_bytes(),
                    ex_groups: export.groups.into_iter().map(String::into_bytes).collect(),
                })
                .collect();
            mount::exports(nodes).serialize(&mut out)?;
        }
        _ => return Ok(None),
    }
    Ok(Some(out))
}

/// Status first, the result body only on success.
fn nfs_reply<T: Serialize>(out: &mut Vec<u8>, result: Result<T>) -> io::Result<()> {
    match result {
        Ok(resok) => {
            nfsstat3::NFS3_OK.serialize(out)?;
            resok.serialize(out)
        }
        Err(e) => e.status().unwrap_or(nfsstat3::NFS3ERR_SERVERFAULT).serialize(out),
    }
}

fn name_of(name: &nfs3::filename3) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

fn post_op(attributes: Option<Attributes>) -> nfs3::post_op_attr {
    attributes.map_or(nfs3::post_op_attr::Void, |attr| nfs3::post_op_attr::attributes((&attr).into()))
}

fn stability(stable: nfs3::file::stable_how) -> Stability {
    match stable {
        nfs3::file::stable_how::UNSTABLE => Stability::Unstable,
        nfs3::file::stable_how::DATA_SYNC => Stability::DataSync,
        nfs3::file::stable_how::FILE_SYNC => Stability::FileSync,
    }
}

fn stable_how(stability: Stability) -> nfs3::file::stable_how {
    match stability {
        Stability::Unstable => nfs3::file::stable_how::UNSTABLE,
        Stability::DataSync => nfs3::file::stable_how::DATA_SYNC,
        Stability::FileSync => nfs3::file::stable_how::FILE_SYNC,
    }
}

async fn nfs_call(
    proc: u32,
    src: &mut Cursor<Vec<u8>>,
    fs: &mut MockFs,
) -> io::Result<Option<Vec<u8>>> {
    use nfs3::NFSProgram::*;

    let mut out = Vec::new();
    let Some(proc) = nfs3::NFSProgram::from_u32(proc) else {
        return Ok(None);
    };
    match proc {
        NFSPROC3_NULL => {}
        NFSPROC3_GETATTR => {
            let args = deserialize::<nfs3::GETATTR3args>(src)?;
            let res = fs.getattr(&FileHandle::from(args.object)).await;
            let res = res.map(|attr| nfs3::GETATTR3resok { obj_attributes: (&attr).into() });
            nfs_reply(&mut out, res)?;
        }
        NFSPROC3_SETATTR => {
            let args = deserialize::<nfs3::SETATTR3args>(src)?;
            let attrs = SetAttributes::from(&args.new_attribute);
            let res = fs.setattr(&FileHandle::from(args.object), &attrs).await;
            nfs_reply(&mut out, res.map(|()| nfs3::SETATTR3resok::default()))?;
        }
        NFSPROC3_LOOKUP => {
            let args = deserialize::<nfs3::LOOKUP3args>(src)?;
            let dir = FileHandle::from(args.dir);
            let res = fs.lookup(&dir, &name_of(&args.name)).await;
            let res = res.map(|(fh, attributes)| nfs3::LOOKUP3resok {
                object: fh.to_nfs(),
                obj_attributes: post_op(attributes),
                dir_attributes: nfs3::post_op_attr::Void,
            });
            nfs_reply(&mut out, res)?;
        }
        NFSPROC3_READLINK => {
            let args = deserialize::<nfs3::file::READLINK3args>(src)?;
            let res = fs.readlink(&FileHandle::from(args.symlink)).await;
            let res = res.map(|target| nfs3::file::READLINK3resok {
                symlink_attributes: nfs3::post_op_attr::Void,
                data: target.as_str().into(),
            });
            nfs_reply(&mut out, res)?;
        }
        NFSPROC3_READ => {
            let args = deserialize::<nfs3::file::READ3args>(src)?;
            let res = fs.read(&FileHandle::from(args.file), args.offset, args.count).await;
            let res = res.map(|reply| nfs3::file::READ3resok {
                file_attributes: nfs3::post_op_attr::Void,
                count: reply.data.len() as u32,
                eof: reply.eof,
                data: reply.data,
            });
            nfs_reply(&mut out, res)?;
        }
        NFSPROC3_WRITE => {
            let args = deserialize::<nfs3::file::WRITE3args>(src)?;
            let fh = FileHandle::from(args.file);
            let res = fs.write(&fh, args.offset, &args.data, stability(args.stable)).await;
            let res = res.map(|reply| nfs3::file::WRITE3resok {
                file_wcc: nfs3::wcc_data::default(),
                count: reply.count,
                committed: stable_how(reply.committed),
                verf: [0; nfs3::NFS3_WRITEVERFSIZE as usize],
            });
            nfs_reply(&mut out, res)?;
        }
        NFSPROC3_CREATE => {
            let args = deserialize::<nfs3::file::CREATE3args>(src)?;
            let attrs = match &args.how {
                nfs3::file::createhow3::UNCHECKED(sattr)
                | nfs3::file::createhow3::GUARDED(sattr) => SetAttributes::from(sattr),
                nfs3::file::createhow3::EXCLUSIVE(_) => SetAttributes::default(),
            };
            let dir = FileHandle::from(args.dirops.dir);
            let res = fs.create(&dir, &name_of(&args.dirops.name), &attrs).await;
            nfs_reply(&mut out, res.map(|()| nfs3::dir::diropres3ok::default()))?;
        }
        NFSPROC3_MKDIR => {
            let args = deserialize::<nfs3::dir::MKDIR3args>(src)?;
            let attrs = SetAttributes::from(&args.attributes);
            let dir = FileHandle::from(args.dirops.dir);
            let res = fs.mkdir(&dir, &name_of(&args.dirops.name), &attrs).await;
            nfs_reply(&mut out, res.map(|()| nfs3::dir::diropres3ok::default()))?;
        }
        NFSPROC3_SYMLINK => {
            let args = deserialize::<nfs3::dir::SYMLINK3args>(src)?;
            let attrs = SetAttributes::from(&args.symlink.symlink_attributes);
            let target = name_of(&args.symlink.symlink_data);
            let dir = FileHandle::from(args.dirops.dir);
            let res = fs.symlink(&dir, &name_of(&args.dirops.name), &target, &attrs).await;
            nfs_reply(&mut out, res.map(|()| nfs3::dir::diropres3ok::default()))?;
        }
        NFSPROC3_MKNOD => {
            let args = deserialize::<nfs3::dir::MKNOD3args>(src)?;
            let (kind, sattr) = match args.what {
                nfs3::dir::mknoddata3::NF3CHR(device) => (
                    Some(NodeKind::CharDevice {
                        major: device.spec.specdata1,
                        minor: device.spec.specdata2,
                    }),
                    device.dev_attributes,
                ),
                nfs3::dir::mknoddata3::NF3BLK(device) => (
                    Some(NodeKind::BlockDevice {
                        major: device.spec.specdata1,
                        minor: device.spec.specdata2,
                    }),
                    device.dev_attributes,
                ),
                nfs3::dir::mknoddata3::NF3SOCK(sattr) => (Some(NodeKind::Socket), sattr),
                nfs3::dir::mknoddata3::NF3FIFO(sattr) => (Some(NodeKind::Fifo), sattr),
                nfs3::dir::mknoddata3::Other(_) => (None, nfs3::sattr3::default()),
            };
            let res = match kind {
                Some(kind) => {
                    let dir = FileHandle::from(args.where_dir.dir);
                    let name = name_of(&args.where_dir.name);
                    fs.mknod(&dir, &name, kind, &SetAttributes::from(&sattr)).await
                }
                None => Err(nfsstat3::NFS3ERR_BADTYPE.into()),
            };
            nfs_reply(&mut out, res.map(|()| nfs3::dir::diropres3ok::default()))?;
        }
        NFSPROC3_REMOVE => {
            let args = deserialize::<nfs3::file::REMOVE3args>(src)?;
            let res = fs.remove(&FileHandle::from(args.dir), &name_of(&args.name)).await;
            nfs_reply(&mut out, res.map(|()| nfs3::file::REMOVE3resok::default()))?;
        }
        NFSPROC3_RMDIR => {
            let args = deserialize::<nfs3::dir::RMDIR3args>(src)?;
            let res = fs.rmdir(&FileHandle::from(args.dir), &name_of(&args.name)).await;
            nfs_reply(&mut out, res.map(|()| nfs3::dir::RMDIR3resok::default()))?;
        }
        NFSPROC3_RENAME => {
            let args = deserialize::<nfs3::dir::RENAME3args>(src)?;
            let (from_name, to_name) = (name_of(&args.from.name), name_of(&args.to.name));
            let (from_dir, to_dir) = (FileHandle::from(args.from.dir), FileHandle::from(args.to.dir));
            let res = fs.rename(&from_dir, &from_name, &to_dir, &to_name).await;
            nfs_reply(&mut out, res.map(|()| nfs3::dir::RENAME3resok::default()))?;
        }
        NFSPROC3_LINK => {
            let args = deserialize::<nfs3::file::LINK3args>(src)?;
            let name = name_of(&args.link.name);
            let (file, dir) = (FileHandle::from(args.file), FileHandle::from(args.link.dir));
            let res = fs.link(&file, &dir, &name).await;
            nfs_reply(&mut out, res.map(|()| nfs3::file::LINK3resok::default()))?;
        }
        NFSPROC3_READDIR => {
            let args = deserialize::<nfs3::dir::READDIR3args>(src)?;
            let dir = FileHandle::from(args.dir);
            let res = fs.readdir(&dir, args.cookie, args.cookieverf, args.dircount).await;
            let res = res.map(|page| nfs3::dir::READDIR3resok {
                dir_attributes: nfs3::post_op_attr::Void,
                cookieverf: page.cookieverf,
                reply: nfs3::dir::dirlist3 {
                    entries: page
                        .entries
                        .into_iter()
                        .map(|entry| nfs3::dir::entry3 {
                            fileid: entry.fileid,
                            name: entry.name.as_str().into(),
                            cookie: entry.cookie,
                        })
                        .collect(),
                    eof: page.eof,
                },
            });
            nfs_reply(&mut out, res)?;
        }
        NFSPROC3_FSSTAT => {
            let args = deserialize::<nfs3::fs::FSSTAT3args>(src)?;
            let res = fs.fsstat(&FileHandle::from(args.fsroot)).await;
            let res = res.map(|stat| nfs3::fs::FSSTAT3resok {
                obj_attributes: nfs3::post_op_attr::Void,
                tbytes: stat.total_bytes,
                fbytes: stat.free_bytes,
                abytes: stat.avail_bytes,
                tfiles: stat.total_files,
                ffiles: stat.free_files,
                afiles: stat.avail_files,
                invarsec: stat.invarsec,
            });
            nfs_reply(&mut out, res)?;
        }
        _ => return Ok(None),
    }
    Ok(Some(out))
}
