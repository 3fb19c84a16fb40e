//! Path Resolution Engine.
//!
//! A path is turned into a queue of pending components and walked one LOOKUP
//! at a time from the current working handle. A leading `/` re-anchors the
//! walk at the mount root. When a symbolic link has to be followed, the
//! components of its target are pushed onto the front of the queue and the
//! walk continues from the directory that holds the link.
//!
//! One hop counter covers every LOOKUP of a resolution, whether its name came
//! from the path or from a link target, and it is never reset. After
//! [`MAX_PATH_DEPTH`] lookups the resolution fails with
//! [`NfsError::LoopOrTooDeep`], which bounds cyclic link chains.
//!
//! Resolution works on copies of the session handles; nothing it finds is
//! stored in the session.

use std::collections::VecDeque;

use tracing::debug;

use crate::attr::Attributes;
use crate::error::{NfsError, Result};
use crate::handle::FileHandle;
use crate::remote::RemoteFs;
use crate::session::Session;

/// Most LOOKUP calls one resolution may issue.
pub const MAX_PATH_DEPTH: usize = 2000;

/// Final object of a resolution.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved {
    pub handle: FileHandle,
    pub attributes: Attributes,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Component {
    /// Start over at the mount root.
    Root,
    Name(String),
}

/// `"/"` and `""` select the starting directory itself, looked up as `"."`.
fn components(path: &str) -> VecDeque<Component> {
    let mut queue = VecDeque::new();
    if path.starts_with('/') {
        queue.push_back(Component::Root);
    }
    queue.extend(
        path.split('/').filter(|name| !name.is_empty()).map(|name| Component::Name(name.into())),
    );
    if !queue.iter().any(|component| matches!(component, Component::Name(_))) {
        queue.push_back(Component::Name(".".into()));
    }
    queue
}

impl<R: RemoteFs> Session<R> {
    /// Resolves `path` to a handle and its attributes.
    ///
    /// Symbolic links met before the last component are always followed. A
    /// link in last position is followed only with `follow`, otherwise the
    /// link itself is returned.
    pub async fn resolve(&mut self, path: &str, follow: bool) -> Result<Resolved> {
        let mut current = self.handle()?.clone();
        let root = self.mount.as_ref().map(|mount| mount.root.clone());
        let mut attributes = None;
        let mut pending = components(path);
        let mut hops = 0;

        while let Some(component) = pending.pop_front() {
            let name = match component {
                Component::Root => {
                    if let Some(root) = &root {
                        current.copy_from(root);
                        attributes = None;
                    }
                    continue;
                }
                Component::Name(name) => name,
            };
            if hops == MAX_PATH_DEPTH {
                return Err(NfsError::LoopOrTooDeep(path.to_string()));
            }
            hops += 1;

            let (handle, attrs) = self.remote.lookup(&current, &name).await?;
            let attrs = match attrs {
                Some(attrs) => attrs,
                None => self.remote.getattr(&handle).await?,
            };
            debug!(
                "resolve {:?} hop {}: {:?} -> {} {:?}",
                path, hops, name, handle, attrs.file_type
            );

            if attrs.is_symlink() && (follow || !pending.is_empty()) {
                let target = self.remote.readlink(&handle).await?;
                debug!("resolve {:?}: {:?} links to {:?}", path, name, target);
                for component in components(&target).into_iter().rev() {
                    pending.push_front(component);
                }
                continue;
            }
            if !pending.is_empty() && !attrs.is_dir() {
                return Err(NfsError::NotDirectory(path.to_string()));
            }
            current = handle;
            attributes = Some(attrs);
        }

        match attributes {
            Some(attributes) => Ok(Resolved { handle: current, attributes }),
            None => Err(NfsError::MissingAttributes(path.to_string())),
        }
    }
}
