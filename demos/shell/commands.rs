use anyhow::{bail, Context, Result};

use nfs_shell::xdr::nfs3::nfsstat3;
use nfs_shell::{FileHandle, NfsError, NodeKind, Session};

use crate::format;

pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
host <host>                    select the server and drop any mount
set [uid|gid|mode|host <v>]    show or change the session parameters
exports                        list the server's exports
mount <path>                   mount an export
umount                         unmount the current export
cd [path]                      change directory, the mount root without a path
handle [hex]                   show or set the current file handle
ls [-l] [path]                 list a directory
cat <path>                     print a remote file
get <path> [local]             copy a remote file here
put <local> [path]             copy a local file to the server
rm <path>                      remove a file
mkdir <path>                   create a directory
rmdir <path>                   remove an empty directory
mv <from> <to>                 rename
ln [-s] <target> <name>        hard or symbolic link
mknod <path> <s|p|b|c> [major minor]
chmod <mode> <path>            octal permission bits
chown <uid[:gid]> <path>       change owner
stat <path>                    attributes of a path
df [path]                      file system figures
quit                           leave";

fn arity(args: &[String], min: usize, max: usize, usage: &str) -> Result<()> {
    let given = args.len() - 1;
    if given < min || given > max {
        bail!("usage: {usage}");
    }
    Ok(())
}

/// Last component of a slash separated path, for naming copies.
fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or(path)
}

/// Command line words with shell quoting and escapes resolved.
pub fn split(line: &str) -> Result<Vec<String>> {
    shell_words::split(line).context("cannot split the command line")
}

pub async fn run(session: &mut Session, args: &[String]) -> Result<Flow> {
    let Some(verb) = args.first() else {
        return Ok(Flow::Continue);
    };
    let arg = |i: usize| args.get(i).map(String::as_str);
    match verb.as_str() {
        "help" | "?" => println!("{HELP}"),
        "quit" | "exit" | "bye" => return Ok(Flow::Quit),
        "host" => {
            arity(args, 1, 1, "host <host>")?;
            session.set_host(&args[1]).await?;
        }
        "set" => match args.len() {
            1 => {
                let config = session.config();
                println!("host: {}", config.host.as_deref().unwrap_or("(none)"));
                println!("uid: {}\ngid: {}\nmode: {:o}", config.uid, config.gid, config.mode);
            }
            3 => session.set(&args[1], &args[2]).await?,
            _ => bail!("usage: set <uid|gid|mode|host> <value>"),
        },
        "exports" => {
            arity(args, 0, 0, "exports")?;
            for export in session.exports().await? {
                println!("{export}");
            }
        }
        "mount" => {
            arity(args, 1, 1, "mount <path>")?;
            let mount = session.mount(&args[1]).await?;
            println!("mounted {} handle {}", mount.path, mount.root);
        }
        "umount" => session.umount().await,
        "cd" => {
            arity(args, 0, 1, "cd [path]")?;
            session.cd(arg(1)).await?;
        }
        "handle" => match arg(1) {
            None => println!("{}", session.handle()?),
            Some(hex) => session.set_handle(hex.parse::<FileHandle>()?),
        },
        "ls" => {
            let long = arg(1) == Some("-l");
            let rest = if long { &args[2..] } else { &args[1..] };
            if rest.len() > 1 {
                bail!("usage: ls [-l] [path]");
            }
            list(session, rest.first().map(String::as_str), long).await?;
        }
        "cat" => {
            arity(args, 1, 1, "cat <path>")?;
            let data = session.read_to_end(&args[1]).await?;
            print!("{}", String::from_utf8_lossy(&data));
        }
        "get" => {
            arity(args, 1, 2, "get <path> [local]")?;
            let local = arg(2).unwrap_or_else(|| basename(&args[1]));
            let data = session.read_to_end(&args[1]).await?;
            tokio::fs::write(local, &data).await.with_context(|| format!("writing {local}"))?;
            println!("{} bytes copied to {local}", data.len());
        }
        "put" => {
            arity(args, 1, 2, "put <local> [path]")?;
            let remote = arg(2).unwrap_or_else(|| basename(&args[1]));
            put(session, &args[1], remote).await?;
        }
        "rm" => {
            arity(args, 1, 1, "rm <path>")?;
            session.remove(&args[1]).await?;
        }
        "mkdir" => {
            arity(args, 1, 1, "mkdir <path>")?;
            session.mkdir(&args[1]).await?;
        }
        "rmdir" => {
            arity(args, 1, 1, "rmdir <path>")?;
            session.rmdir(&args[1]).await?;
        }
        "mv" => {
            arity(args, 2, 2, "mv <from> <to>")?;
            session.rename(&args[1], &args[2]).await?;
        }
        "ln" => {
            let symbolic = arg(1) == Some("-s");
            let rest = if symbolic { &args[2..] } else { &args[1..] };
            let [target, name] = rest else {
                bail!("usage: ln [-s] <target> <name>");
            };
            if symbolic {
                session.symlink(target, name).await?;
            } else {
                session.link(target, name).await?;
            }
        }
        "mknod" => {
            arity(args, 2, 4, "mknod <path> <s|p|b|c> [major minor]")?;
            let kind = NodeKind::parse(&args[2], arg(3), arg(4))?;
            session.mknod(&args[1], kind).await?;
        }
        "chmod" => {
            arity(args, 2, 2, "chmod <mode> <path>")?;
            session.chmod(&args[2], &args[1]).await?;
        }
        "chown" => {
            arity(args, 2, 2, "chown <uid[:gid]> <path>")?;
            session.chown(&args[2], &args[1]).await?;
        }
        "stat" => {
            arity(args, 1, 1, "stat <path>")?;
            println!("{}", format::stat(&args[1], &session.stat(&args[1]).await?));
        }
        "df" => {
            arity(args, 0, 1, "df [path]")?;
            println!("{}", format::df(&session.fsstat(arg(1)).await?));
        }
        other => bail!("{other}: unknown command, try help"),
    }
    Ok(Flow::Continue)
}

/// Prints a listing page by page as the server returns it.
async fn list(session: &mut Session, path: Option<&str>, long: bool) -> Result<()> {
    let mut lister = session.list_dir(path).await?;
    loop {
        let more = if long {
            let listing = session.next_page_detailed(&mut lister).await?;
            for item in &listing.entries {
                match &item.details {
                    Ok(details) => println!(
                        "{}",
                        format::long_entry(
                            &item.entry.name,
                            &details.attributes,
                            details.link_target.as_deref()
                        )
                    ),
                    Err(e) => eprintln!("{}: {e}", item.entry.name),
                }
            }
            listing.more
        } else {
            let listing = session.next_page(&mut lister).await?;
            for entry in &listing.entries {
                println!("{}", entry.name);
            }
            listing.more
        };
        if !more {
            return Ok(());
        }
    }
}

/// Creates `remote` unless it exists and writes `local` into it in chunks,
/// stopping at the first write the server only partly accepts.
async fn put(session: &mut Session, local: &str, remote: &str) -> Result<()> {
    let data = tokio::fs::read(local).await.with_context(|| format!("reading {local}"))?;
    match session.create(remote).await {
        Ok(()) => {}
        Err(NfsError::Protocol { status: nfsstat3::NFS3ERR_EXIST }) => {}
        Err(e) => return Err(e.into()),
    }

    let chunk = session.config().read_chunk.max(1) as usize;
    let mut offset = 0u64;
    for piece in data.chunks(chunk) {
        match session.write(remote, offset, piece).await {
            Ok(reply) => offset += u64::from(reply.count),
            Err(NfsError::ShortWrite { accepted, requested }) => {
                println!("{local} - {accepted} bytes written but {requested} requested!");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }
    println!("{offset} bytes copied to {remote}");
    Ok(())
}
