use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use nfs_shell::{ClientConfig, Session};

/// Maps one command line to session calls
mod commands;
/// `ls -l`, `stat` and `df` output
mod format;

const PROMPT: &str = "nfs> ";

/// Interactive NFSv3 client.
///
/// Reads commands from stdin until `quit` or end of input. Failures of a
/// command are printed and the loop goes on with the next line.
#[tokio::main]
async fn main() -> Result<()> {
    let mut debug = false;
    let mut host: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--debug" => debug = true,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: nfsshell [--debug] [HOST]\n\
                     \n\
                     Options:\n\
                       --debug     Log every RPC call to stderr\n\
                       -h, --help  Show this help and exit\n\
                     \n\
                     Type `help` at the prompt for the list of commands."
                );
                return Ok(());
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                std::process::exit(2);
            }
            _ if host.is_some() => {
                eprintln!("Only one host may be given");
                std::process::exit(2);
            }
            _ => host = Some(arg),
        }
    }

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut config = ClientConfig::default();
    if let Some(host) = host {
        config = config.with_host(host);
    }
    let mut session = Session::new(config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let args = match commands::split(&line) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };
        match commands::run(&mut session, &args).await {
            Ok(commands::Flow::Continue) => {}
            Ok(commands::Flow::Quit) => break,
            Err(e) => eprintln!("{e:#}"),
        }
    }

    session.close().await;
    Ok(())
}
