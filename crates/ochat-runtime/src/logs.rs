//! Forwarding of child output into `tracing`.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Child;
use tracing::{debug, info, warn};

/// Spawn reader tasks for the child's captured stdout and stderr.
///
/// stdout lines are logged at `info`, stderr lines at `warn`. Each task ends
/// when its pipe closes.
pub(crate) fn forward_output(child: &mut Child, pid: u32) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, pid, Stream::Stdout));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, pid, Stream::Stderr));
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

async fn forward_lines<R>(pipe: R, pid: u32, stream: Stream)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(pipe).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match stream {
            Stream::Stdout => info!(target: "ochat::server", pid, "{line}"),
            Stream::Stderr => warn!(target: "ochat::server", pid, "{line}"),
        }
    }
    debug!(pid, ?stream, "Server output reader exiting");
}
