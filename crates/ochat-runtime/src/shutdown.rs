//! Graceful termination of the server child: SIGTERM, grace period, SIGKILL.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tracing::{debug, warn};

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Ask the process to exit without waiting for it.
///
/// Unix sends SIGTERM. Elsewhere there is no graceful signal, so this does
/// nothing and [`reap`] kills the child outright.
#[cfg(unix)]
fn request_termination(pid: u32) {
    let Ok(raw) = i32::try_from(pid) else {
        warn!(pid, "PID out of range, not signalling");
        return;
    };
    match signal::kill(Pid::from_raw(raw), Signal::SIGTERM) {
        Ok(()) => debug!(pid, "Sent SIGTERM"),
        Err(Errno::ESRCH) => debug!(pid, "Process already exited"),
        Err(e) => warn!(pid, error = %e, "Failed to send SIGTERM"),
    }
}

#[cfg(not(unix))]
fn request_termination(_pid: u32) {}

/// Signal a child owned by the caller and wait for it with [`reap`].
///
/// A child that has already exited is reaped without being signalled; its
/// PID may belong to another process by now.
pub(crate) async fn terminate(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    if let Some(status) = child.try_wait()? {
        debug!(?status, "Server had already exited");
        return Ok(status);
    }
    if let Some(pid) = child.id() {
        request_termination(pid);
    }
    reap(child, grace).await
}

/// Wait for a child that was asked to terminate, escalating to a hard kill
/// once `grace` has elapsed.
///
/// Always waits for reaping so no zombie is left behind.
async fn reap(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
            return status;
        }
        warn!(pid = ?child.id(), ?grace, "Server ignored SIGTERM, killing");
    }
    #[cfg(not(unix))]
    let _ = grace;

    child.kill().await?;
    child.wait().await
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::process::Command;

    #[tokio::test]
    async fn test_sigterm_stops_cooperative_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();

        let started = Instant::now();
        let status = terminate(&mut child, Duration::from_secs(5)).await.unwrap();

        assert!(!status.success());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_escalates_when_sigterm_ignored() {
        let mut child = Command::new("sh")
            .args(["-c", "trap '' TERM; exec sleep 30"])
            .spawn()
            .unwrap();
        // Let the shell install the trap before signalling.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let status = terminate(&mut child, Duration::from_millis(300)).await.unwrap();
        assert!(!status.success());
    }

    #[tokio::test]
    async fn test_exited_child_is_not_signalled() {
        let mut child = Command::new("sh").args(["-c", "exit 4"]).spawn().unwrap();
        // Let it exit without anyone waiting on it.
        tokio::time::sleep(Duration::from_millis(200)).await;

        let status = terminate(&mut child, Duration::from_secs(5)).await.unwrap();
        assert_eq!(status.code(), Some(4));
    }
}
