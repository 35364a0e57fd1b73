//! Process runner - spawns one shell-interpreted child process per call and
//! exposes its output as an ordered stream of [`OutputChunk`]s.
//!
//! The command string is handed to the shell verbatim (`<shell> -c <cmd>`),
//! so pipelines, `&&` chains and redirections supplied by the operator keep
//! working. That is the tool's contract, not an oversight.

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;

/// One unit of data flowing from the child process toward the client.
///
/// `Exit` and `Error` are terminal: exactly one of them is emitted per
/// invocation, always after every output chunk. `Error` covers both spawn
/// failures and the output-cap blowout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputChunk {
    Stdout(Bytes),
    Stderr(Bytes),
    Exit(i32),
    Error(String),
}

enum PumpEnd {
    Eof,
    Overflow,
    Closed,
}

/// Spawn `command` under `shell` in `workdir` and stream its output.
///
/// Returns immediately; all process I/O happens on background tasks. If the
/// returned receiver is dropped before the process finishes (client
/// disconnected), the child is killed and reaped.
pub fn spawn_command(
    command: &str,
    workdir: &Path,
    shell: &str,
    output_cap: usize,
) -> mpsc::Receiver<OutputChunk> {
    let (tx, rx) = mpsc::channel::<OutputChunk>(64);

    tracing::debug!(command = %command, workdir = %workdir.display(), "spawning command");

    let mut child = match Command::new(shell)
        .arg("-c")
        .arg(command)
        .current_dir(workdir)
        // Child tools that sniff for a terminal should still emit color.
        .env("FORCE_COLOR", "1")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            tokio::spawn(async move {
                let _ = tx.send(OutputChunk::Error(e.to_string())).await;
            });
            return rx;
        }
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        tokio::spawn(async move {
            let _ = tx
                .send(OutputChunk::Error(
                    "failed to capture process output pipes".to_string(),
                ))
                .await;
        });
        return rx;
    };

    // Combined stdout+stderr budget, shared by both reader tasks.
    let budget = Arc::new(AtomicUsize::new(0));

    tokio::spawn(async move {
        let mut stdout_task = tokio::spawn(pump(
            stdout,
            tx.clone(),
            budget.clone(),
            output_cap,
            OutputChunk::Stdout,
        ));
        let mut stderr_task = tokio::spawn(pump(
            stderr,
            tx.clone(),
            budget,
            output_cap,
            OutputChunk::Stderr,
        ));

        let mut stdout_end: Option<PumpEnd> = None;
        let mut stderr_end: Option<PumpEnd> = None;

        loop {
            tokio::select! {
                end = &mut stdout_task, if stdout_end.is_none() => {
                    stdout_end = Some(end.unwrap_or(PumpEnd::Eof));
                }
                end = &mut stderr_task, if stderr_end.is_none() => {
                    stderr_end = Some(end.unwrap_or(PumpEnd::Eof));
                }
                // Receiver dropped: the HTTP response is gone, treat it as
                // cancellation and release the process.
                _ = tx.closed() => {
                    tracing::warn!("client disconnected mid-execution, killing child process");
                    let _ = child.kill().await;
                    return;
                }
            }

            if matches!(stdout_end, Some(PumpEnd::Overflow))
                || matches!(stderr_end, Some(PumpEnd::Overflow))
            {
                tracing::warn!(output_cap, "output cap exceeded, killing child process");
                let _ = child.kill().await;
                let _ = tx
                    .send(OutputChunk::Error(format!(
                        "combined output exceeded the {output_cap} byte cap"
                    )))
                    .await;
                return;
            }

            if matches!(stdout_end, Some(PumpEnd::Closed))
                || matches!(stderr_end, Some(PumpEnd::Closed))
            {
                let _ = child.kill().await;
                return;
            }

            if stdout_end.is_some() && stderr_end.is_some() {
                break;
            }
        }

        match child.wait().await {
            Ok(status) => {
                let _ = tx.send(OutputChunk::Exit(status.code().unwrap_or(1))).await;
            }
            Err(e) => {
                let _ = tx
                    .send(OutputChunk::Error(format!("failed to reap process: {e}")))
                    .await;
            }
        }
    });

    rx
}

/// Forward one pipe into the chunk channel, charging every byte against the
/// shared budget. Per-stream ordering is guaranteed by this task reading and
/// sending sequentially.
async fn pump<R: AsyncRead + Unpin>(
    mut reader: R,
    tx: mpsc::Sender<OutputChunk>,
    budget: Arc<AtomicUsize>,
    output_cap: usize,
    wrap: fn(Bytes) -> OutputChunk,
) -> PumpEnd {
    let mut buf = [0u8; 8192];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => return PumpEnd::Eof,
            Ok(n) => {
                if budget.fetch_add(n, Ordering::Relaxed) + n > output_cap {
                    return PumpEnd::Overflow;
                }
                if tx.send(wrap(Bytes::copy_from_slice(&buf[..n]))).await.is_err() {
                    return PumpEnd::Closed;
                }
            }
            Err(_) => return PumpEnd::Eof,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_OUTPUT_CAP_BYTES;
    use std::path::PathBuf;
    use tokio::time::{sleep, Duration};

    fn test_workdir() -> PathBuf {
        std::env::current_dir().expect("current dir")
    }

    async fn collect(mut rx: mpsc::Receiver<OutputChunk>) -> Vec<OutputChunk> {
        let mut chunks = Vec::new();
        while let Some(chunk) = rx.recv().await {
            chunks.push(chunk);
        }
        chunks
    }

    fn stdout_bytes(chunks: &[OutputChunk]) -> Vec<u8> {
        chunks
            .iter()
            .filter_map(|c| match c {
                OutputChunk::Stdout(b) => Some(b.to_vec()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    fn stderr_bytes(chunks: &[OutputChunk]) -> Vec<u8> {
        chunks
            .iter()
            .filter_map(|c| match c {
                OutputChunk::Stderr(b) => Some(b.to_vec()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    #[tokio::test]
    async fn echo_produces_stdout_then_exit_zero() {
        let rx = spawn_command("echo hi", &test_workdir(), "/bin/sh", DEFAULT_OUTPUT_CAP_BYTES);
        let chunks = collect(rx).await;

        assert_eq!(stdout_bytes(&chunks), b"hi\n");
        assert!(stderr_bytes(&chunks).is_empty());
        assert_eq!(chunks.last(), Some(&OutputChunk::Exit(0)));
    }

    #[tokio::test]
    async fn nonzero_exit_code_is_the_final_chunk() {
        let rx = spawn_command("exit 3", &test_workdir(), "/bin/sh", DEFAULT_OUTPUT_CAP_BYTES);
        let chunks = collect(rx).await;
        assert_eq!(chunks.last(), Some(&OutputChunk::Exit(3)));
    }

    #[tokio::test]
    async fn stderr_is_tagged_separately_from_stdout() {
        let rx = spawn_command(
            "echo out && echo oops 1>&2",
            &test_workdir(),
            "/bin/sh",
            DEFAULT_OUTPUT_CAP_BYTES,
        );
        let chunks = collect(rx).await;

        assert_eq!(stdout_bytes(&chunks), b"out\n");
        assert_eq!(stderr_bytes(&chunks), b"oops\n");
        assert_eq!(chunks.last(), Some(&OutputChunk::Exit(0)));
    }

    #[tokio::test]
    async fn shell_pipelines_are_honored() {
        let rx = spawn_command(
            "printf 'one\\ntwo\\nthree\\n' | grep two",
            &test_workdir(),
            "/bin/sh",
            DEFAULT_OUTPUT_CAP_BYTES,
        );
        let chunks = collect(rx).await;
        assert_eq!(stdout_bytes(&chunks), b"two\n");
        assert_eq!(chunks.last(), Some(&OutputChunk::Exit(0)));
    }

    #[tokio::test]
    async fn bad_workdir_yields_single_error_chunk_and_no_exit() {
        let rx = spawn_command(
            "echo hi",
            Path::new("/nonexistent/path"),
            "/bin/sh",
            DEFAULT_OUTPUT_CAP_BYTES,
        );
        let chunks = collect(rx).await;

        assert_eq!(chunks.len(), 1);
        assert!(matches!(chunks[0], OutputChunk::Error(_)));
    }

    #[tokio::test]
    async fn exceeding_the_output_cap_is_fatal() {
        let rx = spawn_command("head -c 65536 /dev/zero", &test_workdir(), "/bin/sh", 1024);
        let chunks = collect(rx).await;

        match chunks.last() {
            Some(OutputChunk::Error(msg)) => assert!(msg.contains("byte cap"), "got: {msg}"),
            other => panic!("expected terminal error chunk, got {other:?}"),
        }
        assert!(!chunks.iter().any(|c| matches!(c, OutputChunk::Exit(_))));
    }

    #[tokio::test]
    async fn dropping_the_receiver_cancels_the_child() {
        let dir = tempfile::tempdir().expect("tempdir");
        let marker = dir.path().join("marker");
        let command = format!("sleep 1 && touch {}", marker.display());

        let rx = spawn_command(&command, dir.path(), "/bin/sh", DEFAULT_OUTPUT_CAP_BYTES);
        drop(rx);

        sleep(Duration::from_millis(1800)).await;
        assert!(
            !marker.exists(),
            "child kept running after the receiver was dropped"
        );
    }
}
