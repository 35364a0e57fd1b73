//! Terminal session - the append-only log and the Idle/Running state
//! machine around the streaming execute endpoint.

use futures_util::StreamExt;
use shared_types::CommandRequest;

use crate::decode::Utf8Carry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// How a submitted input was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, or a command arrived while one was already running.
    Ignored,
    /// Handled locally (`clear`, `help`), no network traffic.
    Local,
    /// Sent to the execution endpoint and streamed to completion.
    Executed,
}

pub struct TerminalSession {
    endpoint: String,
    workdir: String,
    http: reqwest::Client,
    phase: Phase,
    log: Vec<String>,
}

impl TerminalSession {
    pub fn new(base_url: &str, workdir: impl Into<String>) -> anyhow::Result<Self> {
        let workdir = workdir.into();
        let mut log = Vec::new();
        log.extend(banner_lines(&workdir));

        Ok(Self {
            endpoint: format!(
                "{}/api/terminal/execute",
                base_url.trim_end_matches('/')
            ),
            workdir,
            http: reqwest::Client::builder().build()?,
            phase: Phase::Idle,
            log,
        })
    }

    /// The terminal log, oldest entry first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub async fn submit(&mut self, input: &str) -> Submission {
        self.submit_with(input, |_| {}).await
    }

    /// Submit one line of input. `on_append` fires for every log entry the
    /// submission produces, as it is produced, so callers can render
    /// incrementally.
    pub async fn submit_with<F>(&mut self, input: &str, mut on_append: F) -> Submission
    where
        F: FnMut(&str),
    {
        let command = input.trim().to_string();
        if command.is_empty() || self.is_running() {
            return Submission::Ignored;
        }

        self.append(format!("$ {command}"), &mut on_append);

        if command == "clear" {
            self.log.clear();
            self.log.push(String::new());
            return Submission::Local;
        }

        if command == "help" {
            for line in help_lines(&self.workdir) {
                self.append(line, &mut on_append);
            }
            return Submission::Local;
        }

        self.phase = Phase::Running;
        self.run_remote(&command, &mut on_append).await;
        self.phase = Phase::Idle;
        Submission::Executed
    }

    async fn run_remote<F>(&mut self, command: &str, on_append: &mut F)
    where
        F: FnMut(&str),
    {
        let request = CommandRequest {
            command: command.to_string(),
            cwd: Some(self.workdir.clone()),
        };

        let response = match self.http.post(&self.endpoint).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                self.append(format!("Error: {e}"), on_append);
                return;
            }
        };

        // Do not read a body on failure statuses; the status text is the
        // whole message.
        if !response.status().is_success() {
            self.append(format!("Error: {}", response.status()), on_append);
            return;
        }

        let mut decoder = Utf8Carry::default();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            match chunk {
                Ok(bytes) => {
                    let segment = decoder.push(&bytes);
                    if !segment.is_empty() {
                        self.append(segment, on_append);
                    }
                }
                Err(e) => {
                    self.append(format!("Error: {e}"), on_append);
                    return;
                }
            }
        }

        let tail = decoder.flush();
        if !tail.is_empty() {
            self.append(tail, on_append);
        }

        // Trailing separator marks a completed stream.
        self.append(String::new(), on_append);
    }

    fn append<F>(&mut self, entry: String, on_append: &mut F)
    where
        F: FnMut(&str),
    {
        on_append(&entry);
        self.log.push(entry);
    }
}

fn banner_lines(workdir: &str) -> Vec<String> {
    vec![
        "╔══════════════════════════════════════════╗".to_string(),
        "║     FDE Dashboard Terminal v1.0          ║".to_string(),
        "╚══════════════════════════════════════════╝".to_string(),
        String::new(),
        "Commands run in the live FDE workspace".to_string(),
        "Tip: ls, cd, npm and full shell pipelines all work".to_string(),
        format!("Workspace: {workdir}"),
        String::new(),
    ]
}

fn help_lines(workdir: &str) -> Vec<String> {
    vec![
        "FDE Dashboard Terminal".to_string(),
        String::new(),
        format!("Current directory: {workdir}"),
        String::new(),
        "Commands are executed by the real shell:".to_string(),
        "  ls -la           - list files with details".to_string(),
        "  cd <dir>         - change directory".to_string(),
        "  pwd              - print the current directory".to_string(),
        "  npm run dev      - start the dev server".to_string(),
        "  git status       - show git status".to_string(),
        "  clear            - clear the screen".to_string(),
        "  help             - show this help".to_string(),
        String::new(),
        "Pipes (|) and chaining (&&) work too, e.g. ls -la | grep json".to_string(),
        String::new(),
    ]
}
