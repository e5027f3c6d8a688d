//! In-memory doubles for the capability ports.
//!
//! `MockFs` serves fixture text for kernel pseudo-files. A path can hold a
//! sequence of contents so successive reads see counters advance, which is
//! what the CPU sampler needs. `MockRunner` returns canned process output,
//! optionally after a delay, for exercising the storage probe timeout.

use crate::ports::{CommandOutput, FileSystem, ProcessRunner};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MockFs {
    // Each read pops the front until a single entry remains, which then repeats.
    files: Mutex<HashMap<PathBuf, VecDeque<String>>>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file whose content never changes.
    pub fn with_file(self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.with_sequence(path, [content.into()])
    }

    /// Adds a file that yields `contents` on successive reads.
    pub fn with_sequence<I, S>(self, path: impl AsRef<Path>, contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue: VecDeque<String> = contents.into_iter().map(Into::into).collect();
        if let Ok(mut files) = self.files.lock() {
            files.insert(path.as_ref().to_path_buf(), queue);
        }
        self
    }
}

#[async_trait]
impl FileSystem for MockFs {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| io::Error::other("mock fs poisoned"))?;
        let queue = files.get_mut(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {}", path.display()),
            )
        })?;
        let next = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        next.ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "empty mock file"))
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    SpawnError(io::ErrorKind),
}

/// Canned responder for a single external command.
#[derive(Debug, Clone)]
pub struct MockRunner {
    reply: Reply,
    delay: Option<Duration>,
    calls: std::sync::Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockRunner {
    /// Succeeds with the given stdout.
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self::from_reply(Reply::Output(CommandOutput {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }))
    }

    /// Exits non-zero with the given stderr.
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self::from_reply(Reply::Output(CommandOutput {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }))
    }

    /// Fails to spawn at all, as when the program is not installed.
    pub fn missing() -> Self {
        Self::from_reply(Reply::SpawnError(io::ErrorKind::NotFound))
    }

    /// Waits `delay` before replying.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Program and arguments of every invocation so far.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn from_reply(reply: Reply) -> Self {
        Self {
            reply,
            delay: None,
            calls: Default::default(),
        }
    }
}

#[async_trait]
impl ProcessRunner for MockRunner {
    async fn run(&self, program: &str, args: &[&str]) -> io::Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            let mut argv = vec![program.to_string()];
            argv.extend(args.iter().map(|a| a.to_string()));
            calls.push(argv);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Reply::Output(out) => Ok(out.clone()),
            Reply::SpawnError(kind) => Err(io::Error::new(*kind, format!("{program}: not found"))),
        }
    }
}
