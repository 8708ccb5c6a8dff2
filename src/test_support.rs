//! Test doubles: a minimal HTTP responder and an in-memory version control client.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use crate::repository::VersionControl;

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Serves `images` keyed by request path; every other path answers 404.
    pub async fn start(images: HashMap<String, Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let images = Arc::new(images);

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let images = Arc::clone(&images);
                let log = Arc::clone(&log);
                tokio::spawn(async move { respond(stream, &images, &log).await });
            }
        });

        StubServer { base_url, requests }
    }

    /// Request paths in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn respond(
    mut stream: TcpStream,
    images: &HashMap<String, Vec<u8>>,
    log: &Mutex<Vec<String>>,
) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&head);
    let path = request
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(path.clone());

    let (status, body) = match images.get(&path) {
        Some(bytes) => ("200 OK", bytes.clone()),
        None => ("404 Not Found", Vec::new()),
    };
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        body.len()
    );

    let _ = stream.write_all(header.as_bytes()).await;
    let _ = stream.write_all(&body).await;
    let _ = stream.shutdown().await;
}

#[derive(Default)]
struct FakeRemote {
    branches: Vec<String>,
    calls: Vec<String>,
    failing_on: Option<&'static str>,
}

/// In-memory stand-in for git and the hosting API. Clones share state.
#[derive(Clone, Default)]
pub struct FakeVcs {
    remote: Arc<Mutex<FakeRemote>>,
}

impl FakeVcs {
    pub fn with_branches(branches: &[&str]) -> Self {
        let vcs = FakeVcs::default();
        vcs.remote.lock().unwrap().branches = branches.iter().map(|b| b.to_string()).collect();
        vcs
    }

    /// Makes the operation whose call starts with `operation` fail.
    pub fn failing_on(self, operation: &'static str) -> Self {
        self.remote.lock().unwrap().failing_on = Some(operation);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.remote.lock().unwrap().calls.clone()
    }

    pub fn branches(&self) -> Vec<String> {
        self.remote.lock().unwrap().branches.clone()
    }

    fn record(&self, call: String) -> anyhow::Result<()> {
        let mut remote = self.remote.lock().unwrap();
        let operation = call.split(' ').next().unwrap_or_default().to_string();
        let fails = remote.failing_on == Some(operation.as_str());
        remote.calls.push(call);

        if fails {
            anyhow::bail!("{} failed", operation);
        }
        Ok(())
    }
}

impl VersionControl for FakeVcs {
    async fn list_remote_branches(&self) -> anyhow::Result<Vec<String>> {
        self.record("list".to_string())?;
        Ok(self.branches())
    }

    async fn clone_branch(&self, branch: Option<&str>, dir: &Path) -> anyhow::Result<()> {
        self.record(format!(
            "clone {} {}",
            branch.unwrap_or("<default>"),
            dir.display()
        ))?;

        std::fs::create_dir_all(dir.join(".git"))?;
        Ok(())
    }

    async fn create_branch(&self, _dir: &Path, branch: &str) -> anyhow::Result<()> {
        self.record(format!("create {}", branch))
    }

    async fn clear_tracked(&self, _dir: &Path) -> anyhow::Result<()> {
        self.record("clear".to_string())
    }

    async fn commit(&self, _dir: &Path, message: &str) -> anyhow::Result<()> {
        self.record(format!("commit {}", message))
    }

    async fn push(&self, _dir: &Path, branch: &str, force: bool) -> anyhow::Result<()> {
        let operation = if force { "force-push" } else { "push" };
        self.record(format!("{} {}", operation, branch))?;

        let mut remote = self.remote.lock().unwrap();
        if !remote.branches.iter().any(|b| b == branch) {
            remote.branches.push(branch.to_string());
        }
        Ok(())
    }
}
