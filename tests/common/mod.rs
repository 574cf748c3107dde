//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one canned response to every request and records the raw request
//! text so tests can inspect headers sent by the client.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: &'static str,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    /// Sleep this long before answering (simulates a stalled server).
    pub delay: Duration,
    pub location: Option<String>,
}

impl Canned {
    pub fn pdf(body: &[u8]) -> Self {
        Self {
            status: "200 OK",
            content_type: Some("application/pdf"),
            body: body.to_vec(),
            delay: Duration::ZERO,
            location: None,
        }
    }

    pub fn status(status: &'static str) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            body: b"<html>nope</html>".to_vec(),
            delay: Duration::ZERO,
            location: None,
        }
    }

    pub fn redirect(to: &str) -> Self {
        Self {
            status: "302 Found",
            content_type: None,
            body: Vec::new(),
            delay: Duration::ZERO,
            location: Some(to.to_string()),
        }
    }
}

pub struct TestServer {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(canned: Canned) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let canned = canned.clone();
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &canned, &seen));
        }
    });
    TestServer {
        url: format!("http://127.0.0.1:{}/doc.pdf", port),
        requests,
    }
}

fn handle(mut stream: TcpStream, canned: &Canned, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    seen.lock()
        .unwrap()
        .push(String::from_utf8_lossy(&buf[..n]).into_owned());

    thread::sleep(canned.delay);

    let content_type = canned
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let location = canned
        .location
        .as_ref()
        .map(|to| format!("Location: {}\r\n", to))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}{}Connection: close\r\n\r\n",
        canned.status,
        canned.body.len(),
        content_type,
        location
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&canned.body);
    let _ = stream.flush();
}

/// Writes an executable shell script that logs its arguments to `calls`
/// next to itself, then runs `body`. Stands in for curl.
#[cfg(unix)]
pub fn fake_curl(dir: &std::path::Path, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-curl");
    let script = format!(
        "#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/calls\"\n{}\n",
        body
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Argument lines recorded by [`fake_curl`], one per invocation.
pub fn fake_curl_calls(dir: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls"))
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// A local URL nobody is listening on.
pub fn refused_url() -> String {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{}/doc.pdf", port)
}
