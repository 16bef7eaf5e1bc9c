use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde_json::Value;

/// Drives a spawned server binary line by line, the way a real client does:
/// write one request, read one response.
pub struct ServerProcess {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
}

#[allow(dead_code)]
impl ServerProcess {
    pub fn spawn() -> Self {
        Self::spawn_with_args(&[])
    }

    pub fn spawn_with_args(args: &[&str]) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_mcpserve"))
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .expect("failed to spawn mcpserve");
        let stdin = child.stdin.take().expect("child stdin");
        let stdout = BufReader::new(child.stdout.take().expect("child stdout"));
        Self {
            child,
            stdin: Some(stdin),
            stdout,
            next_id: 1,
        }
    }

    /// Writes one raw line to the server.
    pub fn send_line(&mut self, line: &str) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        writeln!(stdin, "{line}").expect("write to server");
        stdin.flush().expect("flush to server");
    }

    /// Writes raw bytes plus a newline, for inputs that are not valid UTF-8.
    pub fn send_raw(&mut self, bytes: &[u8]) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        stdin.write_all(bytes).expect("write to server");
        stdin.write_all(b"\n").expect("write to server");
        stdin.flush().expect("flush to server");
    }

    /// Reads the next response line and parses it as one JSON document.
    pub fn read_response(&mut self) -> Value {
        let mut line = String::new();
        let read = self.stdout.read_line(&mut line).expect("read from server");
        assert!(read > 0, "server closed stdout unexpectedly");
        serde_json::from_str(line.trim()).expect("response line is valid JSON")
    }

    /// Sends a request with a fresh numeric id and returns its response.
    pub fn request(&mut self, method: &str, params: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        self.send_line(
            &serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params
            })
            .to_string(),
        );
        let resp = self.read_response();
        assert_eq!(resp["id"], id, "response correlates with the request");
        resp
    }

    /// Sends a request without a params member.
    pub fn request_no_params(&mut self, method: &str) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        self.send_line(
            &serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method
            })
            .to_string(),
        );
        let resp = self.read_response();
        assert_eq!(resp["id"], id, "response correlates with the request");
        resp
    }

    /// Runs the standard handshake and returns the initialize response.
    pub fn initialize(&mut self) -> Value {
        self.request(
            "initialize",
            serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.0.0"}
            }),
        )
    }

    /// Closes stdin and waits for the server to exit on its own.
    pub fn shutdown(mut self) -> std::process::ExitStatus {
        drop(self.stdin.take());
        self.child.wait().expect("wait for server exit")
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
