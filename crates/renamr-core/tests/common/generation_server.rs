//! Minimal HTTP/1.1 stand-in for the generateContent endpoint.
//!
//! Each POST is captured (Authorization header and JSON body) and answered
//! by a caller-supplied responder. Runs on background threads until the
//! process exits.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One request as the server saw it.
#[derive(Debug, Clone)]
pub struct Captured {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

impl Captured {
    /// The prompt at `contents[0].parts[0].text`.
    pub fn prompt(&self) -> &str {
        self.body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap_or_default()
    }
}

pub struct MockEndpoint {
    pub url: String,
    requests: Arc<Mutex<Vec<Captured>>>,
}

impl MockEndpoint {
    pub fn requests(&self) -> Vec<Captured> {
        self.requests.lock().unwrap().clone()
    }
}

/// Success body carrying `text` as the first candidate.
pub fn text_reply(text: &str) -> (u16, String) {
    let body = serde_json::json!({
        "candidates": [ { "content": { "parts": [ { "text": text } ], "role": "model" } } ]
    });
    (200, body.to_string())
}

/// Error body in the endpoint's envelope format.
pub fn error_reply(code: u16, status: &str, message: &str) -> (u16, String) {
    let body = serde_json::json!({
        "error": { "code": code, "message": message, "status": status }
    });
    (code, body.to_string())
}

/// Starts a server that answers every request via `respond`.
pub fn start<F>(respond: F) -> MockEndpoint
where
    F: Fn(&Captured) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);
    {
        let requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let requests = Arc::clone(&requests);
                let respond = Arc::clone(&respond);
                thread::spawn(move || handle(stream, &requests, respond.as_ref()));
            }
        });
    }
    MockEndpoint {
        url: format!("http://127.0.0.1:{}/v1beta/models/test:generateContent", port),
        requests,
    }
}

/// Accepts keys listed in `accepted`; everything else gets UNAUTHENTICATED.
pub fn start_keyed(accepted: &'static [&'static str], text: &'static str) -> MockEndpoint {
    start(move |req| {
        let key = req
            .authorization
            .as_deref()
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default();
        if accepted.contains(&key) {
            text_reply(text)
        } else {
            error_reply(401, "UNAUTHENTICATED", "API key not valid. Please pass a valid API key.")
        }
    })
}

fn handle<F>(mut stream: TcpStream, requests: &Mutex<Vec<Captured>>, respond: &F)
where
    F: Fn(&Captured) -> (u16, String),
{
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut data = Vec::new();
    let mut buf = [0u8; 8192];
    let header_end = loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
        if let Some(pos) = find(&data, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let (authorization, content_length) = parse_head(&head);
    while data.len() < header_end + content_length {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => data.extend_from_slice(&buf[..n]),
        }
    }
    let body_end = (header_end + content_length).min(data.len());
    let body = serde_json::from_slice(&data[header_end..body_end]).unwrap_or_default();

    let captured = Captured {
        authorization,
        body,
    };
    let (status, reply) = respond(&captured);
    requests.lock().unwrap().push(captured);

    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reply.len(),
        reply
    );
    let _ = stream.write_all(response.as_bytes());
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Returns (Authorization value, Content-Length).
fn parse_head(head: &str) -> (Option<String>, usize) {
    let mut authorization = None;
    let mut content_length = 0;
    for line in head.lines().skip(1) {
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if name.eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_string());
            } else if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }
    (authorization, content_length)
}
