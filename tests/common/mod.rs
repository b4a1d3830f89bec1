#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// What the stub saw of one request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lowercased.
    pub headers: Vec<(String, String)>,
}

impl CapturedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A tiny HTTP/1.1 server on a random local port. Every request gets the
/// response chosen by the handler for its path, then the connection closes.
pub struct StubServer {
    pub base_url: String,
    requests: Receiver<CapturedRequest>,
}

impl StubServer {
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str) -> (u16, String) + Send + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                if let Some(request) = serve(stream, &handler) {
                    let _ = tx.send(request);
                }
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests: rx,
        }
    }

    /// Always answers with `status` and `body`.
    pub fn fixed(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone()))
    }

    pub fn next_request(&self) -> CapturedRequest {
        self.requests
            .recv_timeout(Duration::from_secs(5))
            .expect("stub server saw no request")
    }

    /// A request the stub has already answered, if any is waiting.
    pub fn try_next_request(&self) -> Option<CapturedRequest> {
        self.requests.try_recv().ok()
    }
}

fn serve<F>(mut stream: TcpStream, handler: &F) -> Option<CapturedRequest>
where
    F: Fn(&str) -> (u16, String),
{
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    let (status, body) = handler(&path);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).ok()?;
    stream.flush().ok()?;

    Some(CapturedRequest {
        method,
        path,
        headers,
    })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

pub const MILK_BODY: &str = r#"{
  "data": [
    {"id": 1, "name": "Milk 2L", "brand": "Pura", "store": "Coles", "price": 4.5, "unitPriceString": "$2.25 / 1L", "size": "2L"},
    {"id": 2, "name": "Milk 1L", "brand": "Dairy Farmers", "store": "Aldi", "price": 2.2, "unitPriceString": "$2.20 / 1L", "size": "1L"},
    {"id": "w-3", "name": "Lite Milk 2L", "brand": "Pauls", "store": "Woolworths", "price": 3.1, "unitPriceString": "$1.55 / 1L", "size": "2L"}
  ]
}"#;
