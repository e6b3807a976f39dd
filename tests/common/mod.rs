//! Common test utilities
#![allow(dead_code)]

use cogctl::error::{ProviderError, Result};
use cogctl::provider::{
    AdminCreateUserRequest, AdminCreateUserResponse, AdminDeleteUserRequest, IdentityProvider,
    InitiateAuthRequest, InitiateAuthResponse,
};
use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

/// A call received by `RecordingProvider`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateUser(AdminCreateUserRequest),
    DeleteUser(AdminDeleteUserRequest),
    InitiateAuth(InitiateAuthRequest),
}

/// Provider that records every call and answers from canned values
#[derive(Default)]
pub struct RecordingProvider {
    pub calls: RefCell<Vec<Call>>,
    pub auth_response: InitiateAuthResponse,
    /// Service error returned by every call, as (status, code)
    pub failure: Option<(u16, &'static str)>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auth_response(auth_response: InitiateAuthResponse) -> Self {
        RecordingProvider {
            auth_response,
            ..Default::default()
        }
    }

    pub fn failing(status: u16, code: &'static str) -> Self {
        RecordingProvider {
            failure: Some((status, code)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match self.failure {
            Some((status, code)) => Err(ProviderError::Service {
                status,
                code: code.to_string(),
                message: format!("{} raised by test provider", code),
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl IdentityProvider for RecordingProvider {
    fn admin_create_user(&self, request: &AdminCreateUserRequest) -> Result<AdminCreateUserResponse> {
        self.record(Call::CreateUser(request.clone()))?;
        Ok(AdminCreateUserResponse::default())
    }

    fn admin_delete_user(&self, request: &AdminDeleteUserRequest) -> Result<()> {
        self.record(Call::DeleteUser(request.clone()))
    }

    fn initiate_auth(&self, request: &InitiateAuthRequest) -> Result<InitiateAuthResponse> {
        self.record(Call::InitiateAuth(request.clone()))?;
        Ok(self.auth_response.clone())
    }
}

/// A request captured by `Responder`
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request_line: String,
    /// Header names are lowercased
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Local HTTP endpoint answering a single request with a canned response.
///
/// Request bodies are read by `Content-Length` only; chunked bodies are not
/// supported.
pub struct Responder {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Responder {
    pub fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let body = body.to_string();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                if let Ok(request) = read_request(&mut stream) {
                    recorded.lock().unwrap().push(request);
                }
                let _ = write_response(&mut stream, status, &body);
            }
        });

        Responder { url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn read_request(stream: &mut TcpStream) -> io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let content_length = headers
        .iter()
        .find(|(name, _)| name == "content-length")
        .and_then(|(_, value)| value.parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = buf.len().min(header_end + content_length);
    let body = String::from_utf8_lossy(&buf[header_end..end]).to_string();

    Ok(RecordedRequest {
        request_line,
        headers,
        body,
    })
}

fn write_response(stream: &mut TcpStream, status: u16, body: &str) -> io::Result<()> {
    let reason = match status {
        200 => "OK",
        400 => "Bad Request",
        _ => "Error",
    };
    write!(
        stream,
        "HTTP/1.1 {} {}\r\nContent-Type: application/x-amz-json-1.1\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )?;
    stream.flush()
}
