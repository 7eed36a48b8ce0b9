use std::collections::HashMap;
use std::fmt;
use std::net::SocketAddr;

use bytes::BytesMut;

use crate::http::body::declared_length;
use crate::http::params::{self, Params};
use crate::http::parser::{ParseError, parse_request_line};
use crate::http::response::Response;
use crate::http::writer::{BlockingWriter, serialize_into, serialize_response};

/// HTTP request methods.
///
/// The common verbs get their own variant; any other first token of the
/// request line is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Create or submit data
    POST,
    /// PUT - Replace a resource
    PUT,
    /// DELETE - Delete a resource
    DELETE,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// OPTIONS - Describe communication options (CORS preflight)
    OPTIONS,
    /// PATCH - Partial modification of a resource
    PATCH,
    /// Any other token
    Other(String),
}

impl Method {
    /// Maps a request-line token to a method. Matching is case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// # use quickserve::http::request::Method;
    /// assert_eq!(Method::parse("GET"), Method::GET);
    /// assert_eq!(Method::parse("get"), Method::Other("get".to_string()));
    /// ```
    pub fn parse(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(s) => s,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed HTTP request, handed to the handler exactly once.
///
/// The fields are public and may be changed by the handler; the server
/// never looks at them again. The `send_*` methods write straight to the
/// client and return once the bytes are flushed. A request built without
/// a connection collects them in [`Request::outbound`] instead.
#[derive(Debug)]
pub struct Request {
    /// Header block as received, terminating CRLFCRLF included. Each byte
    /// maps to the char with the same value, so non-ASCII bytes survive as
    /// Latin-1 and `raw_header.chars().map(|c| c as u8)` gives the wire bytes.
    pub raw_header: String,
    /// Exactly `Content-Length` bytes, or empty
    pub body: Vec<u8>,
    /// First token of the request line
    pub method: Method,
    /// Second token of the request line (path plus query)
    pub path: String,
    /// Third token of the request line, if any
    pub version: Option<String>,
    /// Header fields; names are case-sensitive, the last duplicate wins
    pub headers: HashMap<String, String>,
    peer_addr: Option<SocketAddr>,
    outbound: Outbound,
    responded: bool,
}

#[derive(Debug)]
enum Outbound {
    Buffered(BytesMut),
    Client(BlockingWriter),
}

/// Builder for constructing Request objects without a connection.
///
/// Mostly useful for exercising handlers in tests.
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    version: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    peer_addr: Option<SocketAddr>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            path: None,
            version: None,
            headers: Vec::new(),
            body: Vec::new(),
            peer_addr: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn peer_addr(mut self, addr: SocketAddr) -> Self {
        self.peer_addr = Some(addr);
        self
    }

    /// Renders the header block and parses it back, so a built request
    /// obeys the same rules as one read from a socket.
    pub fn build(self) -> Result<Request, ParseError> {
        let method = self.method.unwrap_or(Method::GET);
        let path = self.path.unwrap_or_else(|| "/".to_string());
        let version = self.version.unwrap_or_else(|| "HTTP/1.1".to_string());

        let mut raw_header = format!("{} {} {}\r\n", method, path, version);
        let mut headers = HashMap::new();
        for (k, v) in self.headers {
            raw_header.push_str(&format!("{}: {}\r\n", k, v));
            headers.insert(k, v);
        }
        raw_header.push_str("\r\n");

        Request::new(raw_header, headers, self.body, self.peer_addr)
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Assembles a request from its scanned parts.
    ///
    /// Fails when the request line does not carry at least a method and a
    /// target; no partial request is produced in that case.
    pub fn new(
        raw_header: String,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        peer_addr: Option<SocketAddr>,
    ) -> Result<Self, ParseError> {
        let line = parse_request_line(&raw_header)?;

        Ok(Self {
            raw_header,
            body,
            method: line.method,
            path: line.target,
            version: line.version,
            headers,
            peer_addr,
            outbound: Outbound::Buffered(BytesMut::new()),
            responded: false,
        })
    }

    /// Retrieves a header value by its exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// The declared body length, using the same rules as the body reader.
    ///
    /// Returns 0 if the header is missing, invalid or out of range, so it
    /// always equals `body.len()` for a request read off a socket.
    pub fn content_length(&self) -> usize {
        declared_length(&self.headers).unwrap_or(0)
    }

    /// Remote address of the client, when the request came off a socket.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    /// Decoded `?key=value&key2` pairs of the target.
    pub fn query_params(&self) -> Params {
        params::parse_query(&self.path)
    }

    /// Decoded `key=value&key2` pairs of a form-encoded body.
    pub fn form_params(&self) -> Params {
        params::parse_form(&self.text())
    }

    /// The body as UTF-8 text; invalid sequences are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Sends `text` as `application/json; charset=utf-8`.
    pub fn send_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.respond(&Response::json_text(text))
    }

    /// Sends raw PNG bytes as `image/png`.
    pub fn send_image(&mut self, image: &[u8]) -> anyhow::Result<()> {
        self.respond(&Response::png(image))
    }

    /// Sends `contents` as a download named `file_name`.
    pub fn send_file(&mut self, file_name: &str, contents: &[u8]) -> anyhow::Result<()> {
        self.respond(&Response::attachment(file_name, contents))
    }

    /// Answers a CORS preflight.
    pub fn send_preflight(&mut self) -> anyhow::Result<()> {
        self.respond(&Response::preflight())
    }

    /// Whether any send method has been called.
    pub fn has_response(&self) -> bool {
        self.responded
    }

    /// Responses collected by a request that has no connection, in call
    /// order. Empty once the request is attached to a client.
    pub fn outbound(&self) -> &[u8] {
        match &self.outbound {
            Outbound::Buffered(buf) => &buf[..],
            Outbound::Client(_) => &[],
        }
    }

    pub(crate) fn respond(&mut self, response: &Response) -> anyhow::Result<()> {
        self.responded = true;

        match &mut self.outbound {
            Outbound::Buffered(buf) => {
                serialize_into(response, buf);
                Ok(())
            }
            Outbound::Client(writer) => writer.send(serialize_response(response)),
        }
    }

    /// Routes later sends to the client.
    pub(crate) fn attach(&mut self, writer: BlockingWriter) {
        self.outbound = Outbound::Client(writer);
    }

    /// Hands the client stream back, if one was attached.
    pub(crate) fn detach(&mut self) -> Option<BlockingWriter> {
        match std::mem::replace(&mut self.outbound, Outbound::Buffered(BytesMut::new())) {
            Outbound::Client(writer) => Some(writer),
            Outbound::Buffered(_) => None,
        }
    }
}
