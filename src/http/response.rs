/// HTTP status codes the server emits.
///
/// Only `200 OK` exists: handlers choose the payload, never the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use quickserve::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
        }
    }
}

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const PNG_CONTENT_TYPE: &str = "image/png";
pub const DOWNLOAD_CONTENT_TYPE: &str = "application/octet-stream";
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";
pub const PREFLIGHT_MAX_AGE: &str = "86400";

/// Represents a complete HTTP response ready to be serialized.
///
/// Headers keep insertion order so the wire output is deterministic.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in the order they are written
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "application/json")
///     .body(b"{}".to_vec())
///     .build();
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a header, replacing the value of an existing header with the
    /// same name in place.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();

        match self.headers.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.headers.push((key, value)),
        }
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    ///
    /// Appends a Content-Length header matching the body unless one was set.
    pub fn build(mut self) -> Response {
        if !self.headers.iter().any(|(k, _)| k == "Content-Length") {
            self.headers
                .push(("Content-Length".to_string(), self.body.len().to_string()));
        }

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// A JSON (or any UTF-8 text) payload.
    pub fn json_text(text: &str) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", JSON_CONTENT_TYPE)
            .body(text.as_bytes().to_vec())
            .build()
    }

    /// A PNG image payload. The bytes are sent unchecked.
    pub fn png(image: &[u8]) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", PNG_CONTENT_TYPE)
            .body(image.to_vec())
            .build()
    }

    /// A download the browser should save as `file_name`.
    pub fn attachment(file_name: &str, contents: &[u8]) -> Self {
        let file_name: String = file_name
            .chars()
            .filter(|c| *c != '\r' && *c != '\n')
            .collect();

        ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", DOWNLOAD_CONTENT_TYPE)
            .header("Access-Control-Allow-Origin", "*")
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", file_name),
            )
            .body(contents.to_vec())
            .build()
    }

    /// A permissive CORS preflight answer with an empty body.
    pub fn preflight() -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .header("Allow", ALLOWED_METHODS)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOWED_METHODS)
            .header("Access-Control-Allow-Headers", "*")
            .header("Access-Control-Max-Age", PREFLIGHT_MAX_AGE)
            .build()
    }

    /// Looks up a header by exact name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
