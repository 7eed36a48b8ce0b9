use std::collections::HashMap;
use std::fmt;

use crate::http::request::Method;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The connection delivered no header bytes at all.
    Empty,
    /// The request line has fewer than two whitespace-separated tokens.
    MalformedRequestLine(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty request"),
            ParseError::MalformedRequestLine(line) => {
                write!(f, "malformed request line: {:?}", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Method, target and (optional) version from the first header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: Option<String>,
}

/// Maps every header byte to the char of the same value (Latin-1), so
/// the original bytes can always be recovered from the text.
pub fn decode_header_bytes(raw: &[u8]) -> String {
    raw.iter().map(|&b| b as char).collect()
}

pub fn parse_request_line(raw_header: &str) -> Result<RequestLine, ParseError> {
    if raw_header.is_empty() {
        return Err(ParseError::Empty);
    }

    let line = raw_header.split('\n').next().unwrap_or_default();
    let mut parts = line.split_ascii_whitespace();

    let (Some(method), Some(target)) = (parts.next(), parts.next()) else {
        return Err(ParseError::MalformedRequestLine(line.trim_end().to_string()));
    };

    Ok(RequestLine {
        method: Method::parse(method),
        target: target.to_string(),
        version: parts.next().map(str::to_string),
    })
}

/// Collects `Name: Value` lines that follow the request line.
///
/// Names keep their case, both sides are trimmed, a later duplicate
/// replaces an earlier one and lines without a colon are skipped.
pub fn parse_headers(raw_header: &str) -> HashMap<String, String> {
    let mut headers = HashMap::new();

    for line in raw_header.split('\n').filter(|l| !l.is_empty()).skip(1) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        headers.insert(key.trim().to_string(), value.trim().to_string());
    }

    headers
}
