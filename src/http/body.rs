use std::collections::HashMap;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Largest accepted `Content-Length`; anything above is treated as absent.
pub const MAX_CONTENT_LENGTH: usize = i32::MAX as usize;

/// Returns the body length declared by the `Content-Length` header.
///
/// The lookup is case-sensitive, like the rest of the header map. A value
/// that is missing, negative, non-numeric or above [`MAX_CONTENT_LENGTH`]
/// yields `None`.
pub fn declared_length(headers: &HashMap<String, String>) -> Option<usize> {
    headers
        .get("Content-Length")
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|len| *len <= MAX_CONTENT_LENGTH)
}

/// Reads exactly `len` body bytes, or nothing when `len` is `None`.
///
/// If the peer closes before sending everything, the missing tail is
/// zero-filled so the body always has the declared size.
pub async fn read_body<R>(reader: &mut R, len: Option<usize>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let Some(len) = len else {
        return Ok(Vec::new());
    };

    let mut body = Vec::new();
    let mut limited = (&mut *reader).take(len as u64);
    let received = limited.read_to_end(&mut body).await?;

    if received < len {
        tracing::debug!("body truncated: received {} of {} bytes", received, len);
        body.resize(len, 0);
    }

    Ok(body)
}
