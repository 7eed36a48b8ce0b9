use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::runtime::Handle;

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Appends the wire form of `resp` to `buf`.
pub fn serialize_into(resp: &Response, buf: &mut BytesMut) {
    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    // Body
    buf.put_slice(&resp.body);
}

pub fn serialize_response(resp: &Response) -> Bytes {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());
    serialize_into(resp, &mut buf);
    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self::from_bytes(serialize_response(response))
    }

    /// Wraps bytes that are already in wire form.
    pub fn from_bytes(buffer: Bytes) -> Self {
        Self { buffer, written: 0 }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}

/// The client's side of a connection, boxed so requests stay non-generic.
pub type ClientStream = Box<dyn AsyncWrite + Send + Unpin>;

/// Writes to a client from a blocking thread.
///
/// Handlers run on tokio's blocking pool; each send is driven to
/// completion on the runtime before returning, so bytes reach the socket
/// while the handler is still running.
pub struct BlockingWriter {
    handle: Handle,
    stream: ClientStream,
}

impl BlockingWriter {
    /// Captures the current runtime. Panics outside a tokio runtime.
    pub fn new(stream: ClientStream) -> Self {
        Self {
            handle: Handle::current(),
            stream,
        }
    }

    /// Writes and flushes `bytes`. Must not be called from an async task.
    pub fn send(&mut self, bytes: Bytes) -> anyhow::Result<()> {
        let mut writer = ResponseWriter::from_bytes(bytes);
        self.handle.block_on(writer.write_to_stream(&mut self.stream))
    }

    pub fn into_inner(self) -> ClientStream {
        self.stream
    }
}

impl fmt::Debug for BlockingWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingWriter").finish_non_exhaustive()
    }
}
