use tokio::io::{AsyncRead, AsyncReadExt};

const TERMINATOR: &[u8; 4] = b"\r\n\r\n";

/// Incremental detector for the end of an HTTP header block.
///
/// Bytes are pushed one at a time and kept in an internal buffer, the
/// terminating CRLFCRLF included. Because the state is carried between
/// pushes, it makes no difference how the bytes were split across reads.
#[derive(Debug, Default)]
pub struct HeaderScanner {
    buffer: Vec<u8>,
    matched: usize,
}

impl HeaderScanner {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(1024),
            matched: 0,
        }
    }

    /// Appends one byte and returns `true` once the terminator is complete.
    pub fn push(&mut self, byte: u8) -> bool {
        self.buffer.push(byte);

        self.matched = if self.matched < TERMINATOR.len() && byte == TERMINATOR[self.matched] {
            self.matched + 1
        } else if byte == b'\r' {
            // A stray CR restarts the match, e.g. "\r\n\r\r\n\r\n".
            1
        } else {
            0
        };

        self.matched == TERMINATOR.len()
    }

    /// Pushes a whole chunk, stopping at the terminator.
    ///
    /// Returns how many bytes of `chunk` were consumed when the terminator
    /// was found, `None` if more input is needed.
    pub fn feed(&mut self, chunk: &[u8]) -> Option<usize> {
        for (i, &byte) in chunk.iter().enumerate() {
            if self.push(byte) {
                return Some(i + 1);
            }
        }
        None
    }

    pub fn is_complete(&self) -> bool {
        self.matched == TERMINATOR.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

/// Reads the header block from `reader` one byte at a time.
///
/// The returned bytes end with CRLFCRLF unless the stream ended first, in
/// which case whatever arrived is returned as-is. Nothing past the
/// terminator is consumed, so the body can be read from the same reader.
pub async fn read_header_block<R>(reader: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut scanner = HeaderScanner::new();

    loop {
        let byte = match reader.read_u8().await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };

        if scanner.push(byte) {
            break;
        }
    }

    Ok(scanner.into_bytes())
}
