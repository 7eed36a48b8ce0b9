use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error};

use crate::http::body::{declared_length, read_body};
use crate::http::handler::Handler;
use crate::http::parser::{ParseError, decode_header_bytes, parse_headers};
use crate::http::request::Request;
use crate::http::scanner::read_header_block;
use crate::http::writer::{BlockingWriter, ClientStream};

/// One request/response exchange on one stream.
pub struct Connection<S> {
    stream: Option<BufReader<S>>,
    peer: Option<SocketAddr>,
    handler: Arc<dyn Handler>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Dispatching(Request),
    Closing(ClientStream),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(stream: S, peer: Option<SocketAddr>, handler: Arc<dyn Handler>) -> Self {
        Self {
            stream: Some(BufReader::new(stream)),
            peer,
            handler,
            state: ConnectionState::Reading,
        }
    }

    /// Drives the exchange to completion and closes the stream.
    ///
    /// An error means the request could not be parsed or the handler
    /// panicked. A malformed request never reaches the handler and gets no
    /// reply; a panicking handler keeps whatever it sent before the panic.
    /// Either way the stream is closed when it is dropped.
    pub async fn run(mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    let request = self.read_request().await?;
                    self.state = ConnectionState::Dispatching(request);
                }

                ConnectionState::Dispatching(mut request) => {
                    let stream = self.stream.take().context("stream already handed off")?;
                    request.attach(BlockingWriter::new(Box::new(stream)));

                    let handler = Arc::clone(&self.handler);
                    let mut request = Self::dispatch(handler, request).await?;
                    if !request.has_response() {
                        debug!("handler sent no response");
                    }

                    if let Some(writer) = request.detach() {
                        self.state = ConnectionState::Closing(writer.into_inner());
                    }
                }

                ConnectionState::Closing(mut stream) => {
                    stream.shutdown().await?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    pub async fn read_request(&mut self) -> anyhow::Result<Request> {
        let stream = self.stream.as_mut().context("stream already handed off")?;

        let raw = read_header_block(stream)
            .await
            .context("reading header block")?;
        let raw_header = decode_header_bytes(&raw);

        let headers = parse_headers(&raw_header);
        let body = read_body(stream, declared_length(&headers))
            .await
            .context("reading body")?;

        let request = Request::new(raw_header, headers, body, self.peer)
            .context("HTTP parse error")?;

        debug!(
            "{} {} ({} body bytes)",
            request.method,
            request.path,
            request.body.len()
        );
        Ok(request)
    }

    /// Runs the handler on the blocking pool and hands the request back.
    ///
    /// The pool is capped (512 threads by default, see
    /// `tokio::runtime::Builder::max_blocking_threads`); past that, handlers
    /// queue until a thread frees up.
    async fn dispatch(handler: Arc<dyn Handler>, mut request: Request) -> anyhow::Result<Request> {
        tokio::task::spawn_blocking(move || {
            handler.handle(&mut request);
            request
        })
        .await
        .map_err(|e| {
            error!("handler failed: {}", e);
            anyhow::anyhow!("handler failed: {}", e)
        })
    }
}

/// True when the peer connected and went away without sending a byte,
/// as TCP health checks do. Such connections are not worth a warning.
pub fn closed_without_request(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<ParseError>(), Some(ParseError::Empty))
}
