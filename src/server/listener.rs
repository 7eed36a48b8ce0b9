use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::http::connection::{Connection, closed_without_request};
use crate::http::handler::Handler;

/// A running server.
///
/// The listener belongs to the accept loop task; this value only keeps
/// the bound address and the loop's handle. There is no shutdown path:
/// the loop lives until the runtime or process goes away.
pub struct Server {
    local_addr: SocketAddr,
    accept_loop: JoinHandle<()>,
}

impl Server {
    /// Binds `0.0.0.0:port` and starts accepting in the background.
    ///
    /// Port 0 picks a free port; see [`Server::local_addr`]. Bind errors
    /// are returned here, everything after that is handled in the loop.
    ///
    /// Connections themselves are unbounded, but handlers run on tokio's
    /// blocking pool, which the runtime caps (512 threads by default). With
    /// more handlers in flight than that, the rest wait for a free thread.
    pub async fn bind<H: Handler>(port: u16, handler: H) -> anyhow::Result<Self> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("binding {}", addr))?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {}", local_addr);

        let handler: Arc<dyn Handler> = Arc::new(handler);
        let accept_loop = tokio::spawn(accept_loop(listener, handler));

        Ok(Self {
            local_addr,
            accept_loop,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Waits on the accept loop, which only ends if its task is torn down.
    pub async fn wait(self) -> anyhow::Result<()> {
        self.accept_loop.await.context("accept loop stopped")
    }
}

/// Starts a server on `port` that passes every request to `handler`.
pub async fn create_server<H: Handler>(port: u16, handler: H) -> anyhow::Result<Server> {
    Server::bind(port, handler).await
}

/// Accepts forever. Each connection gets its own unsupervised task and
/// there is no cap on how many run at once.
pub async fn accept_loop(listener: TcpListener, handler: Arc<dyn Handler>) {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("accept failed: {}", e);
                continue;
            }
        };
        debug!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let conn = Connection::new(socket, Some(peer), handler);
            match conn.run().await {
                Ok(()) => {}
                Err(e) if closed_without_request(&e) => {
                    debug!("{} closed without sending a request", peer);
                }
                Err(e) => {
                    warn!("Connection error from {}: {:#}", peer, e);
                }
            }
        });
    }
}
