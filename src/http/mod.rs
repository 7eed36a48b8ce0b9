//! HTTP request intake and canned responses.
//!
//! Exactly one request is read per connection and exactly one handler call
//! is made for it. There is no keep-alive, no chunked encoding and no
//! routing.
//!
//! # Architecture
//!
//! - **`scanner`**: Finds the CRLFCRLF that ends the header block, byte by byte
//! - **`parser`**: Splits the header block into request line and header map
//! - **`body`**: Reads a `Content-Length` body
//! - **`params`**: Query string and form body key/value decoding
//! - **`request`**: The request handed to the handler, with its `send_*` methods
//! - **`response`**: The four response shapes the server can produce
//! - **`writer`**: Serializes responses and writes them to the client from the handler thread
//! - **`handler`**: The callback trait
//! - **`connection`**: Drives one exchange from first byte to close
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Scan header block, read body
//!        └──────┬──────┘
//!               │ Request parsed (malformed → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Handler runs, sends write to the client
//!        └──────┬───────────┘
//!               │ Handler returned (panicked → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │    Closing       │ ← Shut down the write side
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use quickserve::{Request, create_server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = create_server(8080, |req: &mut Request| {
//!         let name = req
//!             .query_params()
//!             .remove("name")
//!             .flatten()
//!             .unwrap_or_default();
//!         let _ = req.send_text(&format!("{{\"hello\":\"{}\"}}", name));
//!     })
//!     .await?;
//!
//!     server.wait().await
//! }
//! ```

pub mod body;
pub mod connection;
pub mod handler;
pub mod params;
pub mod parser;
pub mod request;
pub mod response;
pub mod scanner;
pub mod writer;
