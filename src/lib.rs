//! Quickserve - minimal embeddable HTTP endpoint
//!
//! Binds a port, parses one request per connection and hands it to a
//! single callback, which answers with one of a few canned 200 responses.

pub mod config;
pub mod http;
pub mod server;

pub use http::handler::Handler;
pub use http::request::{Method, Request};
pub use server::{Server, create_server};
