//! TCP acceptor: binds the port and spawns one connection task per client.

pub mod listener;

pub use listener::{Server, create_server};
