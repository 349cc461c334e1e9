//! Unix domain socket transport for the management control channel.
//!
//! The coordinating process binds a [`ControlSocket`] and accepts one
//! [`ControlStream`] per managed proxy or administrative client. Streams
//! are plain blocking `Read + Write` handles; framing and marshalling
//! live in the layers above.

pub mod error;
pub mod listener;
pub mod stream;

pub use error::{Result, TransportError};
pub use listener::ControlSocket;
pub use stream::ControlStream;
