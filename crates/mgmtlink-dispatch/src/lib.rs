//! Request/response dispatch for the management control protocol.
//!
//! Ties a named operation to its schema, marshals and frames outgoing
//! messages, and decodes incoming ones. Two send shapes are supported:
//!
//! - an abstracted [`MessageSender`] capability, which receives the length
//!   header and payload as one buffer in a single call, and
//! - a raw framed stream ([`FrameWriter`]), where the frame layer owns the
//!   length prefix.
//!
//! Calls are synchronous; one channel carries one outstanding request at a
//! time, paired with its response by the caller.

pub mod dispatch;
pub mod error;
pub mod sender;

pub use dispatch::{
    extract_op_code, recv_message, recv_request, recv_response, send_request,
    send_request_stream, send_response,
};
pub use error::{DispatchError, Result};
pub use sender::{MessageSender, WriteSender};
