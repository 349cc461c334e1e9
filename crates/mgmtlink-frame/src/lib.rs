//! Length-prefixed message framing for the management control channel.
//!
//! Every marshalled message travels as `[total_length:u32le][payload]`.
//! The reader hands back complete payloads only; a stream that ends inside
//! a frame is a connection error, never a short unflagged payload.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
