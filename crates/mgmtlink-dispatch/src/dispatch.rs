use std::io::{Read, Write};

use bytes::Bytes;
use tracing::{debug, trace};

use mgmtlink_frame::{FrameError, FrameReader, FrameWriter, HEADER_SIZE};
use mgmtlink_marshal::{
    decode, encode, encode_to_vec, measure, FieldType, FieldValue, MarshalError,
};
use mgmtlink_schema::{registry, Direction, OpCode};

use crate::error::{DispatchError, Result};
use crate::sender::MessageSender;

/// Marshal a request and transmit it through an abstracted sender.
///
/// The length header and payload are written into one buffer and handed
/// to the sender in a single call. The leading operation-code field is
/// supplied here, not by `args`; `args` carries the remaining fields of
/// the request schema.
pub fn send_request<S: MessageSender>(
    sender: &mut S,
    op: OpCode,
    args: &[FieldValue],
) -> Result<()> {
    let schema = registry().lookup(Direction::Request, op)?;
    let values = with_leading_op(op, args);

    let payload_len = measure(schema.fields(), &values)?;
    let mut buf = vec![0u8; HEADER_SIZE + payload_len];
    buf[..HEADER_SIZE].copy_from_slice(&frame_header(payload_len)?);
    encode(schema.fields(), &values, &mut buf[HEADER_SIZE..])?;

    debug!(?op, payload_len, "sending request");
    sender
        .send(&buf)
        .map_err(|e| DispatchError::NetWrite(FrameError::Io(e)))
}

/// Marshal a request and transmit it over a raw framed stream.
///
/// The frame layer owns the length prefix here; this flavor exists for
/// callers that hold a stream handle rather than a sender capability.
pub fn send_request_stream<T: Write>(
    writer: &mut FrameWriter<T>,
    op: OpCode,
    args: &[FieldValue],
) -> Result<()> {
    let schema = registry().lookup(Direction::Request, op)?;
    let values = with_leading_op(op, args);
    let payload = encode_to_vec(schema.fields(), &values)?;

    debug!(?op, payload_len = payload.len(), "sending request (stream)");
    writer.send(&payload).map_err(DispatchError::NetWrite)
}

/// Marshal a response and transmit it over a raw framed stream.
///
/// `values` is the complete response field list, leading status `Int`
/// included. Fails with a parameter error for no-reply operations (empty
/// response schema). A disconnect is reported once; nothing is
/// retransmitted.
pub fn send_response<T: Write>(
    writer: &mut FrameWriter<T>,
    op: OpCode,
    values: &[FieldValue],
) -> Result<()> {
    let schema = registry().lookup(Direction::Response, op)?;
    let payload = encode_to_vec(schema.fields(), values)?;

    debug!(?op, payload_len = payload.len(), "sending response");
    writer.send(&payload).map_err(DispatchError::NetWrite)
}

/// Decode a received request payload against `op`'s request schema.
///
/// Returns the full field list, leading operation-code `Int` included.
pub fn recv_request(buf: &[u8], op: OpCode) -> Result<Vec<FieldValue>> {
    recv_fields(buf, op, Direction::Request)
}

/// Decode a received response payload against `op`'s response schema.
pub fn recv_response(buf: &[u8], op: OpCode) -> Result<Vec<FieldValue>> {
    recv_fields(buf, op, Direction::Response)
}

fn recv_fields(buf: &[u8], op: OpCode, direction: Direction) -> Result<Vec<FieldValue>> {
    let schema = registry().lookup(direction, op)?;
    let (values, consumed) = decode(schema.fields(), buf)?;
    trace!(?op, ?direction, consumed, "decoded message");
    Ok(values)
}

/// Read one complete framed payload from the channel, uninterpreted.
///
/// The caller classifies it with [`extract_op_code`] and decodes it with
/// [`recv_request`] / [`recv_response`].
pub fn recv_message<T: Read>(reader: &mut FrameReader<T>) -> Result<Bytes> {
    reader.read_frame().map_err(DispatchError::NetRead)
}

/// Extract the leading operation-code field from a raw, still-encoded
/// buffer, without validating the rest of the message.
///
/// Used to select a handler before full decoding. `None` means the buffer
/// does not start with a defined operation code.
pub fn extract_op_code(buf: &[u8]) -> Option<OpCode> {
    let (values, _) = decode(&[FieldType::Int], buf).ok()?;
    match values.first() {
        Some(FieldValue::Int(code)) => OpCode::try_from(*code).ok(),
        _ => None,
    }
}

/// The frame length header for a measured payload.
///
/// Multiple fields can sum past what one field's length prefix allows, so
/// the total is checked again here rather than trusted to fit.
fn frame_header(payload_len: usize) -> Result<[u8; HEADER_SIZE]> {
    if payload_len > u32::MAX as usize {
        return Err(DispatchError::Marshal(MarshalError::MessageTooLong {
            len: payload_len,
        }));
    }
    Ok((payload_len as u32).to_le_bytes())
}

fn with_leading_op(op: OpCode, args: &[FieldValue]) -> Vec<FieldValue> {
    let mut values = Vec::with_capacity(args.len() + 1);
    values.push(FieldValue::Int(op.code()));
    values.extend_from_slice(args);
    values
}
