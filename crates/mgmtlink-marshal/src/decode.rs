use bytes::Bytes;

use crate::error::{MarshalError, Result};
use crate::field::{FieldType, FieldValue, INT_WIDTH, LEN_PREFIX_WIDTH};

/// Decode one message from `buf` in `schema` order.
///
/// Returns the decoded values and the number of bytes consumed. Decoding
/// stops at the first violation (short buffer, malformed length prefix,
/// missing terminator, invalid text) and returns an error; nothing decoded
/// so far is surfaced, so callers never act on a partially validated
/// message. Never reads past `buf`.
pub fn decode(schema: &[FieldType], buf: &[u8]) -> Result<(Vec<FieldValue>, usize)> {
    let mut values = Vec::with_capacity(schema.len());
    let mut offset = 0usize;

    for (index, field) in schema.iter().enumerate() {
        let rest = &buf[offset..];
        let (value, consumed) = match field {
            FieldType::Int => get_int(rest, index)?,
            FieldType::Str => get_str(rest, index)?,
            FieldType::Data => get_data(rest, index)?,
        };
        values.push(value);
        offset += consumed;
    }

    Ok((values, offset))
}

fn get_int(buf: &[u8], index: usize) -> Result<(FieldValue, usize)> {
    let bytes = take(buf, INT_WIDTH, index)?;
    let v = i64::from_le_bytes(bytes.try_into().expect("fixed-width slice"));
    Ok((FieldValue::Int(v), INT_WIDTH))
}

fn get_str(buf: &[u8], index: usize) -> Result<(FieldValue, usize)> {
    let len = get_len_prefix(buf, index)?;
    if len == 0 {
        return Err(MarshalError::ZeroStringLength { index });
    }

    let bytes = take(&buf[LEN_PREFIX_WIDTH..], len, index)?;
    if bytes[len - 1] != 0 {
        return Err(MarshalError::MissingTerminator { index });
    }

    let text = std::str::from_utf8(&bytes[..len - 1])
        .map_err(|_| MarshalError::InvalidUtf8 { index })?;
    Ok((FieldValue::Str(text.to_string()), LEN_PREFIX_WIDTH + len))
}

fn get_data(buf: &[u8], index: usize) -> Result<(FieldValue, usize)> {
    let len = get_len_prefix(buf, index)?;
    let bytes = take(&buf[LEN_PREFIX_WIDTH..], len, index)?;
    Ok((
        FieldValue::Data(Bytes::copy_from_slice(bytes)),
        LEN_PREFIX_WIDTH + len,
    ))
}

fn get_len_prefix(buf: &[u8], index: usize) -> Result<usize> {
    let bytes = take(buf, LEN_PREFIX_WIDTH, index)?;
    Ok(u32::from_le_bytes(bytes.try_into().expect("fixed-width slice")) as usize)
}

fn take(buf: &[u8], needed: usize, index: usize) -> Result<&[u8]> {
    if buf.len() < needed {
        return Err(MarshalError::Truncated {
            index,
            needed,
            available: buf.len(),
        });
    }
    Ok(&buf[..needed])
}
