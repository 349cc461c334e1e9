use crate::error::{MarshalError, Result};
use crate::field::{FieldType, FieldValue, INT_WIDTH, LEN_PREFIX_WIDTH};

/// Compute the exact encoded byte length of `values` under `schema`.
///
/// Fails if the value list does not match the schema in count or type, or
/// if a string/data payload cannot be represented on the wire. A
/// successful `measure` guarantees that [`encode`] with the same inputs
/// writes exactly this many bytes.
pub fn measure(schema: &[FieldType], values: &[FieldValue]) -> Result<usize> {
    check_pairing(schema, values)?;

    let mut len = 0usize;
    for value in values {
        len += match value {
            FieldValue::Int(_) => INT_WIDTH,
            FieldValue::Str(s) => LEN_PREFIX_WIDTH + s.len() + 1,
            FieldValue::Data(d) => LEN_PREFIX_WIDTH + d.len(),
        };
    }
    Ok(len)
}

/// Encode `values` under `schema` into `buf`, returning the bytes written.
///
/// Fails without writing anything on a schema/value mismatch. Fails at the
/// first field that does not fit in `buf`; a prefix of `buf` may have been
/// written by then, so callers must [`measure`] first and size the buffer
/// accordingly.
pub fn encode(schema: &[FieldType], values: &[FieldValue], buf: &mut [u8]) -> Result<usize> {
    check_pairing(schema, values)?;

    let mut offset = 0usize;
    for (index, value) in values.iter().enumerate() {
        offset += match value {
            FieldValue::Int(v) => put_int(*v, &mut buf[offset..], index)?,
            FieldValue::Str(s) => put_str(s, &mut buf[offset..], index)?,
            FieldValue::Data(d) => put_data(d, &mut buf[offset..], index)?,
        };
    }
    Ok(offset)
}

/// Measure, allocate, and encode in one step.
///
/// The returned vector's length equals [`measure`] of the same inputs.
pub fn encode_to_vec(schema: &[FieldType], values: &[FieldValue]) -> Result<Vec<u8>> {
    let len = measure(schema, values)?;
    let mut buf = vec![0u8; len];
    let written = encode(schema, values, &mut buf)?;
    debug_assert_eq!(written, len);
    Ok(buf)
}

/// Validate arity, per-slot types, and wire representability before any
/// byte is written or counted.
fn check_pairing(schema: &[FieldType], values: &[FieldValue]) -> Result<()> {
    if schema.len() != values.len() {
        return Err(MarshalError::ArityMismatch {
            expected: schema.len(),
            actual: values.len(),
        });
    }

    for (index, (expected, value)) in schema.iter().zip(values).enumerate() {
        let actual = value.field_type();
        if actual != *expected {
            return Err(MarshalError::TypeMismatch {
                index,
                expected: *expected,
                actual,
            });
        }

        match value {
            FieldValue::Str(s) => {
                if s.as_bytes().contains(&0) {
                    return Err(MarshalError::InteriorNul { index });
                }
                // Prefix counts the terminator.
                if s.len() + 1 > u32::MAX as usize {
                    return Err(MarshalError::FieldTooLong { index, len: s.len() });
                }
            }
            FieldValue::Data(d) => {
                if d.len() > u32::MAX as usize {
                    return Err(MarshalError::FieldTooLong { index, len: d.len() });
                }
            }
            FieldValue::Int(_) => {}
        }
    }

    Ok(())
}

fn put_int(v: i64, out: &mut [u8], index: usize) -> Result<usize> {
    ensure_capacity(out, INT_WIDTH, index)?;
    out[..INT_WIDTH].copy_from_slice(&v.to_le_bytes());
    Ok(INT_WIDTH)
}

fn put_str(s: &str, out: &mut [u8], index: usize) -> Result<usize> {
    let wire_len = s.len() + 1;
    ensure_capacity(out, LEN_PREFIX_WIDTH + wire_len, index)?;
    out[..LEN_PREFIX_WIDTH].copy_from_slice(&(wire_len as u32).to_le_bytes());
    out[LEN_PREFIX_WIDTH..LEN_PREFIX_WIDTH + s.len()].copy_from_slice(s.as_bytes());
    out[LEN_PREFIX_WIDTH + s.len()] = 0;
    Ok(LEN_PREFIX_WIDTH + wire_len)
}

fn put_data(d: &[u8], out: &mut [u8], index: usize) -> Result<usize> {
    ensure_capacity(out, LEN_PREFIX_WIDTH + d.len(), index)?;
    out[..LEN_PREFIX_WIDTH].copy_from_slice(&(d.len() as u32).to_le_bytes());
    out[LEN_PREFIX_WIDTH..LEN_PREFIX_WIDTH + d.len()].copy_from_slice(d);
    Ok(LEN_PREFIX_WIDTH + d.len())
}

fn ensure_capacity(out: &[u8], needed: usize, index: usize) -> Result<()> {
    if out.len() < needed {
        return Err(MarshalError::BufferExhausted {
            index,
            needed,
            available: out.len(),
        });
    }
    Ok(())
}
