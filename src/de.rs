//! Deserialization: MessagePack bytes to `Object`.
//!
//! The cursor is caller-owned: `deserialize` reads exactly one value
//! starting at `*cursor` and leaves `*cursor` just past it. Calling it
//! again with the same buffer and the advanced cursor decodes the next
//! value in a concatenated sequence, with no copying or buffer splitting.

use crate::bytes;
use crate::depth::DepthGuard;
use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::value::{Extension, Map, Object};

/// Decodes one value from `buf` starting at `*cursor`, advancing `*cursor`
/// past it.
///
/// On failure, `*cursor` is left at the most recently successfully-advanced
/// position (past the format byte and any length prefix that was itself
/// validly read).
pub fn deserialize(buf: &[u8], cursor: &mut usize) -> Result<Object> {
    if buf.is_empty() {
        return Err(Error::NoData);
    }
    if *cursor >= buf.len() {
        return Err(Error::InvalidIndex);
    }
    let mut depth = 0;
    read_value(buf, cursor, &mut depth)
}

fn take<'a>(buf: &'a [u8], cursor: &mut usize, n: usize) -> Result<&'a [u8]> {
    let start = *cursor;
    let end = start.checked_add(n).ok_or(Error::Incomplete)?;
    if end > buf.len() {
        return Err(Error::Incomplete);
    }
    *cursor = end;
    Ok(&buf[start..end])
}

fn read_value(buf: &[u8], cursor: &mut usize, depth: &mut usize) -> Result<Object> {
    let marker_byte = *buf.get(*cursor).ok_or(Error::Incomplete)?;
    *cursor += 1;
    match Marker::from_u8(marker_byte) {
        Marker::Nil => Ok(Object::Nil),
        Marker::False => Ok(Object::Bool(false)),
        Marker::True => Ok(Object::Bool(true)),
        Marker::Reserved => Err(Error::InvalidFormatType),

        Marker::PosFixInt(v) => Ok(Object::Int(v as i64)),
        Marker::NegFixInt(v) => Ok(Object::Int(v as i64)),

        Marker::UInt8 => Ok(Object::UInt(bytes::read_u8(take(buf, cursor, 1)?).unwrap() as u64)),
        Marker::UInt16 => Ok(Object::UInt(
            bytes::read_u16(take(buf, cursor, 2)?).unwrap() as u64,
        )),
        Marker::UInt32 => Ok(Object::UInt(
            bytes::read_u32(take(buf, cursor, 4)?).unwrap() as u64,
        )),
        Marker::UInt64 => Ok(Object::UInt(bytes::read_u64(take(buf, cursor, 8)?).unwrap())),

        Marker::Int8 => Ok(Object::Int(bytes::read_i8(take(buf, cursor, 1)?).unwrap() as i64)),
        Marker::Int16 => Ok(Object::Int(
            bytes::read_i16(take(buf, cursor, 2)?).unwrap() as i64,
        )),
        Marker::Int32 => Ok(Object::Int(
            bytes::read_i32(take(buf, cursor, 4)?).unwrap() as i64,
        )),
        Marker::Int64 => Ok(Object::Int(bytes::read_i64(take(buf, cursor, 8)?).unwrap())),

        Marker::F32 => Ok(Object::F32(bytes::read_f32(take(buf, cursor, 4)?).unwrap())),
        Marker::F64 => Ok(Object::F64(bytes::read_f64(take(buf, cursor, 8)?).unwrap())),

        Marker::FixStr(len) => read_str(buf, cursor, len as usize),
        Marker::Str8 => {
            let len = bytes::read_u8(take(buf, cursor, 1)?).unwrap() as usize;
            read_str(buf, cursor, len)
        }
        Marker::Str16 => {
            let len = bytes::read_u16(take(buf, cursor, 2)?).unwrap() as usize;
            read_str(buf, cursor, len)
        }
        Marker::Str32 => {
            let len = bytes::read_u32(take(buf, cursor, 4)?).unwrap() as usize;
            read_str(buf, cursor, len)
        }

        Marker::Bin8 => {
            let len = bytes::read_u8(take(buf, cursor, 1)?).unwrap() as usize;
            Ok(Object::Bin(take(buf, cursor, len)?.to_vec()))
        }
        Marker::Bin16 => {
            let len = bytes::read_u16(take(buf, cursor, 2)?).unwrap() as usize;
            Ok(Object::Bin(take(buf, cursor, len)?.to_vec()))
        }
        Marker::Bin32 => {
            let len = bytes::read_u32(take(buf, cursor, 4)?).unwrap() as usize;
            Ok(Object::Bin(take(buf, cursor, len)?.to_vec()))
        }

        Marker::FixArray(len) => read_array(buf, cursor, depth, len as usize),
        Marker::Array16 => {
            let len = bytes::read_u16(take(buf, cursor, 2)?).unwrap() as usize;
            read_array(buf, cursor, depth, len)
        }
        Marker::Array32 => {
            let len = bytes::read_u32(take(buf, cursor, 4)?).unwrap() as usize;
            read_array(buf, cursor, depth, len)
        }

        Marker::FixMap(len) => read_map(buf, cursor, depth, len as usize),
        Marker::Map16 => {
            let len = bytes::read_u16(take(buf, cursor, 2)?).unwrap() as usize;
            read_map(buf, cursor, depth, len)
        }
        Marker::Map32 => {
            let len = bytes::read_u32(take(buf, cursor, 4)?).unwrap() as usize;
            read_map(buf, cursor, depth, len)
        }

        Marker::FixExt1 => read_ext(buf, cursor, 1),
        Marker::FixExt2 => read_ext(buf, cursor, 2),
        Marker::FixExt4 => read_ext(buf, cursor, 4),
        Marker::FixExt8 => read_ext(buf, cursor, 8),
        Marker::FixExt16 => read_ext(buf, cursor, 16),
        Marker::Ext8 => {
            let len = bytes::read_u8(take(buf, cursor, 1)?).unwrap() as usize;
            read_ext(buf, cursor, len)
        }
        Marker::Ext16 => {
            let len = bytes::read_u16(take(buf, cursor, 2)?).unwrap() as usize;
            read_ext(buf, cursor, len)
        }
        Marker::Ext32 => {
            let len = bytes::read_u32(take(buf, cursor, 4)?).unwrap() as usize;
            read_ext(buf, cursor, len)
        }
    }
}

fn read_str(buf: &[u8], cursor: &mut usize, len: usize) -> Result<Object> {
    let raw = take(buf, cursor, len)?;
    let s = std::str::from_utf8(raw).map_err(|_| Error::InvalidUtf8)?;
    Ok(Object::Str(s.to_owned()))
}

fn read_array(buf: &[u8], cursor: &mut usize, depth: &mut usize, len: usize) -> Result<Object> {
    let _guard = DepthGuard::enter(depth)?;
    let mut items = Vec::with_capacity(len.min(1024));
    for _ in 0..len {
        items.push(read_value(buf, cursor, depth)?);
    }
    Ok(Object::Array(items))
}

fn read_map(buf: &[u8], cursor: &mut usize, depth: &mut usize, len: usize) -> Result<Object> {
    let _guard = DepthGuard::enter(depth)?;
    let mut map = Map::new();
    for _ in 0..len {
        let key = read_value(buf, cursor, depth)?;
        let value = read_value(buf, cursor, depth)?;
        map.set(key, value)?;
    }
    Ok(Object::Map(map))
}

fn read_ext(buf: &[u8], cursor: &mut usize, len: usize) -> Result<Object> {
    let type_id = bytes::read_i8(take(buf, cursor, 1)?).unwrap();
    let data = take(buf, cursor, len)?.to_vec();
    Ok(Object::Ext(Extension::new(type_id, data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::serialize;

    fn de(buf: &[u8]) -> Object {
        let mut cursor = 0;
        deserialize(buf, &mut cursor).unwrap()
    }

    #[test]
    fn empty_buffer_is_no_data() {
        let mut cursor = 0;
        assert_eq!(deserialize(&[], &mut cursor), Err(Error::NoData));
    }

    #[test]
    fn cursor_past_end_is_invalid_index() {
        let mut cursor = 5;
        assert_eq!(deserialize(&[0xc0], &mut cursor), Err(Error::InvalidIndex));
    }

    #[test]
    fn reserved_byte_is_invalid_format_type() {
        let mut cursor = 0;
        assert_eq!(
            deserialize(&[0xc1], &mut cursor),
            Err(Error::InvalidFormatType)
        );
    }

    #[test]
    fn invalid_utf8_str_payload_is_reported_not_rewritten() {
        // fixstr of length 1 containing a lone continuation byte: never valid UTF-8.
        let mut cursor = 0;
        assert_eq!(
            deserialize(&[0xa1, 0x80], &mut cursor),
            Err(Error::InvalidUtf8)
        );
    }

    #[test]
    fn truncated_payload_is_incomplete() {
        let mut cursor = 0;
        // uint32 header but only two payload bytes.
        assert_eq!(
            deserialize(&[0xce, 0x00, 0x00], &mut cursor),
            Err(Error::Incomplete)
        );
    }

    #[test]
    fn fixint_decodes_to_int_not_uint() {
        assert_eq!(de(&[0x05]), Object::Int(5));
        assert_eq!(de(&[0xff]), Object::Int(-1));
    }

    #[test]
    fn round_trips_nested_structures() {
        let mut map = Map::new();
        map.set(Object::Str("k".into()), Object::Array(vec![Object::Int(1), Object::Nil]))
            .unwrap();
        let obj = Object::Map(map);

        let mut out = Vec::new();
        serialize(&obj, &mut out).unwrap();
        assert_eq!(de(&out), obj);
    }

    #[test]
    fn multi_message_buffer_decodes_in_sequence() {
        let mut out = Vec::new();
        serialize(&Object::Int(1), &mut out).unwrap();
        serialize(&Object::Int(2), &mut out).unwrap();
        serialize(&Object::Int(3), &mut out).unwrap();

        let mut cursor = 0;
        let mut got = Vec::new();
        while cursor < out.len() {
            got.push(deserialize(&out, &mut cursor).unwrap());
        }
        assert_eq!(
            got,
            vec![Object::Int(1), Object::Int(2), Object::Int(3)]
        );
        assert_eq!(cursor, out.len());
    }

    #[test]
    fn deeply_nested_array_hits_depth_limit() {
        let mut out = vec![0x91u8; crate::depth::MAX_DEPTH + 1];
        out.push(0xc0);
        let mut cursor = 0;
        assert_eq!(
            deserialize(&out, &mut cursor),
            Err(Error::DepthLimitExceeded)
        );
    }
}
