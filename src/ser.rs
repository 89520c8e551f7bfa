//! Serialization: `Object` to MessagePack bytes.
//!
//! Every encoder picks the smallest legal format for the value at hand:
//! a `UInt(3)` is one byte (a positive fixint), a `UInt(300)` is three
//! (`uint16` plus payload), and so on. Compound values recurse directly,
//! each level guarded by [`crate::depth::DepthGuard`].

use crate::bytes;
use crate::depth::DepthGuard;
use crate::error::{Error, Result};
use crate::marker::Marker;
use crate::value::{Extension, Map, MapKey, Object};

/// Appends the MessagePack encoding of `obj` to `out`. Never truncates or
/// clears `out` first; on error, bytes already appended for a partially
/// serialized compound value are left in place.
pub fn serialize(obj: &Object, out: &mut Vec<u8>) -> Result<()> {
    let mut depth = 0;
    serialize_inner(obj, out, &mut depth)
}

fn serialize_inner(obj: &Object, out: &mut Vec<u8>, depth: &mut usize) -> Result<()> {
    match obj {
        Object::Nil => out.push(Marker::Nil.into_u8()),
        Object::Bool(false) => out.push(Marker::False.into_u8()),
        Object::Bool(true) => out.push(Marker::True.into_u8()),
        Object::Int(v) => serialize_int(*v, out),
        Object::UInt(v) => serialize_uint(*v, out),
        Object::F32(v) => {
            out.push(Marker::F32.into_u8());
            bytes::write_f32(out, *v);
        }
        Object::F64(v) => {
            out.push(Marker::F64.into_u8());
            bytes::write_f64(out, *v);
        }
        Object::Str(s) => serialize_str(s, out)?,
        Object::Bin(b) => serialize_bin(b, out)?,
        Object::Array(items) => {
            let _guard = DepthGuard::enter(depth)?;
            serialize_array_header(items.len(), out)?;
            for item in items {
                serialize_inner(item, out, depth)?;
            }
        }
        Object::Map(map) => {
            let _guard = DepthGuard::enter(depth)?;
            serialize_map_header(map.len(), out)?;
            for (key, value) in map.iter() {
                serialize_inner(&map_key_to_object(key), out, depth)?;
                serialize_inner(value, out, depth)?;
            }
        }
        Object::Ext(ext) => serialize_ext(ext, out)?,
    }
    Ok(())
}

fn map_key_to_object(key: MapKey) -> Object {
    match key {
        MapKey::Nil => Object::Nil,
        MapKey::Bool(v) => Object::Bool(v),
        MapKey::Int(v) => Object::Int(v),
        MapKey::UInt(v) => Object::UInt(v),
        MapKey::F32(v) => Object::F32(v),
        MapKey::F64(v) => Object::F64(v),
        MapKey::Str(v) => Object::Str(v),
    }
}

fn serialize_int(v: i64, out: &mut Vec<u8>) {
    if (-32..=-1).contains(&v) {
        out.push(v as i8 as u8);
    } else if (0..=127).contains(&v) {
        out.push(v as u8);
    } else if (i8::MIN as i64..=-33).contains(&v) {
        out.push(Marker::Int8.into_u8());
        bytes::write_i8(out, v as i8);
    } else if (i16::MIN as i64..=i16::MAX as i64).contains(&v) {
        out.push(Marker::Int16.into_u8());
        bytes::write_i16(out, v as i16);
    } else if (i32::MIN as i64..=i32::MAX as i64).contains(&v) {
        out.push(Marker::Int32.into_u8());
        bytes::write_i32(out, v as i32);
    } else {
        out.push(Marker::Int64.into_u8());
        bytes::write_i64(out, v);
    }
}

fn serialize_uint(v: u64, out: &mut Vec<u8>) {
    if v <= u8::MAX as u64 {
        out.push(Marker::UInt8.into_u8());
        bytes::write_u8(out, v as u8);
    } else if v <= u16::MAX as u64 {
        out.push(Marker::UInt16.into_u8());
        bytes::write_u16(out, v as u16);
    } else if v <= u32::MAX as u64 {
        out.push(Marker::UInt32.into_u8());
        bytes::write_u32(out, v as u32);
    } else {
        out.push(Marker::UInt64.into_u8());
        bytes::write_u64(out, v);
    }
}

fn serialize_str(s: &str, out: &mut Vec<u8>) -> Result<()> {
    let raw = s.as_bytes();
    let len = raw.len();
    if len <= 31 {
        out.push(Marker::FixStr(len as u8).into_u8());
    } else if len <= u8::MAX as usize {
        out.push(Marker::Str8.into_u8());
        bytes::write_u8(out, len as u8);
    } else if len <= u16::MAX as usize {
        out.push(Marker::Str16.into_u8());
        bytes::write_u16(out, len as u16);
    } else if len <= u32::MAX as usize {
        out.push(Marker::Str32.into_u8());
        bytes::write_u32(out, len as u32);
    } else {
        return Err(Error::StrTooBig);
    }
    out.extend_from_slice(raw);
    Ok(())
}

fn serialize_bin(b: &[u8], out: &mut Vec<u8>) -> Result<()> {
    let len = b.len();
    if len <= u8::MAX as usize {
        out.push(Marker::Bin8.into_u8());
        bytes::write_u8(out, len as u8);
    } else if len <= u16::MAX as usize {
        out.push(Marker::Bin16.into_u8());
        bytes::write_u16(out, len as u16);
    } else if len <= u32::MAX as usize {
        out.push(Marker::Bin32.into_u8());
        bytes::write_u32(out, len as u32);
    } else {
        return Err(Error::BinTooBig);
    }
    out.extend_from_slice(b);
    Ok(())
}

fn serialize_array_header(len: usize, out: &mut Vec<u8>) -> Result<()> {
    if len < 16 {
        out.push(Marker::FixArray(len as u8).into_u8());
    } else if len <= u16::MAX as usize {
        out.push(Marker::Array16.into_u8());
        bytes::write_u16(out, len as u16);
    } else if len <= u32::MAX as usize {
        out.push(Marker::Array32.into_u8());
        bytes::write_u32(out, len as u32);
    } else {
        return Err(Error::ArrayTooBig);
    }
    Ok(())
}

fn serialize_map_header(len: usize, out: &mut Vec<u8>) -> Result<()> {
    if len < 16 {
        out.push(Marker::FixMap(len as u8).into_u8());
    } else if len <= u16::MAX as usize {
        out.push(Marker::Map16.into_u8());
        bytes::write_u16(out, len as u16);
    } else if len <= u32::MAX as usize {
        out.push(Marker::Map32.into_u8());
        bytes::write_u32(out, len as u32);
    } else {
        return Err(Error::MapTooBig);
    }
    Ok(())
}

fn serialize_ext(ext: &Extension, out: &mut Vec<u8>) -> Result<()> {
    let len = ext.data.len();
    match len {
        1 => out.push(Marker::FixExt1.into_u8()),
        2 => out.push(Marker::FixExt2.into_u8()),
        4 => out.push(Marker::FixExt4.into_u8()),
        8 => out.push(Marker::FixExt8.into_u8()),
        16 => out.push(Marker::FixExt16.into_u8()),
        _ if len <= u8::MAX as usize => {
            out.push(Marker::Ext8.into_u8());
            bytes::write_u8(out, len as u8);
        }
        _ if len <= u16::MAX as usize => {
            out.push(Marker::Ext16.into_u8());
            bytes::write_u16(out, len as u16);
        }
        _ if len <= u32::MAX as usize => {
            out.push(Marker::Ext32.into_u8());
            bytes::write_u32(out, len as u32);
        }
        _ => return Err(Error::ExtTooBig),
    }
    bytes::write_i8(out, ext.type_id);
    out.extend_from_slice(&ext.data);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ser(obj: &Object) -> Vec<u8> {
        let mut out = Vec::new();
        serialize(obj, &mut out).unwrap();
        out
    }

    #[test]
    fn nil_and_bools() {
        assert_eq!(ser(&Object::Nil), [0xc0]);
        assert_eq!(ser(&Object::Bool(false)), [0xc2]);
        assert_eq!(ser(&Object::Bool(true)), [0xc3]);
    }

    #[test]
    fn small_ints_use_fixint() {
        assert_eq!(ser(&Object::Int(0)), [0x00]);
        assert_eq!(ser(&Object::Int(127)), [0x7f]);
        assert_eq!(ser(&Object::Int(-1)), [0xff]);
        assert_eq!(ser(&Object::Int(-32)), [0xe0]);
    }

    #[test]
    fn ints_pick_smallest_format() {
        assert_eq!(ser(&Object::Int(-33))[0], 0xd0);
        assert_eq!(ser(&Object::Int(128))[0], 0xd1);
        assert_eq!(ser(&Object::Int(i16::MAX as i64 + 1))[0], 0xd2);
        assert_eq!(ser(&Object::Int(i32::MAX as i64 + 1))[0], 0xd3);
    }

    #[test]
    fn uints_pick_smallest_format() {
        assert_eq!(ser(&Object::UInt(0))[0], 0xcc);
        assert_eq!(ser(&Object::UInt(256))[0], 0xcd);
        assert_eq!(ser(&Object::UInt(u16::MAX as u64 + 1))[0], 0xce);
        assert_eq!(ser(&Object::UInt(u32::MAX as u64 + 1))[0], 0xcf);
    }

    #[test]
    fn str_picks_fixstr_for_short_strings() {
        let bytes = ser(&Object::Str("hi".into()));
        assert_eq!(bytes[0], 0xa0 | 2);
        assert_eq!(&bytes[1..], b"hi");
    }

    #[test]
    fn bin_picks_bin8_for_short_payloads() {
        let bytes = ser(&Object::Bin(vec![1, 2, 3]));
        assert_eq!(bytes[0], 0xc4);
        assert_eq!(bytes[1], 3);
    }

    #[test]
    fn array_header_picks_fixarray() {
        let arr = Object::Array(vec![Object::Int(1), Object::Int(2)]);
        assert_eq!(ser(&arr)[0], 0x90 | 2);
    }

    #[test]
    fn map_emits_buckets_in_fixed_order() {
        let mut map = Map::new();
        map.set(Object::Str("z".into()), Object::Nil).unwrap();
        map.set(Object::Bool(true), Object::Nil).unwrap();
        let bytes = ser(&Object::Map(map));
        assert_eq!(bytes[0], 0x80 | 2);
        // Bool bucket before Str bucket: 0xc3 (true) comes before the fixstr key.
        assert_eq!(bytes[1], 0xc3);
    }

    #[test]
    fn ext_picks_fixext_sizes() {
        let ext = Extension::new(5, vec![0; 8]);
        let bytes = ser(&Object::Ext(ext));
        assert_eq!(bytes[0], 0xd7);
        assert_eq!(bytes[1] as i8, 5);
    }

    #[test]
    fn ext_uses_ext8_for_non_power_of_two_lengths() {
        let ext = Extension::new(1, vec![0; 3]);
        let bytes = ser(&Object::Ext(ext));
        assert_eq!(bytes[0], 0xc7);
        assert_eq!(bytes[1], 3);
    }

    #[test]
    fn deeply_nested_array_hits_depth_limit() {
        let mut obj = Object::Nil;
        for _ in 0..(crate::depth::MAX_DEPTH + 1) {
            obj = Object::Array(vec![obj]);
        }
        let mut out = Vec::new();
        assert_eq!(serialize(&obj, &mut out), Err(Error::DepthLimitExceeded));
    }
}
