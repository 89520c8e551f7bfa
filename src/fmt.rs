//! A diagnostic, JSON-like rendering of an [`Object`]. Not contractual and
//! not meant to interoperate with any other implementation's debug output —
//! it exists for test assertions and human-readable inspection.

use crate::value::Object;
use std::fmt::Write as _;

/// Renders `obj` as `{"type": "...", "value": ...}`, recursing into
/// `Array`/`Map`/`Ext`.
pub fn to_debug_string(obj: &Object) -> String {
    let mut out = String::new();
    write_object(&mut out, obj);
    out
}

fn write_object(out: &mut String, obj: &Object) {
    match obj {
        Object::Nil => out.push_str(r#"{"type": "nil", "value": null}"#),
        Object::Bool(v) => {
            let _ = write!(out, r#"{{"type": "bool", "value": {v}}}"#);
        }
        Object::Int(v) => {
            let _ = write!(out, r#"{{"type": "int", "value": {v}}}"#);
        }
        Object::UInt(v) => {
            let _ = write!(out, r#"{{"type": "uint", "value": {v}}}"#);
        }
        Object::F32(v) => {
            let _ = write!(out, r#"{{"type": "f32", "value": {v}}}"#);
        }
        Object::F64(v) => {
            let _ = write!(out, r#"{{"type": "f64", "value": {v}}}"#);
        }
        Object::Str(v) => {
            let _ = write!(out, r#"{{"type": "str", "value": {}}}"#, quote(v));
        }
        Object::Bin(v) => {
            let _ = write!(out, r#"{{"type": "bin", "value": {}}}"#, hex(v));
        }
        Object::Array(items) => {
            out.push_str(r#"{"type": "array", "value": ["#);
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_object(out, item);
            }
            out.push_str("]}");
        }
        Object::Map(map) => {
            out.push_str(r#"{"type": "map", "value": ["#);
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push('[');
                write_object(out, &key_to_object(key));
                out.push_str(", ");
                write_object(out, value);
                out.push(']');
            }
            out.push_str("]}");
        }
        Object::Ext(ext) => {
            let _ = write!(
                out,
                r#"{{"type": "ext", "value": {{"type_id": {}, "data": {}}}}}"#,
                ext.type_id,
                hex(&ext.data)
            );
        }
    }
}

fn key_to_object(key: crate::value::MapKey) -> Object {
    use crate::value::MapKey;
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

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2 + 2);
    out.push('"');
    for byte in data {
        let _ = write!(out, "{byte:02x}");
    }
    out.push('"');
    out
}
