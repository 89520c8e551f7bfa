//! A MessagePack codec built around a tagged-union [`Object`].
//!
//! [`serialize`] turns an `Object` into bytes, always choosing the
//! smallest legal wire format. [`deserialize`] reads one `Object` from a
//! byte slice at a caller-owned cursor, so a buffer holding several
//! concatenated messages can be decoded by calling it in a loop:
//!
//! ```
//! use msgpack_core::{deserialize, serialize, Object};
//!
//! let mut buf = Vec::new();
//! serialize(&Object::from(1i64), &mut buf).unwrap();
//! serialize(&Object::from("hi"), &mut buf).unwrap();
//!
//! let mut cursor = 0;
//! let first = deserialize(&buf, &mut cursor).unwrap();
//! let second = deserialize(&buf, &mut cursor).unwrap();
//! assert_eq!(first, Object::Int(1));
//! assert_eq!(second, Object::Str("hi".into()));
//! assert_eq!(cursor, buf.len());
//! ```
//!
//! `Int` and `UInt` are kept distinct even at equal numeric values, as are
//! `F32` and `F64`: the codec never collapses MessagePack's format
//! families into a smaller Rust type than the wire actually specifies.

mod bytes;
pub mod depth;
mod de;
pub mod error;
pub mod fmt;
mod marker;
mod ser;
pub mod timestamp;
mod value;

pub use de::deserialize;
pub use error::{Error, Result};
pub use fmt::to_debug_string;
pub use ser::serialize;
pub use timestamp::{from_timestamp, is_timestamp, to_timestamp};
pub use value::{Extension, Map, MapKey, Object};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_round_trips_a_mixed_document() {
        let mut map = Map::new();
        map.set(Object::Str("name".into()), Object::from("crate"))
            .unwrap();
        map.set(
            Object::Str("tags".into()),
            Object::Array(vec![Object::from(1u8), Object::from(2u8)]),
        )
        .unwrap();
        map.set(Object::Str("ts".into()), from_timestamp(1_700_000_000, 0))
            .unwrap();
        let doc = Object::Map(map);

        let mut buf = Vec::new();
        serialize(&doc, &mut buf).unwrap();

        let mut cursor = 0;
        let decoded = deserialize(&buf, &mut cursor).unwrap();
        assert_eq!(decoded, doc);
        assert_eq!(cursor, buf.len());

        let debug = to_debug_string(&decoded);
        assert!(debug.contains("\"type\": \"map\""));
    }
}
