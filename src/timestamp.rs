//! The Timestamp extension (type `-1`): a `(sec, nsec)` pair encoded into
//! one of three wire forms chosen by range, matching the canonical
//! MessagePack timestamp extension.

use crate::bytes;
use crate::value::{Extension, Object};

const NSEC_SHIFT: u32 = 34;
/// The 8-byte form packs `nsec` into the 30 bits above `NSEC_SHIFT`; any
/// `nsec` at or above this would have its high bits shifted out of the
/// 64-bit payload and silently lost, so that form is only used below this
/// bound.
const NSEC_8BYTE_MAX: u32 = 1 << 30;

/// Builds the smallest valid Timestamp extension for `(sec, nsec)`.
///
/// `nsec` is assumed to already be a valid sub-second count (the same
/// `0..1_000_000_000` precondition POSIX places on `timespec.tv_nsec`); it
/// is not range-checked here. What **is** checked is which wire form can
/// carry `nsec` without losing bits: the 8-byte form only has 30 bits of
/// room for it, so `nsec >= 1 << 30` (already out of the nominal range, but
/// still representable in 32 bits) falls through to the 12-byte form, which
/// carries a full 32-bit `nsec`, rather than silently truncating it.
pub fn from_timestamp(sec: i64, nsec: u32) -> Object {
    let data = if nsec == 0 && sec >= 0 && (sec as u64) <= u32::MAX as u64 {
        let mut d = Vec::with_capacity(4);
        bytes::write_u32(&mut d, sec as u32);
        d
    } else if sec >= 0 && (sec as u64) >> NSEC_SHIFT == 0 && nsec < NSEC_8BYTE_MAX {
        let combined = ((nsec as u64) << NSEC_SHIFT) | (sec as u64);
        let mut d = Vec::with_capacity(8);
        bytes::write_u64(&mut d, combined);
        d
    } else {
        let mut d = Vec::with_capacity(12);
        bytes::write_u32(&mut d, nsec);
        bytes::write_i64(&mut d, sec);
        d
    };
    Object::Ext(Extension::new(-1, data))
}

/// Decodes `(sec, nsec)` out of a Timestamp extension.
///
/// Returns `None` if `obj` isn't an `Ext` with type `-1`, or its payload
/// length isn't one of the three valid sizes (4, 8, 12).
pub fn to_timestamp(obj: &Object) -> Option<(i64, u32)> {
    let ext = obj.as_ext_ref()?;
    if ext.type_id != -1 {
        return None;
    }
    match ext.data.len() {
        4 => {
            let sec = bytes::read_u32(&ext.data)?;
            Some((sec as i64, 0))
        }
        8 => {
            let combined = bytes::read_u64(&ext.data)?;
            let nsec = (combined >> NSEC_SHIFT) as u32;
            let sec_mask = (1u64 << NSEC_SHIFT) - 1;
            let sec = (combined & sec_mask) as i64;
            Some((sec, nsec))
        }
        12 => {
            let nsec = bytes::read_u32(&ext.data[..4])?;
            let sec = bytes::read_i64(&ext.data[4..12])?;
            Some((sec, nsec))
        }
        _ => None,
    }
}

/// True if `obj` is a well-formed Timestamp extension (a valid `-1`-typed
/// `Ext` with a 4-, 8-, or 12-byte payload).
pub fn is_timestamp(obj: &Object) -> bool {
    to_timestamp(obj).is_some()
}
