//! Endian-aware reads and writes of fixed-width integers and floats.
//!
//! Every wire field in MessagePack is big-endian, independent of host
//! byte order. These helpers are pure and stateless: writers append to a
//! `Vec<u8>`, readers pull from the front of a `&[u8]` and return the
//! remaining slice alongside the value.

use byteorder::{BigEndian, ByteOrder};

pub fn write_u8(out: &mut Vec<u8>, v: u8) {
    out.push(v);
}

pub fn write_u16(out: &mut Vec<u8>, v: u16) {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, v);
    out.extend_from_slice(&buf);
}

pub fn write_u32(out: &mut Vec<u8>, v: u32) {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, v);
    out.extend_from_slice(&buf);
}

pub fn write_u64(out: &mut Vec<u8>, v: u64) {
    let mut buf = [0u8; 8];
    BigEndian::write_u64(&mut buf, v);
    out.extend_from_slice(&buf);
}

pub fn write_i8(out: &mut Vec<u8>, v: i8) {
    out.push(v as u8);
}

pub fn write_i16(out: &mut Vec<u8>, v: i16) {
    write_u16(out, v as u16);
}

pub fn write_i32(out: &mut Vec<u8>, v: i32) {
    write_u32(out, v as u32);
}

pub fn write_i64(out: &mut Vec<u8>, v: i64) {
    write_u64(out, v as u64);
}

pub fn write_f32(out: &mut Vec<u8>, v: f32) {
    write_u32(out, v.to_bits());
}

pub fn write_f64(out: &mut Vec<u8>, v: f64) {
    write_u64(out, v.to_bits());
}

/// Read a big-endian `u8` at `buf[0]`. Returns `None` if `buf` is empty.
pub fn read_u8(buf: &[u8]) -> Option<u8> {
    buf.first().copied()
}

pub fn read_u16(buf: &[u8]) -> Option<u16> {
    (buf.len() >= 2).then(|| BigEndian::read_u16(buf))
}

pub fn read_u32(buf: &[u8]) -> Option<u32> {
    (buf.len() >= 4).then(|| BigEndian::read_u32(buf))
}

pub fn read_u64(buf: &[u8]) -> Option<u64> {
    (buf.len() >= 8).then(|| BigEndian::read_u64(buf))
}

pub fn read_i8(buf: &[u8]) -> Option<i8> {
    read_u8(buf).map(|v| v as i8)
}

pub fn read_i16(buf: &[u8]) -> Option<i16> {
    read_u16(buf).map(|v| v as i16)
}

pub fn read_i32(buf: &[u8]) -> Option<i32> {
    read_u32(buf).map(|v| v as i32)
}

pub fn read_i64(buf: &[u8]) -> Option<i64> {
    read_u64(buf).map(|v| v as i64)
}

pub fn read_f32(buf: &[u8]) -> Option<f32> {
    read_u32(buf).map(f32::from_bits)
}

pub fn read_f64(buf: &[u8]) -> Option<f64> {
    read_u64(buf).map(f64::from_bits)
}
