//! Interpretation of raw primitive values as numbers or text.
//!
//! Only the representations needed to build and inspect
//! attribute trees are covered here.

use crate::header::VR;
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Copy the given bytes, reversing the order of each `unit`-sized chunk.
///
/// A `unit` of 0 or 1 yields an identical copy.
/// Trailing bytes which do not fill a whole unit are copied as is.
pub fn swap_bytes(bytes: &[u8], unit: usize) -> Vec<u8> {
    let mut out = bytes.to_vec();
    if unit > 1 {
        for chunk in out.chunks_exact_mut(unit) {
            chunk.reverse();
        }
    }
    out
}

/// Interpret a value as a list of integers.
///
/// Binary integer representations are decoded in the given byte order,
/// `IS` and `DS` values are parsed as text.
/// Returns `None` if the representation is not numeric
/// or a component cannot be parsed.
#[allow(trivial_numeric_casts)]
pub fn read_ints(vr: VR, bytes: &[u8], big_endian: bool) -> Option<Vec<i64>> {
    macro_rules! binary {
        ($size: expr, $read: ident) => {
            Some(
                bytes
                    .chunks_exact($size)
                    .map(|c| {
                        if big_endian {
                            BigEndian::$read(c) as i64
                        } else {
                            LittleEndian::$read(c) as i64
                        }
                    })
                    .collect(),
            )
        };
    }

    match vr {
        VR::US | VR::OW => binary!(2, read_u16),
        VR::SS => binary!(2, read_i16),
        VR::UL | VR::OL => binary!(4, read_u32),
        VR::SL => binary!(4, read_i32),
        VR::UV | VR::OV => binary!(8, read_u64),
        VR::SV => binary!(8, read_i64),
        VR::OB | VR::UN => Some(bytes.iter().map(|&b| i64::from(b)).collect()),
        VR::IS | VR::DS => read_strings(bytes)
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i64>().ok())
            .collect(),
        _ => None,
    }
}

/// Encode a list of integers in the given representation and byte order.
///
/// Returns `None` if the representation cannot hold integers.
#[allow(trivial_numeric_casts)]
pub fn write_ints(vr: VR, values: &[i64], big_endian: bool) -> Option<Vec<u8>> {
    macro_rules! binary {
        ($size: expr, $write: ident, $t: ty) => {{
            let mut out = vec![0; values.len() * $size];
            for (chunk, &v) in out.chunks_exact_mut($size).zip(values) {
                if big_endian {
                    BigEndian::$write(chunk, v as $t);
                } else {
                    LittleEndian::$write(chunk, v as $t);
                }
            }
            Some(out)
        }};
    }

    match vr {
        VR::US | VR::OW => binary!(2, write_u16, u16),
        VR::SS => binary!(2, write_i16, i16),
        VR::UL | VR::OL => binary!(4, write_u32, u32),
        VR::SL => binary!(4, write_i32, i32),
        VR::UV | VR::OV => binary!(8, write_u64, u64),
        VR::SV => binary!(8, write_i64, i64),
        VR::OB | VR::UN => Some(values.iter().map(|&v| v as u8).collect()),
        VR::IS | VR::DS => {
            let texts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            Some(write_strings(vr, &texts))
        }
        _ => None,
    }
}

/// Interpret a value as a list of floating point numbers.
pub fn read_floats(vr: VR, bytes: &[u8], big_endian: bool) -> Option<Vec<f64>> {
    match vr {
        VR::FL | VR::OF => Some(
            bytes
                .chunks_exact(4)
                .map(|c| {
                    if big_endian {
                        f64::from(BigEndian::read_f32(c))
                    } else {
                        f64::from(LittleEndian::read_f32(c))
                    }
                })
                .collect(),
        ),
        VR::FD | VR::OD => Some(
            bytes
                .chunks_exact(8)
                .map(|c| {
                    if big_endian {
                        BigEndian::read_f64(c)
                    } else {
                        LittleEndian::read_f64(c)
                    }
                })
                .collect(),
        ),
        VR::DS | VR::IS => read_strings(bytes)
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<f64>().ok())
            .collect(),
        _ => read_ints(vr, bytes, big_endian)
            .map(|v| v.into_iter().map(|i| i as f64).collect()),
    }
}

/// Encode a list of floating point numbers
/// in the given representation and byte order.
pub fn write_floats(vr: VR, values: &[f64], big_endian: bool) -> Option<Vec<u8>> {
    match vr {
        VR::FL | VR::OF => {
            let mut out = vec![0; values.len() * 4];
            for (chunk, &v) in out.chunks_exact_mut(4).zip(values) {
                if big_endian {
                    BigEndian::write_f32(chunk, v as f32);
                } else {
                    LittleEndian::write_f32(chunk, v as f32);
                }
            }
            Some(out)
        }
        VR::FD | VR::OD => {
            let mut out = vec![0; values.len() * 8];
            for (chunk, &v) in out.chunks_exact_mut(8).zip(values) {
                if big_endian {
                    BigEndian::write_f64(chunk, v);
                } else {
                    LittleEndian::write_f64(chunk, v);
                }
            }
            Some(out)
        }
        VR::DS => {
            let texts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            Some(write_strings(vr, &texts))
        }
        _ => None,
    }
}

/// Split a textual value into its components,
/// removing trailing padding (spaces and NUL characters)
/// and leading spaces from each one.
///
/// Bytes which are not valid UTF-8 are replaced.
pub fn read_strings(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_end_matches(|c| c == ' ' || c == '\0');
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\\')
        .map(|s| s.trim_start_matches(' ').trim_end_matches(' ').to_string())
        .collect()
}

/// Join textual components with backslashes
/// and pad the result to an even length with the representation's padding byte.
pub fn write_strings<S: AsRef<str>>(vr: VR, values: &[S]) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(b'\\');
        }
        out.extend_from_slice(v.as_ref().as_bytes());
    }
    if out.len() % 2 == 1 {
        out.push(vr.padding());
    }
    out
}
