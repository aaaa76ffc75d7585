//! Typed values and the parsers that produce them from literals.
//!
//! Integer and floating point literals follow the rules of the C library functions
//!     `strtol`, `strtoul` and `strtod`:
//!     leading whitespace and a sign are accepted,
//!     the radix of an integer is detected from its prefix (`0x` for hexadecimal,
//!     a leading `0` for octal),
//!     and the longest valid prefix of the token is used.
//! Unlike the C functions, a token that doesn't begin with a number is an error.
//!
//! Any integer token that contains `0x` is parsed with the unsigned rule.
//! For scalars and vectors this is decided once for the whole literal,
//!     so `0x0A, -3` parsed as an [`IVec4`] gives the unsigned components `0xA` and `0xFFFFFFFD`.
//! For arrays it is decided per element.

use crate::enums;
use crate::error::ErrorKind;
use crate::lexical::tokens;

/// IEEE 754 half precision float, stored as its raw bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct F16(pub u16);

impl F16 {
    /// Converts a single precision float, rounding to nearest with ties to even.
    pub fn from_f32(value: f32) -> F16 {
        let bits = value.to_bits();
        let sign = ((bits >> 16) & 0x8000) as u16;
        let exponent = ((bits >> 23) & 0xff) as i32;
        let mantissa = bits & 0x7f_ffff;
        if exponent == 0xff {
            let nan = if mantissa != 0 { 0x0200 } else { 0 };
            return F16(sign | 0x7c00 | nan);
        }
        let e = exponent - 127 + 15;
        if e >= 0x1f {
            return F16(sign | 0x7c00);
        }
        if e <= 0 {
            if e < -10 {
                return F16(sign);
            }
            let m = mantissa | 0x80_0000;
            let shift = (14 - e) as u32;
            return F16(sign | round_shifted(m, shift) as u16);
        }
        // A carry out of the mantissa bumps the exponent, possibly up to infinity.
        let half = ((e as u32) << 10) | (mantissa >> 13);
        let rest = mantissa & 0x1fff;
        let rounded = if rest > 0x1000 || (rest == 0x1000 && half & 1 == 1) {
            half + 1
        } else {
            half
        };
        F16(sign | rounded as u16)
    }

    pub fn to_f32(self) -> f32 {
        let sign = ((self.0 & 0x8000) as u32) << 16;
        let exponent = ((self.0 >> 10) & 0x1f) as u32;
        let mantissa = (self.0 & 0x3ff) as u32;
        let bits = match (exponent, mantissa) {
            (0, 0) => sign,
            (0, _) => {
                let mut e = 127 - 15 + 1;
                let mut m = mantissa;
                while m & 0x400 == 0 {
                    m <<= 1;
                    e -= 1;
                }
                sign | (e << 23) | ((m & 0x3ff) << 13)
            }
            (0x1f, _) => sign | 0x7f80_0000 | (mantissa << 13),
            _ => sign | ((exponent + 127 - 15) << 23) | (mantissa << 13),
        };
        f32::from_bits(bits)
    }
}

fn round_shifted(m: u32, shift: u32) -> u32 {
    let half = m >> shift;
    let rest = m & ((1 << shift) - 1);
    let halfway = 1 << (shift - 1);
    if rest > halfway || (rest == halfway && half & 1 == 1) {
        half + 1
    } else {
        half
    }
}

impl std::fmt::Display for F16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

macro_rules! vector_type {
    ( $( $(#[$meta: meta])* ($name: ident, $elem: ty, $n: expr), )+ ) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, Default, PartialEq)]
            #[cfg_attr(feature = "serde", derive(serde::Serialize))]
            pub struct $name {
                pub data: [$elem; $n],
                /// Number of components that were provided.
                pub len: usize,
                /// Whether the literal was written in hexadecimal.
                pub is_hex: bool,
            }

            impl $name {
                pub const CAPACITY: usize = $n;

                /// Components that were provided.
                pub fn components(&self) -> &[$elem] {
                    &self.data[..self.len]
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    for (i, c) in self.components().iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write_component(f, c, self.is_hex)?;
                    }
                    Ok(())
                }
            }
        )+
    };
}

vector_type!(
    /// Vector of up to 4 32-bit integers.
    ///
    /// Components written in hexadecimal hold the bits of an unsigned value.
    (IVec4, i32, 4),
    /// Vector of up to 2 64-bit integers.
    (I64Vec2, i64, 2),
    (FVec4, f32, 4),
    (F16Vec4, F16, 4),
    (DVec2, f64, 2),
    /// Descriptor binding: set, binding and array index.
    ///
    /// The first component may be `vb` or `ib` to refer to the vertex or index buffers.
    (Binding, u32, 3),
);

impl Binding {
    /// Value of the `vb` token.
    pub const VERTEX_BUFFER_SET_ID: u32 = 0xFFFF_FFFE;
    /// Value of the `ib` token.
    pub const INDEX_BUFFER_SET_ID: u32 = 0xFFFF_FFFD;
}

trait Component {
    fn write(&self, f: &mut std::fmt::Formatter<'_>, is_hex: bool) -> std::fmt::Result;
}

macro_rules! integer_component {
    ( $( $t: ty ),+ ) => {
        $(
            impl Component for $t {
                fn write(&self, f: &mut std::fmt::Formatter<'_>, is_hex: bool) -> std::fmt::Result {
                    if is_hex {
                        write!(f, "{:#x}", self)
                    } else {
                        write!(f, "{}", self)
                    }
                }
            }
        )+
    };
}

integer_component!(i32, i64, u32);

macro_rules! float_component {
    ( $( $t: ty ),+ ) => {
        $(
            impl Component for $t {
                fn write(&self, f: &mut std::fmt::Formatter<'_>, _: bool) -> std::fmt::Result {
                    write!(f, "{}", self)
                }
            }
        )+
    };
}

float_component!(f32, f64, F16);

fn write_component<T: Component>(
    f: &mut std::fmt::Formatter<'_>,
    c: &T,
    is_hex: bool,
) -> std::fmt::Result {
    c.write(f, is_hex)
}

/// Type of a scalar, vector or string member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueType {
    Int,
    Uint,
    Float,
    Float16,
    Double,
    Bool,
    IVec4,
    I64Vec2,
    FVec4,
    F16Vec4,
    DVec2,
    Binding,
    Enum,
    String,
}

/// A parsed value.
///
/// The variants correspond one-to-one with the variants of [`ValueType`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Uint(u32),
    Float(f32),
    Float16(F16),
    Double(f64),
    Bool(bool),
    IVec4(IVec4),
    I64Vec2(I64Vec2),
    FVec4(FVec4),
    F16Vec4(F16Vec4),
    DVec2(DVec2),
    Binding(Binding),
    Enum(i32),
    String(String),
}

/// Element type of a dynamically sized array member.
///
/// Arrays are stored as raw bytes in native byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ArrayType {
    Int,
    Uint,
    Int64,
    Uint64,
    Float,
    Float16,
    Double,
}

impl ArrayType {
    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        use ArrayType::*;
        match self {
            Int | Uint | Float => 4,
            Int64 | Uint64 | Double => 8,
            Float16 => 2,
        }
    }

    /// Formats the elements stored in a byte buffer of this type as a comma separated list.
    pub fn format_elements(&self, bytes: &[u8]) -> String {
        let elements: Vec<String> = bytes
            .chunks_exact(self.element_size())
            .map(|chunk| match self {
                ArrayType::Int => i32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]).to_string(),
                ArrayType::Uint => u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]).to_string(),
                ArrayType::Float => f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]).to_string(),
                ArrayType::Float16 => F16(u16::from_ne_bytes([chunk[0], chunk[1]])).to_string(),
                ArrayType::Int64 => i64::from_ne_bytes(eight(chunk)).to_string(),
                ArrayType::Uint64 => u64::from_ne_bytes(eight(chunk)).to_string(),
                ArrayType::Double => f64::from_ne_bytes(eight(chunk)).to_string(),
            })
            .collect();
        elements.join(", ")
    }
}

fn eight(chunk: &[u8]) -> [u8; 8] {
    let mut b = [0_u8; 8];
    b.copy_from_slice(chunk);
    b
}

struct ScannedInteger {
    negative: bool,
    magnitude: u64,
    overflow: bool,
}

fn invalid_number(token: &str) -> ErrorKind {
    ErrorKind::InvalidNumber {
        token: token.to_string(),
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn has_hex_prefix(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() > 2 && b[0] == b'0' && (b[1] == b'x' || b[1] == b'X') && b[2].is_ascii_hexdigit()
}

fn scan_integer(token: &str) -> Result<ScannedInteger, ErrorKind> {
    let (negative, s) = split_sign(token.trim_start());
    let (radix, digits) = if has_hex_prefix(s) {
        (16, &s[2..])
    } else if s.starts_with('0') {
        (8, s)
    } else {
        (10, s)
    };
    let mut magnitude: u64 = 0;
    let mut overflow = false;
    let mut num_digits = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        match magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(d as u64))
        {
            Some(m) => magnitude = m,
            None => overflow = true,
        }
        num_digits += 1;
    }
    if num_digits == 0 {
        return Err(invalid_number(token));
    }
    Ok(ScannedInteger {
        negative,
        magnitude,
        overflow,
    })
}

/// Parses a 64-bit signed integer with the semantics of `strtoll`.
///
/// Out of range values saturate.
pub fn parse_signed(token: &str) -> Result<i64, ErrorKind> {
    let ScannedInteger {
        negative,
        magnitude,
        overflow,
    } = scan_integer(token)?;
    let limit = if negative {
        i64::MIN.unsigned_abs()
    } else {
        i64::MAX as u64
    };
    if overflow || magnitude > limit {
        return Ok(if negative { i64::MIN } else { i64::MAX });
    }
    Ok(if negative {
        (magnitude as i64).wrapping_neg()
    } else {
        magnitude as i64
    })
}

/// Parses a 64-bit unsigned integer with the semantics of `strtoull`.
///
/// Negative values wrap around and out of range values saturate.
pub fn parse_unsigned(token: &str) -> Result<u64, ErrorKind> {
    let ScannedInteger {
        negative,
        magnitude,
        overflow,
    } = scan_integer(token)?;
    if overflow {
        return Ok(u64::MAX);
    }
    Ok(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

fn has_hex_float_prefix(s: &str) -> bool {
    has_hex_prefix(s)
        || (starts_with_ignore_case(s, "0x.")
            && s.as_bytes().get(3).is_some_and(u8::is_ascii_hexdigit))
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Parses a floating point number with the semantics of `strtod`.
pub fn parse_float(token: &str) -> Result<f64, ErrorKind> {
    let (negative, s) = split_sign(token.trim_start());
    let magnitude = if starts_with_ignore_case(s, "inf") {
        f64::INFINITY
    } else if starts_with_ignore_case(s, "nan") {
        f64::NAN
    } else if has_hex_float_prefix(s) {
        scan_hex_float(&s[2..])
    } else {
        let end = scan_decimal_float(s);
        if end == 0 {
            return Err(invalid_number(token));
        }
        s[..end].parse::<f64>().map_err(|_| invalid_number(token))?
    };
    Ok(if negative { -magnitude } else { magnitude })
}

/// Returns the length of the longest prefix that is a decimal floating point literal.
fn scan_decimal_float(s: &str) -> usize {
    let b = s.as_bytes();
    let count_digits = |from: usize| b[from..].iter().take_while(|c| c.is_ascii_digit()).count();
    let mut i = count_digits(0);
    let mut num_digits = i;
    if b.get(i) == Some(&b'.') {
        let n = count_digits(i + 1);
        num_digits += n;
        i += 1 + n;
    }
    if num_digits == 0 {
        return 0;
    }
    if matches!(b.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let n = count_digits(j);
        if n > 0 {
            i = j + n;
        }
    }
    i
}

fn scan_hex_float(s: &str) -> f64 {
    let mut value = 0.0_f64;
    let mut scale = 0_i32;
    let mut seen_point = false;
    let mut rest = s;
    for c in s.chars() {
        if c == '.' && !seen_point {
            seen_point = true;
        } else if let Some(d) = c.to_digit(16) {
            value = value * 16.0 + d as f64;
            if seen_point {
                scale -= 4;
            }
        } else {
            break;
        }
        rest = &rest[1..];
    }
    if rest.starts_with(['p', 'P']) {
        let (negative, digits) = split_sign(&rest[1..]);
        let n: String = digits.chars().take_while(char::is_ascii_digit).collect();
        if let Ok(e) = n.parse::<i32>() {
            scale = scale.saturating_add(if negative { -e } else { e });
        }
    }
    value * 2_f64.powi(scale)
}

fn parse_int(token: &str, is_hex: bool) -> Result<i32, ErrorKind> {
    Ok(if is_hex {
        parse_unsigned(token)? as u32 as i32
    } else {
        parse_signed(token)? as i32
    })
}

fn parse_components<T: Copy + Default, const N: usize>(
    text: &str,
    mut parse: impl FnMut(&str) -> Result<T, ErrorKind>,
) -> Result<([T; N], usize), ErrorKind> {
    let mut data = [T::default(); N];
    let mut len = 0;
    for token in tokens(text) {
        if len == N {
            return Err(ErrorKind::TooManyComponents {
                max: N,
                provided: tokens(text).count(),
            });
        }
        data[len] = parse(token)?;
        len += 1;
    }
    if len == 0 {
        return Err(invalid_number(text));
    }
    Ok((data, len))
}

/// Parses a trimmed literal as a value of the given type.
pub fn parse_value(text: &str, value_type: ValueType) -> Result<Value, ErrorKind> {
    let is_hex = text.contains("0x");
    Ok(match value_type {
        ValueType::Int => Value::Int(parse_int(text, is_hex)?),
        ValueType::Uint => Value::Uint(parse_int(text, is_hex)? as u32),
        ValueType::Float => Value::Float(parse_float(text)? as f32),
        ValueType::Float16 => Value::Float16(F16::from_f32(parse_float(text)? as f32)),
        ValueType::Double => Value::Double(parse_float(text)?),
        ValueType::Bool => Value::Bool(match text {
            "true" => true,
            "false" => false,
            _ => parse_signed(text)? as i32 != 0,
        }),
        ValueType::IVec4 => {
            let (data, len) = parse_components(text, |t| parse_int(t, is_hex))?;
            Value::IVec4(IVec4 { data, len, is_hex })
        }
        ValueType::I64Vec2 => {
            let (data, len) = parse_components(text, |t| {
                if is_hex {
                    Ok(parse_unsigned(t)? as i64)
                } else {
                    parse_signed(t)
                }
            })?;
            Value::I64Vec2(I64Vec2 { data, len, is_hex })
        }
        ValueType::FVec4 => {
            let (data, len) = parse_components(text, |t| Ok(parse_float(t)? as f32))?;
            Value::FVec4(FVec4 {
                data,
                len,
                is_hex: false,
            })
        }
        ValueType::F16Vec4 => {
            let (data, len) =
                parse_components(text, |t| Ok(F16::from_f32(parse_float(t)? as f32)))?;
            Value::F16Vec4(F16Vec4 {
                data,
                len,
                is_hex: false,
            })
        }
        ValueType::DVec2 => {
            let (data, len) = parse_components(text, parse_float)?;
            Value::DVec2(DVec2 {
                data,
                len,
                is_hex: false,
            })
        }
        ValueType::Binding => {
            let (data, len) = parse_components(text, |t| match t {
                "vb" => Ok(Binding::VERTEX_BUFFER_SET_ID),
                "ib" => Ok(Binding::INDEX_BUFFER_SET_ID),
                _ => Ok(parse_int(t, is_hex)? as u32),
            })?;
            Value::Binding(Binding { data, len, is_hex })
        }
        ValueType::Enum => match enums::lookup(text) {
            Some(v) => Value::Enum(v),
            None => {
                return Err(ErrorKind::UnknownEnum {
                    name: text.to_string(),
                })
            }
        },
        ValueType::String => Value::String(text.to_string()),
    })
}

/// Parses a comma separated list of elements and appends them to a byte buffer.
///
/// Nothing is appended if any element fails to parse.
pub fn append_array(text: &str, array_type: ArrayType, buffer: &mut Vec<u8>) -> Result<(), ErrorKind> {
    let mut bytes = Vec::new();
    for token in tokens(text) {
        let is_hex = token.contains("0x");
        match array_type {
            ArrayType::Int | ArrayType::Uint => {
                let v = if is_hex || array_type == ArrayType::Uint {
                    parse_unsigned(token)? as u32
                } else {
                    parse_signed(token)? as i32 as u32
                };
                bytes.extend_from_slice(&v.to_ne_bytes());
            }
            ArrayType::Int64 | ArrayType::Uint64 => {
                let v = if is_hex || array_type == ArrayType::Uint64 {
                    parse_unsigned(token)?
                } else {
                    parse_signed(token)? as u64
                };
                bytes.extend_from_slice(&v.to_ne_bytes());
            }
            ArrayType::Float => {
                bytes.extend_from_slice(&(parse_float(token)? as f32).to_ne_bytes());
            }
            ArrayType::Float16 => {
                let v = F16::from_f32(parse_float(token)? as f32);
                bytes.extend_from_slice(&v.0.to_ne_bytes());
            }
            ArrayType::Double => {
                bytes.extend_from_slice(&parse_float(token)?.to_ne_bytes());
            }
        }
    }
    buffer.extend(bytes);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! value_tests {
        ($( ($name: ident, $input: expr, $value_type: ident, $want: expr, ), )+ ) => {
            $(
                #[test]
                fn $name() {
                    let got = parse_value($input, ValueType::$value_type);
                    let want: Result<Value, ErrorKind> = $want;
                    assert_eq!(got, want);
                }
            )+
        };
    }

    fn ivec4(data: [i32; 4], len: usize, is_hex: bool) -> Result<Value, ErrorKind> {
        Ok(Value::IVec4(IVec4 { data, len, is_hex }))
    }

    value_tests!(
        (int_decimal, "-3", Int, Ok(Value::Int(-3)),),
        (int_hex, "0x10", Int, Ok(Value::Int(16)),),
        (int_octal, "010", Int, Ok(Value::Int(8)),),
        (int_trailing_junk, "12px", Int, Ok(Value::Int(12)),),
        (int_hex_high_bit, "0xFFFFFFFF", Int, Ok(Value::Int(-1)),),
        (
            int_not_a_number,
            "abc",
            Int,
            Err(ErrorKind::InvalidNumber {
                token: "abc".into()
            }),
        ),
        (uint_hex, "0x80000000", Uint, Ok(Value::Uint(0x8000_0000)),),
        (uint_negative_wraps, "-1", Uint, Ok(Value::Uint(u32::MAX)),),
        (float_basic, "1.5", Float, Ok(Value::Float(1.5)),),
        (float_exponent, "-2.5e2", Float, Ok(Value::Float(-250.0)),),
        (float_trailing_f, "0.25f", Float, Ok(Value::Float(0.25)),),
        (float_hex, "0x10", Float, Ok(Value::Float(16.0)),),
        (float16_one, "1.0", Float16, Ok(Value::Float16(F16(0x3c00))),),
        (double_basic, "0.1", Double, Ok(Value::Double(0.1)),),
        (bool_true, "true", Bool, Ok(Value::Bool(true)),),
        (bool_false, "false", Bool, Ok(Value::Bool(false)),),
        (bool_integer, "2", Bool, Ok(Value::Bool(true)),),
        (bool_zero, "0", Bool, Ok(Value::Bool(false)),),
        (ivec4_full, "1, 2, 3, 4", IVec4, ivec4([1, 2, 3, 4], 4, false),),
        (ivec4_short, "7 8", IVec4, ivec4([7, 8, 0, 0], 2, false),),
        (
            ivec4_hex_rule_applies_to_all_components,
            "0x0A, -3",
            IVec4,
            ivec4([10, 0xFFFF_FFFD_u32 as i32, 0, 0], 2, true),
        ),
        (
            ivec4_too_many,
            "1, 2, 3, 4, 5",
            IVec4,
            Err(ErrorKind::TooManyComponents {
                max: 4,
                provided: 5
            }),
        ),
        (
            ivec4_empty,
            ",",
            IVec4,
            Err(ErrorKind::InvalidNumber { token: ",".into() }),
        ),
        (
            i64vec2,
            "-1, 0x100000000",
            I64Vec2,
            Ok(Value::I64Vec2(I64Vec2 {
                data: [-1, 0x1_0000_0000],
                len: 2,
                is_hex: true
            })),
        ),
        (
            fvec4,
            "1.0, 0.5, -1",
            FVec4,
            Ok(Value::FVec4(FVec4 {
                data: [1.0, 0.5, -1.0, 0.0],
                len: 3,
                is_hex: false
            })),
        ),
        (
            f16vec4,
            "0.5, 2",
            F16Vec4,
            Ok(Value::F16Vec4(F16Vec4 {
                data: [F16(0x3800), F16(0x4000), F16(0), F16(0)],
                len: 2,
                is_hex: false
            })),
        ),
        (
            dvec2,
            "1e300",
            DVec2,
            Ok(Value::DVec2(DVec2 {
                data: [1e300, 0.0],
                len: 1,
                is_hex: false
            })),
        ),
        (
            binding_symbolic,
            "vb, 1",
            Binding,
            Ok(Value::Binding(Binding {
                data: [Binding::VERTEX_BUFFER_SET_ID, 1, 0],
                len: 2,
                is_hex: false
            })),
        ),
        (
            binding_index_buffer,
            "ib",
            Binding,
            Ok(Value::Binding(Binding {
                data: [Binding::INDEX_BUFFER_SET_ID, 0, 0],
                len: 1,
                is_hex: false
            })),
        ),
        (
            binding_too_many,
            "0, 1, 2, 3",
            Binding,
            Err(ErrorKind::TooManyComponents {
                max: 3,
                provided: 4
            }),
        ),
        (
            enum_known,
            "VK_PRIMITIVE_TOPOLOGY_TRIANGLE_LIST",
            Enum,
            Ok(Value::Enum(3)),
        ),
        (
            enum_unknown,
            "VK_NOT_A_THING",
            Enum,
            Err(ErrorKind::UnknownEnum {
                name: "VK_NOT_A_THING".into()
            }),
        ),
        (
            string_verbatim,
            "main ; not a comment here",
            String,
            Ok(Value::String("main ; not a comment here".into())),
        ),
    );

    #[test]
    fn signed_saturates() {
        assert_eq!(parse_signed("99999999999999999999"), Ok(i64::MAX));
        assert_eq!(parse_signed("-99999999999999999999"), Ok(i64::MIN));
        assert_eq!(parse_signed("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn unsigned_saturates_and_wraps() {
        assert_eq!(parse_unsigned("0xFFFFFFFFFFFFFFFFFF"), Ok(u64::MAX));
        assert_eq!(parse_unsigned("-3"), Ok(u64::MAX - 2));
        assert_eq!(parse_unsigned("  +42"), Ok(42));
    }

    #[test]
    fn hex_prefix_needs_a_digit() {
        // Like strtol, "0x" without digits parses as the octal number 0.
        assert_eq!(parse_signed("0xg"), Ok(0));
    }

    #[test]
    fn float_special_values() {
        assert_eq!(parse_float("-inf"), Ok(f64::NEG_INFINITY));
        assert!(parse_float("NaN").unwrap().is_nan());
        assert_eq!(parse_float("0x1.8p1"), Ok(3.0));
        assert_eq!(parse_float(".5"), Ok(0.5));
        assert_eq!(parse_float("1e"), Ok(1.0));
        assert!(parse_float("e5").is_err());
        assert!(parse_float(".").is_err());
    }

    #[test]
    fn f16_conversion() {
        let cases: Vec<(f32, u16)> = vec![
            (0.0, 0x0000),
            (-0.0, 0x8000),
            (1.0, 0x3c00),
            (-2.0, 0xc000),
            (0.5, 0x3800),
            (65504.0, 0x7bff),
            (1.0e6, 0x7c00),
            (f32::INFINITY, 0x7c00),
            (5.960_464_5e-8, 0x0001),
            (6.103_515_6e-5, 0x0400),
            (1.0e-10, 0x0000),
        ];
        for (input, want) in cases {
            assert_eq!(F16::from_f32(input), F16(want), "input {input}");
        }
        assert_eq!(F16(0x3c00).to_f32(), 1.0);
        assert_eq!(F16(0x0001).to_f32(), 5.960_464_5e-8);
        assert!(F16::from_f32(f32::NAN).to_f32().is_nan());
    }

    #[test]
    fn f16_rounds_to_nearest_even() {
        // 1 + 2^-11 is exactly halfway between 1 and the next half precision value.
        assert_eq!(F16::from_f32(1.0 + 2_f32.powi(-11)), F16(0x3c00));
        assert_eq!(F16::from_f32(1.0 + 3.0 * 2_f32.powi(-11)), F16(0x3c02));
    }

    fn int_elements(bytes: &[u8]) -> Vec<u32> {
        bytes
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    #[test]
    fn arrays_append() {
        let mut buffer = vec![];
        append_array("1, 2", ArrayType::Int, &mut buffer).unwrap();
        append_array("3 4", ArrayType::Int, &mut buffer).unwrap();
        assert_eq!(int_elements(&buffer), vec![1, 2, 3, 4]);
    }

    #[test]
    fn int_array_hex_is_per_element() {
        let mut buffer = vec![];
        append_array("-1, 0xFFFFFFFF, -0x1", ArrayType::Int, &mut buffer).unwrap();
        assert_eq!(int_elements(&buffer), vec![u32::MAX, u32::MAX, u32::MAX]);
    }

    #[test]
    fn typed_arrays() {
        let mut buffer = vec![];
        append_array("1.5, -2", ArrayType::Double, &mut buffer).unwrap();
        assert_eq!(buffer.len(), 16);
        assert_eq!(ArrayType::Double.format_elements(&buffer), "1.5, -2");

        let mut buffer = vec![];
        append_array("1, 0.5", ArrayType::Float16, &mut buffer).unwrap();
        assert_eq!(buffer, [0x3c00_u16.to_ne_bytes(), 0x3800_u16.to_ne_bytes()].concat());

        let mut buffer = vec![];
        append_array("-2, 0x8000000000000000", ArrayType::Int64, &mut buffer).unwrap();
        assert_eq!(
            ArrayType::Uint64.format_elements(&buffer),
            "18446744073709551614, 9223372036854775808"
        );
    }

    #[test]
    fn failing_array_leaves_buffer_untouched() {
        let mut buffer = vec![];
        append_array("1", ArrayType::Uint, &mut buffer).unwrap();
        assert!(append_array("2, x", ArrayType::Uint, &mut buffer).is_err());
        assert_eq!(int_elements(&buffer), vec![1]);
    }

    #[test]
    fn vector_display() {
        let v = parse_value("0x0A, -3", ValueType::IVec4).unwrap();
        let Value::IVec4(v) = v else { panic!() };
        assert_eq!(v.to_string(), "0xa, 0xfffffffd");
        let Value::FVec4(v) = parse_value("1, 0.5", ValueType::FVec4).unwrap() else {
            panic!()
        };
        assert_eq!(v.to_string(), "1, 0.5");
    }
}
