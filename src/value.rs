//! Decoding of BCF typed field data into semantic values.
//!
//! INFO and FORMAT payloads arrive as a type code, a declared element count
//! and a raw little-endian byte span. Each integer width and the float type
//! reserve bit patterns for "missing" and "end of vector"; telling those
//! apart from ordinary values (and from a field that is absent altogether)
//! is the whole point of this module.

/// BCF type codes recognized by the decoder. Anything else is malformed
/// and decodes to `TypedValue::Missing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Flag,
    Int8,
    Int16,
    Int32,
    Float,
    Char,
}

impl FieldType {
    pub fn from_code(code: u8) -> Option<FieldType> {
        match code {
            0 => Some(FieldType::Flag),
            1 => Some(FieldType::Int8),
            2 => Some(FieldType::Int16),
            3 => Some(FieldType::Int32),
            5 => Some(FieldType::Float),
            7 => Some(FieldType::Char),
            _ => None,
        }
    }

    fn width(self) -> usize {
        match self {
            FieldType::Flag => 0,
            FieldType::Int8 | FieldType::Char => 1,
            FieldType::Int16 => 2,
            FieldType::Int32 | FieldType::Float => 4,
        }
    }
}

pub(crate) const MISSING_INT8: i8 = i8::MIN;
pub(crate) const END_INT8: i8 = i8::MIN + 1;
pub(crate) const MISSING_INT16: i16 = i16::MIN;
pub(crate) const END_INT16: i16 = i16::MIN + 1;
pub(crate) const MISSING_INT32: i32 = i32::MIN;
pub(crate) const END_INT32: i32 = i32::MIN + 1;
pub(crate) const MISSING_FLOAT: u32 = 0x7F80_0001;
pub(crate) const END_FLOAT: u32 = 0x7F80_0002;

/// One element of a decoded vector. `Missing` and `End` both render as "."
/// in generic vectors; `End` additionally terminates genotype rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elem<T> {
    Value(T),
    Missing,
    End,
}

/// A borrowed view over one field's encoded bytes: type code, declared
/// element count, and the raw span. The count is never trusted beyond the
/// span length.
#[derive(Debug, Clone, Copy)]
pub struct RawField<'a> {
    pub ty: u8,
    pub count: usize,
    pub data: &'a [u8],
}

/// Decoded field value. `Missing` covers field-absent, zero count, a
/// matched sentinel, and malformed encodings alike; consumers only ever
/// pattern-match on this, so the "is this missing" decision lives in one
/// place.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Missing,
    Int(i32),
    Float(f32),
    Char(char),
    Str(Vec<u8>),
    Ints(Vec<Elem<i32>>),
    Floats(Vec<Elem<f32>>),
}

/// Decode a field handle, absent handles included.
pub fn decode(handle: Option<RawField>) -> TypedValue {
    match handle {
        Some(field) => field.decode(),
        None => TypedValue::Missing,
    }
}

impl<'a> RawField<'a> {
    pub fn decode(&self) -> TypedValue {
        let Some(ty) = FieldType::from_code(self.ty) else {
            return TypedValue::Missing;
        };
        if self.count == 0 {
            return TypedValue::Missing;
        }
        match ty {
            // A present flag carries no payload; its cell renders ".".
            FieldType::Flag => TypedValue::Missing,
            FieldType::Char => self.decode_char(),
            FieldType::Int8 | FieldType::Int16 | FieldType::Int32 => {
                match self.int_elements() {
                    Some(elems) if self.count == 1 => match elems[0] {
                        Elem::Value(v) => TypedValue::Int(v),
                        Elem::Missing | Elem::End => TypedValue::Missing,
                    },
                    Some(elems) => TypedValue::Ints(elems),
                    None => TypedValue::Missing,
                }
            }
            FieldType::Float => match self.float_elements() {
                Some(elems) if self.count == 1 => match elems[0] {
                    Elem::Value(v) => TypedValue::Float(v),
                    Elem::Missing | Elem::End => TypedValue::Missing,
                },
                Some(elems) => TypedValue::Floats(elems),
                None => TypedValue::Missing,
            },
        }
    }

    /// Sentinel-resolved integer elements, for any of the three widths.
    /// `None` for non-integer types or a span too short for `count`.
    /// Genotype rendering uses this directly since it needs `End` intact.
    pub fn int_elements(&self) -> Option<Vec<Elem<i32>>> {
        let ty = FieldType::from_code(self.ty)?;
        let width = ty.width();
        let bytes = self.data.get(..self.count.checked_mul(width)?)?;
        let elems = match ty {
            FieldType::Int8 => bytes
                .iter()
                .map(|&b| match b as i8 {
                    MISSING_INT8 => Elem::Missing,
                    END_INT8 => Elem::End,
                    v => Elem::Value(i32::from(v)),
                })
                .collect(),
            FieldType::Int16 => bytes
                .chunks_exact(2)
                .map(|c| match i16::from_le_bytes([c[0], c[1]]) {
                    MISSING_INT16 => Elem::Missing,
                    END_INT16 => Elem::End,
                    v => Elem::Value(i32::from(v)),
                })
                .collect(),
            FieldType::Int32 => bytes
                .chunks_exact(4)
                .map(|c| match i32::from_le_bytes([c[0], c[1], c[2], c[3]]) {
                    MISSING_INT32 => Elem::Missing,
                    END_INT32 => Elem::End,
                    v => Elem::Value(v),
                })
                .collect(),
            _ => return None,
        };
        Some(elems)
    }

    fn float_elements(&self) -> Option<Vec<Elem<f32>>> {
        if FieldType::from_code(self.ty)? != FieldType::Float {
            return None;
        }
        let bytes = self.data.get(..self.count.checked_mul(4)?)?;
        Some(
            bytes
                .chunks_exact(4)
                .map(|c| {
                    let bits = u32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                    match bits {
                        MISSING_FLOAT => Elem::Missing,
                        END_FLOAT => Elem::End,
                        _ => Elem::Value(f32::from_bits(bits)),
                    }
                })
                .collect(),
        )
    }

    fn decode_char(&self) -> TypedValue {
        let Some(bytes) = self.data.get(..self.count) else {
            return TypedValue::Missing;
        };
        if self.count == 1 {
            return TypedValue::Char(bytes[0] as char);
        }
        // A multi-byte char run is a string. BCF pads fixed-width string
        // vectors with NULs, which are storage, not value bytes.
        let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        TypedValue::Str(bytes[..end].to_vec())
    }
}
