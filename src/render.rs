//! Text rendering of decoded field values.
//!
//! Every renderer appends into a caller-owned byte buffer and is a pure
//! function of its inputs. String field bytes pass through verbatim, with
//! no UTF-8 validation or replacement. Missing renders as "." everywhere;
//! floats use fixed six-decimal formatting to match the usual genomic-tool
//! output.

use std::io::Write as _;

use crate::value::{Elem, TypedValue};

pub fn render_value(value: &TypedValue, out: &mut Vec<u8>) {
    match value {
        TypedValue::Missing => out.push(b'.'),
        TypedValue::Int(v) => {
            let _ = write!(out, "{}", v);
        }
        TypedValue::Float(v) => {
            let _ = write!(out, "{:.6}", v);
        }
        TypedValue::Char(c) => out.push(*c as u8),
        TypedValue::Str(bytes) => out.extend_from_slice(bytes),
        TypedValue::Ints(elems) => {
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                match elem {
                    Elem::Value(v) => {
                        let _ = write!(out, "{}", v);
                    }
                    Elem::Missing | Elem::End => out.push(b'.'),
                }
            }
        }
        TypedValue::Floats(elems) => {
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                match elem {
                    Elem::Value(v) => {
                        let _ = write!(out, "{:.6}", v);
                    }
                    Elem::Missing | Elem::End => out.push(b'.'),
                }
            }
        }
    }
}

/// Genotype rendering, selected by field name "GT" only, never by type.
/// Each encoded value packs the allele index as `(v >> 1) - 1` and the
/// phasing of the preceding separator in the low bit; an encoded zero is a
/// missing call. `End` terminates the ploidy for samples shorter than the
/// record-wide maximum.
pub fn render_genotype(alleles: &[Elem<i32>], out: &mut Vec<u8>) {
    let mut wrote = false;
    for (i, elem) in alleles.iter().enumerate() {
        let v = match elem {
            Elem::End => break,
            Elem::Missing => 0,
            Elem::Value(v) => *v,
        };
        if i > 0 {
            out.push(if v & 1 == 1 { b'|' } else { b'/' });
        }
        if v >> 1 == 0 {
            out.push(b'.');
        } else {
            let _ = write!(out, "{}", (v >> 1) - 1);
        }
        wrote = true;
    }
    if !wrote {
        out.push(b'.');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(value: &TypedValue) -> String {
        let mut out = Vec::new();
        render_value(value, &mut out);
        String::from_utf8(out).unwrap()
    }

    fn genotype(alleles: &[Elem<i32>]) -> String {
        let mut out = Vec::new();
        render_genotype(alleles, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn missing_renders_dot() {
        assert_eq!(rendered(&TypedValue::Missing), ".");
    }

    #[test]
    fn scalar_int() {
        assert_eq!(rendered(&TypedValue::Int(-42)), "-42");
    }

    #[test]
    fn scalar_float_six_decimals() {
        assert_eq!(rendered(&TypedValue::Float(0.5)), "0.500000");
        assert_eq!(rendered(&TypedValue::Float(12.0)), "12.000000");
    }

    #[test]
    fn scalar_char_and_string() {
        assert_eq!(rendered(&TypedValue::Char('X')), "X");
        assert_eq!(rendered(&TypedValue::Str(b"abc".to_vec())), "abc");
    }

    #[test]
    fn string_bytes_pass_through_verbatim() {
        // non-UTF-8 value bytes are emitted as-is, never replaced
        let mut out = Vec::new();
        render_value(&TypedValue::Str(vec![b'a', 0xE9, b'b']), &mut out);
        assert_eq!(out, vec![b'a', 0xE9, b'b']);
    }

    #[test]
    fn int_vector_with_inline_missing() {
        let v = TypedValue::Ints(vec![Elem::Value(1), Elem::Missing, Elem::Value(3)]);
        assert_eq!(rendered(&v), "1,.,3");
    }

    #[test]
    fn vector_end_renders_dot_in_place() {
        let v = TypedValue::Ints(vec![Elem::Value(1), Elem::End]);
        assert_eq!(rendered(&v), "1,.");
    }

    #[test]
    fn float_vector() {
        let v = TypedValue::Floats(vec![Elem::Value(0.25), Elem::Missing]);
        assert_eq!(rendered(&v), "0.250000,.");
    }

    #[test]
    fn gt_unphased_diploid() {
        // 0/1 encodes as [2, 4]
        assert_eq!(genotype(&[Elem::Value(2), Elem::Value(4)]), "0/1");
    }

    #[test]
    fn gt_phased_diploid() {
        // 0|1 encodes as [2, 5]
        assert_eq!(genotype(&[Elem::Value(2), Elem::Value(5)]), "0|1");
    }

    #[test]
    fn gt_missing_call() {
        assert_eq!(genotype(&[Elem::Value(0), Elem::Value(0)]), "./.");
    }

    #[test]
    fn gt_haploid_padded_with_end() {
        assert_eq!(genotype(&[Elem::Value(4), Elem::End]), "1");
    }

    #[test]
    fn gt_empty_is_dot() {
        assert_eq!(genotype(&[]), ".");
        assert_eq!(genotype(&[Elem::End, Elem::End]), ".");
    }
}
