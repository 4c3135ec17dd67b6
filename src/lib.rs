//! Extract INFO and FORMAT fields from VCF/BCF files into a per-sample
//! TSV table: one row per (variant, sample) pair.
//!
//! rust-htslib does the container parsing; this crate owns the typed field
//! decoding ([`value`]), text rendering ([`render`]), row assembly
//! ([`row`]) and the extraction loop ([`extract`]).

pub mod extract;
pub mod fields;
pub mod render;
pub mod row;
pub mod value;
