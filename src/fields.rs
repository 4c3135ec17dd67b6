//! Per-record raw field handles on top of rust-htslib.
//!
//! After `bcf_unpack`, a record's decoded INFO and FORMAT entries live in
//! the `d.info` / `d.fmt` arrays keyed by numeric header tag ids. Those
//! arrays are walked once per record into hash maps so the per-sample inner
//! loop does constant-time lookups instead of re-scanning per requested
//! name. All unsafe pointer handling is confined to this module; everything
//! handed out is a bounds-checked byte slice borrowing from the record.

use std::ffi::CString;

use rust_htslib::bcf::header::HeaderView;
use rust_htslib::{bcf, htslib};
use rustc_hash::FxHashMap;

use crate::value::RawField;

/// Whether a requested name refers to the INFO or the FORMAT column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Info,
    Format,
}

/// A requested field name resolved against the header dictionary once at
/// startup. Names the header does not declare with the requested kind
/// stay unresolved and yield "." in every row; the shared tag dictionary
/// also holds FILTER names, so resolution checks the kind, not just id
/// existence.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub tag_id: Option<i32>,
}

impl FieldSpec {
    pub fn resolve(header: &HeaderView, name: &str, kind: FieldKind) -> FieldSpec {
        let declared = match kind {
            FieldKind::Info => header.info_type(name.as_bytes()).is_ok(),
            FieldKind::Format => header.format_type(name.as_bytes()).is_ok(),
        };
        let tag_id = if declared { tag_id(header, name) } else { None };
        if tag_id.is_none() {
            let column = match kind {
                FieldKind::Info => "INFO",
                FieldKind::Format => "FORMAT",
            };
            log::warn!(
                "{} field {} is not declared in the header; its column will be '.'",
                column,
                name
            );
        }
        FieldSpec {
            name: name.to_string(),
            tag_id,
        }
    }
}

fn tag_id(header: &HeaderView, name: &str) -> Option<i32> {
    let c_name = CString::new(name).ok()?;
    let id = unsafe {
        htslib::bcf_hdr_id2int(header.inner, htslib::BCF_DT_ID as i32, c_name.as_ptr())
    };
    (id >= 0).then_some(id)
}

/// One FORMAT entry of the current record: `per_sample` values of type
/// `ty` per sample, laid out sample-major with a fixed byte stride.
#[derive(Debug, Clone, Copy)]
pub struct FormatHandle<'a> {
    ty: u8,
    per_sample: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> FormatHandle<'a> {
    /// The sub-span for one sample, or `None` if the index falls outside
    /// the record's payload.
    pub fn sample(&self, idx: usize) -> Option<RawField<'a>> {
        let start = idx.checked_mul(self.stride)?;
        let data = self.data.get(start..start.checked_add(self.stride)?)?;
        Some(RawField {
            ty: self.ty,
            count: self.per_sample,
            data,
        })
    }
}

/// Tag-id keyed views over one record's INFO and FORMAT payloads. Built
/// once per record; the borrowed spans must not outlive the iteration step
/// that produced the record.
pub struct RecordFields<'a> {
    info: FxHashMap<i32, RawField<'a>>,
    format: FxHashMap<i32, FormatHandle<'a>>,
}

impl<'a> RecordFields<'a> {
    pub fn new(record: &'a bcf::Record) -> RecordFields<'a> {
        unsafe { htslib::bcf_unpack(record.inner, htslib::BCF_UN_ALL as i32) };
        let inner = record.inner();

        let mut info = FxHashMap::default();
        if !inner.d.info.is_null() {
            for i in 0..inner.n_info() as usize {
                let fld = unsafe { &*inner.d.info.add(i) };
                // Flags carry no payload; an empty span keeps the field
                // present so it still resolves to Missing, not absent.
                let data = if fld.vptr.is_null() {
                    &[][..]
                } else {
                    unsafe { std::slice::from_raw_parts(fld.vptr, fld.vptr_len as usize) }
                };
                info.insert(
                    fld.key,
                    RawField {
                        ty: fld.type_ as u8,
                        count: fld.len.max(0) as usize,
                        data,
                    },
                );
            }
        }

        let mut format = FxHashMap::default();
        if !inner.d.fmt.is_null() {
            for i in 0..inner.n_fmt() as usize {
                let fld = unsafe { &*inner.d.fmt.add(i) };
                if fld.p.is_null() {
                    continue;
                }
                let data = unsafe { std::slice::from_raw_parts(fld.p, fld.p_len as usize) };
                format.insert(
                    fld.id,
                    FormatHandle {
                        ty: fld.type_ as u8,
                        per_sample: fld.n.max(0) as usize,
                        stride: fld.size.max(0) as usize,
                        data,
                    },
                );
            }
        }

        RecordFields { info, format }
    }

    pub fn info(&self, tag_id: Option<i32>) -> Option<RawField<'a>> {
        self.info.get(&tag_id?).copied()
    }

    pub fn format(&self, tag_id: Option<i32>) -> Option<FormatHandle<'a>> {
        self.format.get(&tag_id?).copied()
    }
}
