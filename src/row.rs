//! Assembly of one output row per (variant, sample).

use std::error::Error;
use std::io::Write as _;

use rust_htslib::bcf;
use rust_htslib::bcf::header::HeaderView;

use crate::fields::{FieldKind, FieldSpec, RecordFields};
use crate::render::{render_genotype, render_value};
use crate::value::decode;

/// Holds the parsed field request (ordered, duplicates preserved) and
/// emits the header line plus one tab-separated row per (record, sample)
/// into a caller-owned byte buffer. Value bytes pass through verbatim.
pub struct RowWriter {
    include_id: bool,
    info_fields: Vec<FieldSpec>,
    format_fields: Vec<FieldSpec>,
}

impl RowWriter {
    pub fn new(
        header: &HeaderView,
        include_id: bool,
        info_names: &[String],
        format_names: &[String],
    ) -> RowWriter {
        let resolve = |names: &[String], kind: FieldKind| {
            names
                .iter()
                .map(|name| FieldSpec::resolve(header, name, kind))
                .collect()
        };
        RowWriter {
            include_id,
            info_fields: resolve(info_names, FieldKind::Info),
            format_fields: resolve(format_names, FieldKind::Format),
        }
    }

    /// Fixed column names, then requested INFO and FORMAT names in request
    /// order, duplicates verbatim.
    pub fn header_line(&self) -> String {
        let mut line = String::from("SAMPLE\tCHROM\tPOS\tREF\tALT");
        if self.include_id {
            line.push_str("\tID");
        }
        for field in self.info_fields.iter().chain(&self.format_fields) {
            line.push('\t');
            line.push_str(&field.name);
        }
        line.push('\n');
        line
    }

    pub fn write_row(
        &self,
        out: &mut Vec<u8>,
        record: &bcf::Record,
        fields: &RecordFields,
        sample_idx: usize,
        sample_name: &[u8],
    ) -> Result<(), Box<dyn Error>> {
        out.extend_from_slice(sample_name);

        out.push(b'\t');
        match record.rid() {
            Some(rid) => out.extend_from_slice(record.header().rid2name(rid)?),
            None => out.push(b'.'),
        }

        // positions are stored 0-based, rendered 1-based
        out.push(b'\t');
        let _ = write!(out, "{}", record.pos() + 1);

        let alleles = record.alleles();
        out.push(b'\t');
        match alleles.first() {
            Some(reference) => out.extend_from_slice(reference),
            None => out.push(b'.'),
        }

        out.push(b'\t');
        if alleles.len() > 1 {
            for (i, alt) in alleles.iter().skip(1).enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                out.extend_from_slice(alt);
            }
        } else {
            out.push(b'.');
        }

        if self.include_id {
            out.push(b'\t');
            let id = record.id();
            if id.is_empty() {
                out.push(b'.');
            } else {
                out.extend_from_slice(&id);
            }
        }

        // INFO is record-scoped: the same cell for every sample of a record.
        for field in &self.info_fields {
            out.push(b'\t');
            render_value(&decode(fields.info(field.tag_id)), out);
        }

        for field in &self.format_fields {
            out.push(b'\t');
            let handle = fields
                .format(field.tag_id)
                .and_then(|fmt| fmt.sample(sample_idx));
            match handle {
                Some(raw) if field.name == "GT" => match raw.int_elements() {
                    Some(elems) => render_genotype(&elems, out),
                    None => out.push(b'.'),
                },
                Some(raw) => render_value(&raw.decode(), out),
                // field-not-found collapses to one "." cell regardless of
                // any declared vector length
                None => out.push(b'.'),
            }
        }

        out.push(b'\n');
        Ok(())
    }
}
