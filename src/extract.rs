//! Extraction driver: iterates records in file order, samples in header
//! order, and streams one row per (record, sample).

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};

use rust_htslib::bcf::{self, Read};

use crate::fields::RecordFields;
use crate::row::RowWriter;

pub struct ExtractConfig {
    pub input: String,
    pub output: String,
    pub include_id: bool,
    pub info_fields: Vec<String>,
    pub format_fields: Vec<String>,
}

/// Either a regular output file or stdout ("-").
pub enum EitherWriter {
    File(BufWriter<File>),
    Stdout(BufWriter<io::Stdout>),
}

impl Write for EitherWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            EitherWriter::File(w) => w.write(buf),
            EitherWriter::Stdout(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            EitherWriter::File(w) => w.flush(),
            EitherWriter::Stdout(w) => w.flush(),
        }
    }
}

/// Owns the reader, the writer and the row assembly for one extraction
/// run. Strictly sequential: a record is fully read, decoded, rendered and
/// written before the next one is requested.
pub struct Extractor {
    reader: bcf::Reader,
    writer: EitherWriter,
    rows: RowWriter,
    samples: Vec<Vec<u8>>,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Result<Extractor, Box<dyn Error>> {
        let reader = bcf::Reader::from_path(&config.input)
            .map_err(|e| format!("failed to open input file {}: {}", config.input, e))?;
        let header = reader.header();

        // sample identity is fixed by header order for the whole run
        let samples: Vec<Vec<u8>> = header.samples().iter().map(|s| s.to_vec()).collect();
        if samples.is_empty() {
            log::warn!("header declares no samples; no rows will be written");
        }

        let rows = RowWriter::new(
            header,
            config.include_id,
            &config.info_fields,
            &config.format_fields,
        );

        let writer = if config.output == "-" {
            EitherWriter::Stdout(BufWriter::new(io::stdout()))
        } else {
            let file = File::create(&config.output)
                .map_err(|e| format!("failed to create output file {}: {}", config.output, e))?;
            EitherWriter::File(BufWriter::new(file))
        };

        Ok(Extractor {
            reader,
            writer,
            rows,
            samples,
        })
    }

    /// Writes the header line and then all data rows. The first read or
    /// write error aborts the run; rows already written are not retracted.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.writer.write_all(self.rows.header_line().as_bytes())?;

        let mut buf = Vec::new();
        let mut n_records = 0u64;
        let mut n_rows = 0u64;
        for result in self.reader.records() {
            let record = result.map_err(|e| format!("failed to read record: {}", e))?;
            let fields = RecordFields::new(&record);
            n_records += 1;
            for (sample_idx, sample_name) in self.samples.iter().enumerate() {
                buf.clear();
                self.rows
                    .write_row(&mut buf, &record, &fields, sample_idx, sample_name)?;
                self.writer.write_all(&buf)?;
                n_rows += 1;
            }
        }
        self.writer.flush()?;
        log::info!("wrote {} rows from {} records", n_rows, n_records);
        Ok(())
    }
}
