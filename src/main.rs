use clap::Parser;
use mimalloc::MiMalloc;

use vcftab::extract::{ExtractConfig, Extractor};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "vcftab",
    version,
    about = "Extract INFO and FORMAT fields from a VCF/BCF into a per-sample TSV table"
)]
struct Args {
    /// Include the variant ID column
    #[arg(long)]
    id: bool,

    /// Comma-separated INFO field names to extract, in output order
    #[arg(long, value_name = "FIELDS")]
    info: Option<String>,

    /// Comma-separated FORMAT field names to extract, in output order
    #[arg(long, value_name = "FIELDS")]
    format: Option<String>,

    /// Input VCF or BCF file (plain or bgzf-compressed)
    input: String,

    /// Output TSV path, overwritten if it exists ("-" for stdout)
    output: String,
}

fn parse_field_list(arg: Option<&str>) -> Vec<String> {
    match arg {
        Some(list) => list
            .split(',')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = ExtractConfig {
        input: args.input,
        output: args.output,
        include_id: args.id,
        info_fields: parse_field_list(args.info.as_deref()),
        format_fields: parse_field_list(args.format.as_deref()),
    };

    let result = Extractor::new(&config).and_then(|mut extractor| extractor.run());
    if let Err(e) = result {
        eprintln!("vcftab: {}", e);
        std::process::exit(1);
    }
}
