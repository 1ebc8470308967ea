use clap::Parser;

/// Correlate per-site methylation frequencies between two files.
///
/// The format of each file is chosen from its name: paths containing "bedmethyl"
/// are read as bedMethyl, paths containing "tsv" as grouped-interval tsv.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(required = true, help = "First methylation file (.tsv or .bedmethyl)")]
    pub file1: String,

    #[arg(required = true, help = "Second methylation file (.tsv or .bedmethyl)")]
    pub file2: String,
}
