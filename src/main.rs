use anyhow::Result;
use clap::Parser;
use env_logger::Env;

mod argparser;
mod data;
mod processing;

use argparser::Args;
use processing::compare_methylation;

fn run(args: Args) -> Result<f64> {
    compare_methylation(&args.file1, &args.file2)
}

/// Debug formatting keeps the decimal point on whole numbers (`1.0`) and uses exponents for tiny values.
fn format_correlation(correlation: f64) -> String {
    format!("{:?}", correlation)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(args) {
        Ok(correlation) => println!("{}", format_correlation(correlation)),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(1);
        }
    }
}
