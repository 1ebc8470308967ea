use anyhow::{bail, Context, Result};
use log::debug;
use methylome::{PositionKey, SourceKind, Strand};
use std::{io::BufRead, path::Path};

use super::{open_with_progress, MethylationSet};

const MIN_FIELDS: usize = 11;

/// The columns of a bedMethyl line that feed the comparison.
#[derive(Debug, PartialEq)]
pub struct BedMethylRecord {
    pub chromosome: String,
    pub start: i64,
    pub strand: Strand,
    pub coverage: f64,
    pub percent_methylated: f64,
}

impl BedMethylRecord {
    /// Parses one whitespace separated line.
    ///
    /// Field layout: chromosome (0), start (1), end (2), strand (5), coverage (9), percent methylated (10).
    pub fn parse(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            bail!(
                "Expected at least {} fields, found {}",
                MIN_FIELDS,
                fields.len()
            );
        }

        let start: i64 = fields[1]
            .parse()
            .with_context(|| format!("Invalid start: '{}'", fields[1]))?;
        // Unused, but must still be a valid coordinate.
        fields[2]
            .parse::<i64>()
            .with_context(|| format!("Invalid end: '{}'", fields[2]))?;
        let coverage: f64 = fields[9]
            .parse()
            .with_context(|| format!("Invalid coverage: '{}'", fields[9]))?;
        let percent_methylated: f64 = fields[10]
            .parse()
            .with_context(|| format!("Invalid percent methylated: '{}'", fields[10]))?;

        // nan/inf parse as floats but cannot be turned into a read count.
        if !coverage.is_finite() {
            bail!("Coverage must be a finite number, found '{}'", fields[9]);
        }
        if !percent_methylated.is_finite() {
            bail!(
                "Percent methylated must be a finite number, found '{}'",
                fields[10]
            );
        }
        if !((percent_methylated / 100.0) * coverage).is_finite() {
            bail!(
                "Methylated read count overflows for coverage {} at {}%",
                fields[9],
                fields[10]
            );
        }

        Ok(Self {
            chromosome: fields[0].to_string(),
            start,
            strand: Strand::from_bedmethyl_code(fields[5]),
            coverage,
            percent_methylated,
        })
    }

    /// Reads called methylated, truncated toward zero.
    pub fn methylated_reads(&self) -> f64 {
        ((self.percent_methylated / 100.0) * self.coverage).trunc()
    }

    /// Single base key on the forward strand position of the site.
    pub fn site_key(&self) -> PositionKey {
        PositionKey::site(
            self.chromosome.clone(),
            self.strand.normalize_position(self.start),
        )
    }
}

pub fn load_bedmethyl<P: AsRef<Path>>(path: P) -> Result<MethylationSet> {
    let path = path.as_ref();
    let (reader, pb) = open_with_progress(path)?;

    let set = read_bedmethyl(reader)
        .with_context(|| format!("Error parsing bedMethyl file: {:?}", path))?;
    pb.finish_and_clear();

    Ok(set)
}

pub fn read_bedmethyl<R: BufRead>(reader: R) -> Result<MethylationSet> {
    let mut set = MethylationSet::new();
    let mut lines_processed = 0;

    for line in reader.lines() {
        lines_processed += 1;
        let line = line.with_context(|| format!("Failed to read line {}", lines_processed))?;

        let record = BedMethylRecord::parse(&line)
            .with_context(|| format!("Malformed bedMethyl record at line {}", lines_processed))?;

        // Both strands of a CpG, and repeated calls, merge into one site.
        set.accumulate(
            record.site_key(),
            record.coverage,
            record.methylated_reads(),
            SourceKind::BedMethyl,
        );
    }

    debug!(
        "Read {} bedMethyl lines into {} positions",
        lines_processed,
        set.len()
    );

    Ok(set)
}
