use anyhow::{Context, Result};
use log::{info, warn};
use methylome::pearson_correlation;
use std::path::Path;

use crate::data::{load_methylation, MethylationSet};

/// Frequencies of the positions present in both sets, aligned by index.
#[derive(Debug, Default, PartialEq)]
pub struct PairedFrequencies {
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

impl PairedFrequencies {
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn correlation(&self) -> f64 {
        pearson_correlation(&self.first, &self.second)
    }
}

/// Inner join of two sets on their position keys.
///
/// Pairing order follows iteration over `first`. A shared position without
/// read coverage aborts the join.
pub fn join_frequencies(first: &MethylationSet, second: &MethylationSet) -> Result<PairedFrequencies> {
    let mut paired = PairedFrequencies::default();

    for (key, first_aggregate) in first.iter() {
        let Some(second_aggregate) = second.get(key) else {
            continue;
        };

        let first_frequency = first_aggregate
            .frequency()
            .with_context(|| format!("Cannot compute frequency at {} in first file", key))?;
        let second_frequency = second_aggregate
            .frequency()
            .with_context(|| format!("Cannot compute frequency at {} in second file", key))?;

        paired.first.push(first_frequency);
        paired.second.push(second_frequency);
    }

    Ok(paired)
}

/// Loads both files and returns the Pearson correlation of their shared positions.
pub fn compare_methylation<P: AsRef<Path>, Q: AsRef<Path>>(file1: P, file2: Q) -> Result<f64> {
    let first = load_methylation(file1)?;
    let second = load_methylation(file2)?;

    let paired = join_frequencies(&first, &second)?;
    info!(
        "Joined {} shared positions ({} and {} loaded)",
        paired.len(),
        first.len(),
        second.len()
    );
    if paired.is_empty() {
        warn!("No positions shared between the two files, correlation defaults to 0");
    }

    Ok(paired.correlation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use methylome::{PositionKey, SourceKind};
    use std::io::Write;
    use tempfile::Builder;

    fn tsv_set(rows: &[(&str, i64, f64, f64)]) -> MethylationSet {
        let mut set = MethylationSet::new();
        for &(chrom, pos, total, methylated) in rows {
            set.insert(
                PositionKey::site(chrom, pos),
                methylome::MethylationAggregate::new(total, methylated, SourceKind::Tsv),
            );
        }
        set
    }

    #[test]
    fn test_join_keeps_only_shared_keys() -> Result<()> {
        let first = tsv_set(&[
            ("chr1", 100, 10.0, 5.0),
            ("chr1", 200, 20.0, 20.0),
            ("chr1", 300, 4.0, 1.0),
        ]);
        let second = tsv_set(&[
            ("chr1", 100, 2.0, 1.0),
            ("chr1", 200, 5.0, 5.0),
            ("chr2", 300, 4.0, 1.0),
        ]);

        let paired = join_frequencies(&first, &second)?;

        assert_eq!(paired.len(), 2);
        assert_eq!(paired.second.len(), 2);

        let mut pairs: Vec<(f64, f64)> = paired
            .first
            .iter()
            .copied()
            .zip(paired.second.iter().copied())
            .collect();
        pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        assert_eq!(pairs, vec![(0.5, 0.5), (1.0, 1.0)]);

        Ok(())
    }

    #[test]
    fn test_join_disjoint_sets_is_empty() -> Result<()> {
        let first = tsv_set(&[("chr1", 100, 10.0, 5.0)]);
        let second = tsv_set(&[("chr1", 101, 10.0, 5.0)]);

        let paired = join_frequencies(&first, &second)?;

        assert!(paired.is_empty());
        assert_eq!(paired.correlation(), 0.0);
        Ok(())
    }

    #[test]
    fn test_zero_coverage_on_shared_key_fails() {
        let first = tsv_set(&[("chr1", 100, 0.0, 0.0)]);
        let second = tsv_set(&[("chr1", 100, 10.0, 5.0)]);

        let result = join_frequencies(&first, &second);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cannot compute frequency at chr1:100-100 in first file"
        );
    }

    #[test]
    fn test_zero_coverage_outside_join_is_ignored() -> Result<()> {
        let first = tsv_set(&[("chr1", 100, 10.0, 5.0), ("chr1", 500, 0.0, 0.0)]);
        let second = tsv_set(&[("chr1", 100, 10.0, 5.0)]);

        let paired = join_frequencies(&first, &second)?;
        assert_eq!(paired.len(), 1);
        Ok(())
    }

    #[test]
    fn test_compare_methylation() -> Result<()> {
        let mut tsv_file = Builder::new().suffix(".tsv").tempfile()?;
        writeln!(
            tsv_file,
            "chromosome\tstart\tend\tnum_motifs_in_group\tcalled_sites\tcalled_sites_methylated"
        )?;
        writeln!(tsv_file, "chr1\t100\t100\t1\t10\t5")?;
        writeln!(tsv_file, "chr1\t200\t200\t1\t20\t20")?;
        writeln!(tsv_file, "chr1\t300\t330\t4\t20\t0")?;

        let mut bed_file = Builder::new().suffix(".bedmethyl").tempfile()?;
        writeln!(bed_file, "chr1\t100\t101\tm\t2\t+\t100\t101\t255,0,0\t2\t50")?;
        writeln!(bed_file, "chr1\t101\t102\tm\t2\t-\t101\t102\t255,0,0\t2\t50")?;
        writeln!(bed_file, "chr1\t201\t202\tm\t6\t-\t201\t202\t255,0,0\t6\t100")?;
        writeln!(bed_file, "chr1\t300\t301\tm\t6\t+\t300\t301\t255,0,0\t6\t0")?;

        let r = compare_methylation(tsv_file.path(), bed_file.path())?;
        assert_eq!(r, 1.0);

        let r = compare_methylation(bed_file.path(), tsv_file.path())?;
        assert_eq!(r, 1.0);
        Ok(())
    }

    #[test]
    fn test_compare_unsupported_format() {
        let result = compare_methylation("sample.bed", "sample.tsv");
        assert!(result.is_err());
    }
}
