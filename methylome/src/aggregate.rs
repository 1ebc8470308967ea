use anyhow::{bail, Result};
use std::fmt::Display;

/// Which loader produced an aggregate. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Tsv,
    BedMethyl,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = match self {
            SourceKind::Tsv => "tsv",
            SourceKind::BedMethyl => "bedmethyl",
        };
        write!(f, "{}", txt)
    }
}

/// Read counts observed at a single position.
///
/// `reads_methylated <= reads_total` is expected but not enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethylationAggregate {
    reads_total: f64,
    reads_methylated: f64,
    source_kind: SourceKind,
}

impl MethylationAggregate {
    pub fn new(reads_total: f64, reads_methylated: f64, source_kind: SourceKind) -> Self {
        Self {
            reads_total,
            reads_methylated,
            source_kind,
        }
    }

    pub fn accumulate(&mut self, reads_total: f64, reads_methylated: f64) {
        self.reads_total += reads_total;
        self.reads_methylated += reads_methylated;
    }

    /// Fraction of reads called methylated.
    ///
    /// # Errors
    /// Fails when no reads cover the position.
    pub fn frequency(&self) -> Result<f64> {
        if self.reads_total == 0.0 {
            bail!(
                "Division by zero: position has no read coverage ({} methylated reads, source: {})",
                self.reads_methylated,
                self.source_kind
            );
        }
        Ok(self.reads_methylated / self.reads_total)
    }

    pub fn reads_total(&self) -> f64 {
        self.reads_total
    }

    pub fn reads_methylated(&self) -> f64 {
        self.reads_methylated
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub fn is_consistent(&self) -> bool {
        self.reads_methylated <= self.reads_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency() -> Result<()> {
        let aggregate = MethylationAggregate::new(10.0, 5.0, SourceKind::Tsv);
        assert_eq!(aggregate.frequency()?, 0.5);
        Ok(())
    }

    #[test]
    fn test_accumulate() -> Result<()> {
        let mut aggregate = MethylationAggregate::new(10.0, 2.0, SourceKind::BedMethyl);
        aggregate.accumulate(10.0, 8.0);

        assert_eq!(aggregate.reads_total(), 20.0);
        assert_eq!(aggregate.reads_methylated(), 10.0);
        assert_eq!(aggregate.frequency()?, 0.5);
        assert_eq!(aggregate.source_kind(), SourceKind::BedMethyl);
        Ok(())
    }

    #[test]
    fn test_zero_coverage_frequency_fails() {
        let aggregate = MethylationAggregate::new(0.0, 0.0, SourceKind::Tsv);
        let result = aggregate.frequency();

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Division by zero: position has no read coverage (0 methylated reads, source: tsv)"
        );
    }

    #[test]
    fn test_inconsistent_counts_are_kept() {
        let aggregate = MethylationAggregate::new(2.0, 3.0, SourceKind::Tsv);
        assert!(!aggregate.is_consistent());
        assert_eq!(aggregate.frequency().unwrap(), 1.5);
    }
}
