use anyhow::{anyhow, Context, Result};
use std::{fmt::Display, str::FromStr};

/// Builds the canonical `<chromosome>:<start>-<end>` string for a genomic interval.
///
/// # Examples
/// ```
/// use methylome::make_key;
///
/// assert_eq!(make_key("chr1", 100, 100), "chr1:100-100");
/// ```
pub fn make_key(chromosome: &str, start: i64, end: i64) -> String {
    format!("{}:{}-{}", chromosome, start, end)
}

/// Inverse of [`make_key`].
pub fn parse_key(key: &str) -> Result<(String, i64, i64)> {
    let position_key = PositionKey::from_str(key)?;
    Ok((position_key.chromosome, position_key.start, position_key.end))
}

/// Join key shared by both input formats.
///
/// Two keys are equal exactly when their rendered `chromosome:start-end` strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
}

impl PositionKey {
    pub fn new(chromosome: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
        }
    }

    /// Single base key, as produced for bedMethyl sites.
    pub fn site(chromosome: impl Into<String>, position: i64) -> Self {
        Self::new(chromosome, position, position)
    }
}

impl Display for PositionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", make_key(&self.chromosome, self.start, self.end))
    }
}

impl FromStr for PositionKey {
    type Err = anyhow::Error;

    fn from_str(key: &str) -> Result<Self> {
        let (chromosome, interval) = key
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("Position key '{}' is missing ':' separator", key))?;

        if chromosome.is_empty() {
            anyhow::bail!("Position key '{}' has an empty chromosome", key);
        }

        // The start may itself be negative, so search for the separator after its first character.
        let separator = interval
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i)
            .ok_or_else(|| anyhow!("Position key '{}' is missing '-' separator", key))?;

        let (start_str, end_str) = (&interval[..separator], &interval[separator + 1..]);

        let start = start_str
            .parse()
            .with_context(|| format!("Invalid start '{}' in position key '{}'", start_str, key))?;
        let end = end_str
            .parse()
            .with_context(|| format!("Invalid end '{}' in position key '{}'", end_str, key))?;

        Ok(Self::new(chromosome, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_key() {
        assert_eq!(make_key("chr1", 100, 200), "chr1:100-200");
        assert_eq!(make_key("contig_3", -1, -1), "contig_3:-1--1");
    }

    #[test]
    fn test_display_matches_make_key() {
        let key = PositionKey::new("chr2", 5, 6);
        assert_eq!(key.to_string(), make_key("chr2", 5, 6));
        assert_eq!(PositionKey::site("chr2", 7).to_string(), "chr2:7-7");
    }

    #[test]
    fn test_parse_key() -> Result<()> {
        assert_eq!(parse_key("chr1:100-200")?, ("chr1".to_string(), 100, 200));
        assert_eq!(parse_key("chr1:-1--1")?, ("chr1".to_string(), -1, -1));
        assert_eq!(
            parse_key("HLA-A*01:01:10-12")?,
            ("HLA-A*01:01".to_string(), 10, 12)
        );
        Ok(())
    }

    #[test]
    fn test_parse_invalid_key() {
        assert!(parse_key("chr1").is_err());
        assert!(parse_key("chr1:100").is_err());
        assert!(parse_key(":1-2").is_err());
        assert!(parse_key("chr1:a-2").is_err());
    }

    #[test]
    fn test_equal_keys_hash_together() {
        use std::collections::HashSet;

        let mut keys = HashSet::new();
        keys.insert(PositionKey::site("chr1", 100));
        keys.insert(PositionKey::new("chr1", 100, 100));
        keys.insert(PositionKey::from_str("chr1:100-100").unwrap());

        assert_eq!(keys.len(), 1);
    }
}
