use std::fmt::Display;

use anyhow::{bail, Result};

#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Strand {
    Positive,
    Negative,
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
        };
        write!(f, "{}", txt)
    }
}

impl Strand {
    pub fn from_str(strand: &str) -> Result<Self> {
        match strand {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            _ => bail!("Could not parse '{}' to Strand", strand),
        }
    }

    /// Lenient parser for the strand column of a bedMethyl line.
    ///
    /// Only `+` is forward; every other value (`-`, `.`, ...) is treated as the reverse strand.
    pub fn from_bedmethyl_code(strand: &str) -> Self {
        if strand == "+" {
            Strand::Positive
        } else {
            Strand::Negative
        }
    }

    /// Shift a reverse strand coordinate onto the forward strand base of the same CpG site.
    pub fn normalize_position(&self, position: i64) -> i64 {
        match self {
            Strand::Positive => position,
            Strand::Negative => position - 1,
        }
    }
}
