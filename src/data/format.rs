use anyhow::{bail, Result};
use log::{info, warn};
use std::{fmt::Display, path::Path, time::Instant};

use humantime::format_duration;

use super::{bedmethyl::load_bedmethyl, tsv::load_tsv, MethylationSet};

/// Input layouts, chosen purely from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethylationFormat {
    /// Grouped-interval frequency table with a header row.
    Tsv,
    /// Headerless per-base bedMethyl.
    BedMethyl,
}

impl MethylationFormat {
    /// "bedmethyl" is tested before "tsv", so `sample.bedmethyl.tsv` reads as bedMethyl.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path.as_ref().to_string_lossy();

        if name.contains("bedmethyl") {
            Ok(MethylationFormat::BedMethyl)
        } else if name.contains("tsv") {
            Ok(MethylationFormat::Tsv)
        } else {
            bail!(
                "Unknown methylation file format: '{}'. Supported ones are .tsv and .bedmethyl",
                name
            )
        }
    }
}

impl Display for MethylationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = match self {
            MethylationFormat::Tsv => "tsv",
            MethylationFormat::BedMethyl => "bedmethyl",
        };
        write!(f, "{}", txt)
    }
}

pub fn load_methylation<P: AsRef<Path>>(path: P) -> Result<MethylationSet> {
    let path = path.as_ref();
    let format = MethylationFormat::from_path(path)?;

    info!("Loading {:?} as {}", path, format);
    let loading_duration = Instant::now();

    let set = match format {
        MethylationFormat::BedMethyl => load_bedmethyl(path)?,
        MethylationFormat::Tsv => load_tsv(path)?,
    };

    info!(
        "Loaded {} positions from {:?} in {}",
        set.len(),
        path,
        format_duration(loading_duration.elapsed())
    );
    if set.is_empty() {
        warn!("No usable positions found in {:?}", path);
    }

    Ok(set)
}
