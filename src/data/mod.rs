pub mod bedmethyl;
pub mod format;
pub mod tsv;

use ahash::AHashMap;
use anyhow::{Context, Result};
use bytesize::ByteSize;
use indicatif::{ProgressBar, ProgressBarIter, ProgressState, ProgressStyle};
use methylome::{MethylationAggregate, PositionKey, SourceKind};
use std::{
    fmt::Write,
    fs::File,
    io::BufReader,
    path::Path,
};

pub use format::load_methylation;

/// Per-position read counts loaded from a single file.
#[derive(Debug, Default)]
pub struct MethylationSet {
    positions: AHashMap<PositionKey, MethylationAggregate>,
}

impl MethylationSet {
    pub fn new() -> Self {
        Self {
            positions: AHashMap::new(),
        }
    }

    /// Stores `aggregate` under `key`, replacing whatever was there.
    pub fn insert(
        &mut self,
        key: PositionKey,
        aggregate: MethylationAggregate,
    ) -> Option<MethylationAggregate> {
        self.positions.insert(key, aggregate)
    }

    /// Adds the counts to the aggregate under `key`, creating it on first sight.
    pub fn accumulate(
        &mut self,
        key: PositionKey,
        reads_total: f64,
        reads_methylated: f64,
        source_kind: SourceKind,
    ) {
        self.positions
            .entry(key)
            .and_modify(|aggregate| aggregate.accumulate(reads_total, reads_methylated))
            .or_insert_with(|| {
                MethylationAggregate::new(reads_total, reads_methylated, source_kind)
            });
    }

    pub fn get(&self, key: &PositionKey) -> Option<&MethylationAggregate> {
        self.positions.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PositionKey, &MethylationAggregate)> {
        self.positions.iter()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Opens `path` for buffered reading, reporting progress in bytes while it is consumed.
pub(crate) fn open_with_progress(
    path: &Path,
) -> Result<(BufReader<ProgressBarIter<File>>, ProgressBar)> {
    let file =
        File::open(path).with_context(|| format!("Error opening file: {:?}", path))?;
    let file_size = file
        .metadata()
        .with_context(|| format!("Error reading metadata of: {:?}", path))?
        .len();
    let human_readable_size = ByteSize::b(file_size).to_string();

    let pb = ProgressBar::new(file_size);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes:>8}/{total_bytes:>8} ({percent}%)",
        )?
        .with_key("bytes", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{}", ByteSize::b(state.pos()));
        })
        .with_key("total_bytes", move |_state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{}", human_readable_size);
        })
        .progress_chars("#>-"),
    );

    Ok((BufReader::new(pb.wrap_read(file)), pb))
}
