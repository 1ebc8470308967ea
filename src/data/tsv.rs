use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use methylome::{MethylationAggregate, PositionKey, SourceKind};
use std::{io::Read, path::Path, str::FromStr};

use super::{open_with_progress, MethylationSet};

/// Positions of the required columns of a grouped-interval methylation frequency tsv.
///
/// Columns are found by header name; any other columns are ignored, and rows
/// may be shorter or longer than the header as long as the required fields are present.
#[derive(Debug, PartialEq)]
pub struct TsvColumns {
    chromosome: usize,
    start: usize,
    end: usize,
    num_motifs_in_group: usize,
    called_sites: usize,
    called_sites_methylated: usize,
}

impl TsvColumns {
    pub fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index_of = |column: &str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| anyhow!("Missing column '{}' in tsv header", column))
        };

        Ok(Self {
            chromosome: index_of("chromosome")?,
            start: index_of("start")?,
            end: index_of("end")?,
            num_motifs_in_group: index_of("num_motifs_in_group")?,
            called_sites: index_of("called_sites")?,
            called_sites_methylated: index_of("called_sites_methylated")?,
        })
    }
}

fn get_field<'r>(record: &'r StringRecord, index: usize, column: &str) -> Result<&'r str> {
    record
        .get(index)
        .ok_or_else(|| anyhow!("Missing {} field", column))
}

fn parse_field<T>(record: &StringRecord, index: usize, column: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = get_field(record, index, column)?;
    value
        .parse()
        .with_context(|| format!("Invalid {}: '{}'", column, value))
}

pub fn load_tsv<P: AsRef<Path>>(path: P) -> Result<MethylationSet> {
    let path = path.as_ref();
    let (reader, pb) = open_with_progress(path)?;

    let set = read_tsv(reader).with_context(|| format!("Error parsing tsv file: {:?}", path))?;
    pb.finish_and_clear();

    Ok(set)
}

pub fn read_tsv<R: Read>(reader: R) -> Result<MethylationSet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let columns = TsvColumns::from_headers(rdr.headers().context("Failed to read tsv header")?)?;
    let mut record = StringRecord::new();

    let mut set = MethylationSet::new();
    let mut skipped_groups = 0;
    let mut rows_processed = 0;

    while rdr
        .read_record(&mut record)
        .context("Failed to read tsv record")?
    {
        rows_processed += 1;
        let row_context = || format!("Invalid tsv record at row {}", rows_processed);

        let chromosome =
            get_field(&record, columns.chromosome, "chromosome").with_context(row_context)?;
        let start_str = get_field(&record, columns.start, "start").with_context(row_context)?;
        let end_str = get_field(&record, columns.end, "end").with_context(row_context)?;

        let num_motifs_in_group: i64 =
            parse_field(&record, columns.num_motifs_in_group, "num_motifs_in_group")
                .with_context(row_context)?;

        // Groups spanning several motifs cannot be matched to a single site.
        if num_motifs_in_group > 1 {
            skipped_groups += 1;
            continue;
        }

        let start = start_str
            .parse::<i64>()
            .with_context(|| format!("Invalid start: '{}'", start_str))
            .with_context(row_context)?;
        let end = end_str
            .parse::<i64>()
            .with_context(|| format!("Invalid end: '{}'", end_str))
            .with_context(row_context)?;
        let called_sites: u64 =
            parse_field(&record, columns.called_sites, "called_sites").with_context(row_context)?;
        let called_sites_methylated: u64 = parse_field(
            &record,
            columns.called_sites_methylated,
            "called_sites_methylated",
        )
        .with_context(row_context)?;

        let key = PositionKey::new(chromosome, start, end);
        let aggregate = MethylationAggregate::new(
            called_sites as f64,
            called_sites_methylated as f64,
            SourceKind::Tsv,
        );
        if !aggregate.is_consistent() {
            warn!(
                "More methylated calls than called sites at {}: {} > {}",
                key, called_sites_methylated, called_sites
            );
        }

        if set.insert(key.clone(), aggregate).is_some() {
            debug!("Duplicate position {} in tsv, keeping the later row", key);
        }
    }

    debug!(
        "Read {} singleton positions from {} tsv rows, skipped {} multi-motif groups",
        set.len(),
        rows_processed,
        skipped_groups
    );

    Ok(set)
}
