//! Per-key min/mean/max statistics over large `name;value` measurement
//! files, computed by scanning disjoint byte ranges of the file in
//! parallel and stitching the records cut apart at range boundaries so
//! that every record is counted exactly once.

use std::fmt::{self, Display};
use std::io;
use std::num::NonZeroUsize;
use std::path::Path;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use thiserror::Error;

pub mod chunk;
pub mod report;
pub mod scan;
pub mod stitch;
pub mod tally;

use chunk::ChunkReader;
use scan::{fold_line, scan_range, RangeOutput};
use stitch::stitch;
use tally::{merge_into, Tally};

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("chunk {chunk}: unparseable value in record {record:?}")]
    InvalidValue { chunk: usize, record: String },
}

/// A complete record that ended without a field separator. Reported and
/// dropped from aggregation; the run continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRecord {
    pub chunk: usize,
    pub bytes: Vec<u8>,
}

impl Display for MalformedRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "chunk {}: record without field separator: {}",
            self.chunk,
            String::from_utf8_lossy(&self.bytes)
        )
    }
}

/// Degree of parallelism. Both counts are normalized to at least 1; the
/// splitter emits one extra remainder chunk and each chunk gets one
/// extra remainder sub-range.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Top-level file chunk count.
    pub chunks: usize,
    /// Sub-ranges per chunk, nominally one per core.
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Settings {
        let cores = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Settings {
            chunks: 8,
            workers: cores,
        }
    }
}

/// Final aggregates plus the malformed records collected along the way.
#[derive(Debug)]
pub struct Summary {
    pub totals: FxHashMap<Vec<u8>, Tally>,
    pub warnings: Vec<MalformedRecord>,
}

impl Summary {
    pub fn render(&self) -> String {
        report::render(&self.totals)
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Runs the whole pipeline over `path`.
///
/// Chunks are read and processed one after another; within a chunk the
/// sub-ranges are scanned on the rayon pool and joined before their
/// fragments are stitched. Chunk residuals are stitched across the file
/// at the end, and the file-level leading fragment (the file's first
/// record) is folded last.
pub fn summarize(path: impl AsRef<Path>, settings: &Settings) -> Result<Summary, Error> {
    let workers = settings.workers.max(1);
    let mut reader = ChunkReader::open(path.as_ref(), settings.chunks)?;

    let mut totals = FxHashMap::default();
    let mut warnings = Vec::new();
    let mut residuals = Vec::with_capacity(reader.chunk_count() + 1);

    while let Some(chunk) = reader.next_chunk()? {
        let outputs = chunk
            .subranges(workers)
            .into_par_iter()
            .map(|span| scan_range(&chunk, span))
            .collect::<Result<Vec<RangeOutput>, Error>>()?;

        let mut fragments = Vec::with_capacity(outputs.len());
        for output in outputs {
            merge_into(&mut totals, output.tallies);
            warnings.extend(output.warnings);
            fragments.push(output.fragments);
        }
        let residual = stitch(fragments, |_, record| {
            fold_line(record, chunk.index(), &mut totals, &mut warnings)
        })?;
        residuals.push(residual);
    }

    let leftover = stitch(residuals, |right, record| {
        fold_line(record, right, &mut totals, &mut warnings)
    })?;
    // The file-level prefix is the file's first record; a non-empty
    // file-level suffix is a final record missing its terminator.
    if let Some(lead) = leftover.prefix {
        fold_line(&lead, 0, &mut totals, &mut warnings)?;
    }
    if !leftover.suffix.is_empty() {
        fold_line(&leftover.suffix, reader.chunk_count(), &mut totals, &mut warnings)?;
    }

    Ok(Summary { totals, warnings })
}
