use std::ops::Range;

use memchr::{memchr, memchr_iter};
use rustc_hash::FxHashMap;

use crate::chunk::FileChunk;
use crate::stitch::Fragments;
use crate::tally::Tally;
use crate::{Error, MalformedRecord};

/// Everything one worker produces from its sub-range: locally aggregated
/// complete records, the deferred boundary fragments, and any malformed
/// records it ran into.
#[derive(Debug)]
pub struct RangeOutput {
    pub tallies: FxHashMap<Vec<u8>, Tally>,
    pub fragments: Fragments,
    pub warnings: Vec<MalformedRecord>,
}

/// Single pass over one sub-range of a chunk.
///
/// Bytes before the first newline may complete a record cut off by the
/// previous sub-range and are deferred as the prefix fragment; interior
/// records are folded in place; bytes after the last newline are
/// deferred as the suffix fragment. A sub-range with no newline defers
/// its entire content as the suffix.
pub fn scan_range(chunk: &FileChunk, span: Range<usize>) -> Result<RangeOutput, Error> {
    let bytes = &chunk.as_bytes()[span];
    // estimate entries from the range size to avoid rehashing
    let estimated = (bytes.len() / 256).max(8);
    let mut tallies = FxHashMap::with_capacity_and_hasher(estimated, Default::default());
    let mut warnings = Vec::new();

    let mut prefix = None;
    let mut rec_start = 0;
    for nl in memchr_iter(b'\n', bytes) {
        if prefix.is_none() {
            prefix = Some(bytes[..nl].to_vec());
        } else {
            fold_line(&bytes[rec_start..nl], chunk.index(), &mut tallies, &mut warnings)?;
        }
        rec_start = nl + 1;
    }

    let fragments = Fragments {
        prefix,
        suffix: bytes[rec_start..].to_vec(),
    };
    Ok(RangeOutput {
        tallies,
        fragments,
        warnings,
    })
}

/// Folds one complete `name;value` record. A record with no field
/// separator is collected as a warning and dropped; a value that does
/// not parse as a number is fatal.
pub fn fold_line(
    line: &[u8],
    chunk: usize,
    tallies: &mut FxHashMap<Vec<u8>, Tally>,
    warnings: &mut Vec<MalformedRecord>,
) -> Result<(), Error> {
    let Some(semi) = memchr(b';', line) else {
        warnings.push(MalformedRecord {
            chunk,
            bytes: line.to_vec(),
        });
        return Ok(());
    };
    let value = decode_value(&line[semi + 1..]).ok_or_else(|| Error::InvalidValue {
        chunk,
        record: String::from_utf8_lossy(line).into_owned(),
    })?;
    if let Some(tally) = tallies.get_mut(&line[..semi]) {
        tally.fold(value);
    } else {
        let mut tally = Tally::new();
        tally.fold(value);
        tallies.insert(line[..semi].to_vec(), tally);
    }
    Ok(())
}

fn decode_value(raw: &[u8]) -> Option<f64> {
    std::str::from_utf8(raw).ok()?.parse().ok()
}
