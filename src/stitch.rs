use crate::Error;

/// Partial records cut off at the edges of a scanned byte range.
///
/// `prefix` is `Some` only when the range contained at least one record
/// separator; a range with none carries its entire content in `suffix`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub prefix: Option<Vec<u8>>,
    pub suffix: Vec<u8>,
}

/// Reassembles complete records across an ordered run of adjacent parts.
///
/// The pending suffix carry is joined with the next part's prefix, suffix
/// first; parts that never saw a record separator are absorbed whole into
/// the carry. The first reconstruction is the residual prefix of the
/// combined span, every later one is a complete record handed to `fold`
/// together with the index of the part whose prefix completed it. The
/// same routine serves sub-ranges within a chunk and chunk residuals
/// across the file.
pub fn stitch<I, F>(parts: I, mut fold: F) -> Result<Fragments, Error>
where
    I: IntoIterator<Item = Fragments>,
    F: FnMut(usize, &[u8]) -> Result<(), Error>,
{
    let mut lead: Option<Vec<u8>> = None;
    let mut carry: Vec<u8> = Vec::new();
    for (index, part) in parts.into_iter().enumerate() {
        let Some(prefix) = part.prefix else {
            carry.extend_from_slice(&part.suffix);
            continue;
        };
        let mut record = std::mem::replace(&mut carry, part.suffix);
        record.extend_from_slice(&prefix);
        if lead.is_none() {
            lead = Some(record);
        } else {
            fold(index, &record)?;
        }
    }
    Ok(Fragments {
        prefix: lead,
        suffix: carry,
    })
}
