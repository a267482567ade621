use std::fmt::Write;

use rustc_hash::FxHashMap;

use crate::tally::Tally;

/// Renders the final aggregate state as the single summary line:
/// `{key=min/mean/max, ...}`, keys ascending by byte order, every number
/// with exactly one fractional digit. Pure function of the totals, so
/// re-rendering an unchanged map is byte-identical.
pub fn render(totals: &FxHashMap<Vec<u8>, Tally>) -> String {
    let mut entries: Vec<_> = totals.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut out = String::with_capacity(entries.len() * 24 + 2);
    out.push('{');
    for (i, (key, tally)) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}={tally}", String::from_utf8_lossy(key));
    }
    out.push('}');
    out
}
