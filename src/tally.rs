use std::collections::hash_map::Entry;
use std::fmt::Display;

use rustc_hash::FxHashMap;

/// Running statistics for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl Tally {
    #[inline]
    pub const fn new() -> Tally {
        Tally {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }

    /// Incorporates one observed value.
    #[inline]
    pub fn fold(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    #[inline]
    pub fn merge(&mut self, other: &Tally) {
        self.count += other.count;
        self.sum += other.sum;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

impl Default for Tally {
    fn default() -> Tally {
        Tally::new()
    }
}

impl Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.1}/{:.1}/{:.1}", self.min, self.mean(), self.max)
    }
}

/// Folds one worker's local tallies into the run totals.
pub fn merge_into(totals: &mut FxHashMap<Vec<u8>, Tally>, local: FxHashMap<Vec<u8>, Tally>) {
    for (key, tally) in local {
        match totals.entry(key) {
            Entry::Occupied(mut e) => {
                e.get_mut().merge(&tally);
            }
            Entry::Vacant(e) => {
                e.insert(tally);
            }
        }
    }
}
