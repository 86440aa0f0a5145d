//! Sliding-window ORI candidate scan.
//!
//! A window of fixed size slides one base at a time across the genome. For
//! each window the count of its most frequent k-mer is computed, and the
//! window with the highest such count is the ORI candidate. Ties between
//! windows go to the earliest one.
//!
//! Two strategies produce identical results:
//!
//! - [`ScanStrategy::Rescan`] rebuilds every window's k-mer table from
//!   scratch, with windows distributed across threads by [`rayon`].
//! - [`ScanStrategy::Sliding`] updates a single table as the window moves and
//!   keeps a count-of-counts histogram, so each step is O(1).

use std::num::NonZeroUsize;

use clap::ValueEnum;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    error::WindowSizeError,
    kmer::{count_kmers, positions, KmerLength},
};

#[cfg(feature = "tracing")]
use tracing::{debug, info_span};

/// Minimum valid window size.
pub const MIN_WINDOW: usize = 1;

/// Window size used when none is given.
pub const DEFAULT_WINDOW: usize = 1000;

/// A validated window size (`w >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    pub fn new(window: usize) -> Result<Self, WindowSizeError> {
        NonZeroUsize::new(window).map(Self).ok_or(WindowSizeError {
            window,
            min: MIN_WINDOW,
        })
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_WINDOW - 1))
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which window start positions are examined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowBound {
    /// Starts `0..N - w`: the window ending exactly at the genome end is skipped.
    #[default]
    Exclusive,
    /// Starts `0..=N - w`: every full window is examined.
    Inclusive,
}

impl WindowBound {
    /// Number of window starts for a genome of length `len`.
    pub const fn starts(self, len: usize, window: usize) -> usize {
        match (self, len.checked_sub(window)) {
            (_, None) => 0,
            (Self::Exclusive, Some(last)) => last,
            (Self::Inclusive, Some(last)) => last + 1,
        }
    }
}

/// How window k-mer tables are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStrategy {
    /// Incremental table update with O(1) work per window step.
    #[default]
    Sliding,
    /// Recount every window from scratch, in parallel.
    Rescan,
}

impl std::fmt::Display for ScanStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sliding => write!(f, "sliding"),
            Self::Rescan => write!(f, "rescan"),
        }
    }
}

/// Parameters of an ORI scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanParams {
    pub k: KmerLength,
    pub window: WindowSize,
    /// Windows whose top k-mer count is below this are never candidates.
    pub min_occurrences: u64,
    pub bound: WindowBound,
    pub strategy: ScanStrategy,
}

impl ScanParams {
    /// Scan parameters with default threshold, bound and strategy.
    pub const fn new(k: KmerLength, window: WindowSize) -> Self {
        Self {
            k,
            window,
            min_occurrences: 1,
            bound: WindowBound::Exclusive,
            strategy: ScanStrategy::Sliding,
        }
    }

    #[must_use]
    pub const fn min_occurrences(mut self, min_occurrences: u64) -> Self {
        self.min_occurrences = min_occurrences;
        self
    }

    #[must_use]
    pub const fn bound(mut self, bound: WindowBound) -> Self {
        self.bound = bound;
        self
    }

    #[must_use]
    pub const fn strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// The winning window of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OriCandidate {
    /// Start offset of the window.
    pub position: usize,
    pub window_size: usize,
    /// Count of the most frequent k-mer in the window.
    pub max_count: u64,
    /// The k-mer reaching `max_count`; the lexicographically smallest on ties.
    pub kmer: String,
}

/// Finds the window whose most frequent k-mer occurs the most times.
///
/// Returns `None` when no window is examined (the genome is not longer than
/// the window under [`WindowBound::Exclusive`]), when the window is shorter
/// than `k`, or when no window reaches `min_occurrences`.
///
/// # Example
///
/// ```rust
/// use orifinder::kmer::KmerLength;
/// use orifinder::scan::{find_ori_candidate, ScanParams, WindowSize};
///
/// let params = ScanParams::new(KmerLength::new(2)?, WindowSize::new(3)?);
/// let candidate = find_ori_candidate(b"AAAA", &params).unwrap();
///
/// assert_eq!(candidate.position, 0);
/// assert_eq!(candidate.max_count, 2);
/// assert_eq!(candidate.kmer, "AA");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn find_ori_candidate(seq: &[u8], params: &ScanParams) -> Option<OriCandidate> {
    let k = params.k.get();
    let window = params.window.get();
    let starts = params.bound.starts(seq.len(), window);

    #[cfg(feature = "tracing")]
    let _span = info_span!(
        "ori_scan",
        k,
        window,
        starts,
        strategy = %params.strategy
    )
    .entered();

    if starts == 0 || window < k {
        #[cfg(feature = "tracing")]
        debug!(len = seq.len(), "No window to scan");
        return None;
    }

    let best = match params.strategy {
        ScanStrategy::Rescan => rescan(seq, k, window, starts),
        ScanStrategy::Sliding => sliding(seq, k, window, starts),
    }
    .filter(|&(_, count)| count >= params.min_occurrences)?;

    let (position, max_count) = best;
    let top = count_kmers(&seq[position..position + window], k).most_frequent()?;

    #[cfg(feature = "tracing")]
    debug!(position, max_count, kmer = %top.kmer, "Best window");

    Some(OriCandidate {
        position,
        window_size: window,
        max_count,
        kmer: top.kmer,
    })
}

/// Higher count wins; on equal counts the earlier window wins.
fn better(a: (usize, u64), b: (usize, u64)) -> (usize, u64) {
    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}

fn window_max(window: &[u8], k: usize) -> u64 {
    let mut counts: FxHashMap<&[u8], u64> = FxHashMap::default();
    let mut max = 0;
    for kmer in window.windows(k) {
        let count = counts.entry(kmer).or_insert(0);
        *count += 1;
        max = max.max(*count);
    }
    max
}

fn rescan(seq: &[u8], k: usize, window: usize, starts: usize) -> Option<(usize, u64)> {
    (0..starts)
        .into_par_iter()
        .map(|i| (i, window_max(&seq[i..i + window], k)))
        .reduce_with(better)
}

/// One window's k-mer counts plus the number of distinct k-mers at each count.
struct WindowTally<'a> {
    counts: FxHashMap<&'a [u8], u64>,
    histogram: Vec<u64>,
    max: u64,
}

impl<'a> WindowTally<'a> {
    fn new(kmers_per_window: usize) -> Self {
        Self {
            counts: FxHashMap::default(),
            histogram: vec![0; kmers_per_window + 1],
            max: 0,
        }
    }

    fn add(&mut self, kmer: &'a [u8]) {
        let count = self.counts.entry(kmer).or_insert(0);
        if *count > 0 {
            self.histogram[slot(*count)] -= 1;
        }
        *count += 1;
        self.histogram[slot(*count)] += 1;
        self.max = self.max.max(*count);
    }

    fn remove(&mut self, kmer: &[u8]) {
        let Some(count) = self.counts.get_mut(kmer) else {
            return;
        };
        let old = *count;
        self.histogram[slot(old)] -= 1;
        *count -= 1;
        if *count == 0 {
            self.counts.remove(kmer);
        } else {
            self.histogram[slot(old - 1)] += 1;
        }
        if old == self.max && self.histogram[slot(old)] == 0 {
            self.max = old - 1;
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn slot(count: u64) -> usize {
    count as usize
}

fn sliding(seq: &[u8], k: usize, window: usize, starts: usize) -> Option<(usize, u64)> {
    let per_window = positions(window, k);
    let mut tally = WindowTally::new(per_window);
    for kmer in seq[..window].windows(k) {
        tally.add(kmer);
    }

    let mut best = (0, tally.max);
    for i in 1..starts {
        tally.remove(&seq[i - 1..i - 1 + k]);
        let entering = i + per_window - 1;
        tally.add(&seq[entering..entering + k]);
        if tally.max > best.1 {
            best = (i, tally.max);
        }
    }
    Some(best)
}
