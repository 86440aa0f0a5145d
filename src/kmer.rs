//! K-mer frequency tables.
//!
//! A [`KmerTable`] maps every contiguous length-`k` substring of a span to the
//! number of times it occurs there, overlapping occurrences included. No
//! normalization is applied: `acgt` and `ACGT` are different k-mers, and
//! ambiguity codes such as `N` are counted like any other byte.

use std::{cmp::Reverse, hash::BuildHasherDefault, num::NonZeroUsize};

use bytes::Bytes;
use dashmap::DashMap;
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;

use crate::error::KmerLengthError;

/// Minimum valid k-mer length.
pub const MIN_K: usize = 1;

/// K-mer length used when none is given.
pub const DEFAULT_K: usize = 12;

/// A validated k-mer length (`k >= 1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KmerLength(NonZeroUsize);

impl KmerLength {
    /// Validates a k-mer length.
    ///
    /// ```
    /// use orifinder::kmer::KmerLength;
    ///
    /// assert_eq!(KmerLength::new(12)?.get(), 12);
    /// assert!(KmerLength::new(0).is_err());
    /// # Ok::<(), orifinder::error::KmerLengthError>(())
    /// ```
    pub fn new(k: usize) -> Result<Self, KmerLengthError> {
        NonZeroUsize::new(k)
            .map(Self)
            .ok_or(KmerLengthError { k, min: MIN_K })
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for KmerLength {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(DEFAULT_K - 1))
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A k-mer with its count, used for ranking and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KmerFrequency {
    /// The k-mer as text. Printable ASCII is kept as-is; other bytes are
    /// escaped (`\xNN`), so distinct k-mers always render distinctly.
    pub kmer: String,
    pub count: u64,
}

impl KmerFrequency {
    fn new(kmer: &[u8], count: u64) -> Self {
        Self {
            kmer: kmer.escape_ascii().to_string(),
            count,
        }
    }
}

/// A custom `DashMap` w/ `FxHasher`.
type DashFx = DashMap<Bytes, u64, BuildHasherDefault<FxHasher>>;

/// Frequency table of the length-`k` substrings of one span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KmerTable {
    k: usize,
    counts: FxHashMap<Bytes, u64>,
}

impl KmerTable {
    /// Counts the k-mers of `seq` sequentially.
    ///
    /// Keys are zero-copy slices of `seq`. Returns an empty table when
    /// `k == 0` or `k > seq.len()`.
    ///
    /// ```
    /// use bytes::Bytes;
    /// use orifinder::kmer::KmerTable;
    ///
    /// let table = KmerTable::count(&Bytes::from_static(b"ATATAT"), 2);
    /// assert_eq!(table.get(b"AT"), Some(3));
    /// assert_eq!(table.get(b"TA"), Some(2));
    /// assert_eq!(table.total(), 5);
    /// ```
    pub fn count(seq: &Bytes, k: usize) -> Self {
        let mut counts = FxHashMap::default();
        for i in 0..positions(seq.len(), k) {
            *counts.entry(seq.slice(i..i + k)).or_insert(0) += 1;
        }
        Self { k, counts }
    }

    /// Counts the k-mers of `seq` in parallel.
    ///
    /// Positions are distributed with [`rayon`] and merged into a `DashMap`
    /// with `FxHasher`; the result equals [`KmerTable::count`].
    pub fn count_parallel(seq: &Bytes, k: usize) -> Self {
        let map: DashFx = DashMap::with_hasher(BuildHasherDefault::<FxHasher>::default());

        (0..positions(seq.len(), k))
            .into_par_iter()
            .for_each(|i| *map.entry(seq.slice(i..i + k)).or_insert(0) += 1);

        Self {
            k,
            counts: map.into_iter().collect(),
        }
    }

    /// The k-mer length this table was built with.
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Count of `kmer`, if it occurs.
    pub fn get(&self, kmer: &[u8]) -> Option<u64> {
        self.counts.get(kmer).copied()
    }

    /// Number of distinct k-mers.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of k-mer positions in the span.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(kmer, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> + '_ {
        self.counts.iter().map(|(kmer, &count)| (kmer.as_ref(), count))
    }

    /// The most frequent k-mer; ties go to the lexicographically smallest.
    ///
    /// ```
    /// use orifinder::kmer::count_kmers;
    ///
    /// let top = count_kmers(b"GGAA", 1).most_frequent().unwrap();
    /// assert_eq!(top.kmer, "A");
    /// assert_eq!(top.count, 2);
    /// ```
    pub fn most_frequent(&self) -> Option<KmerFrequency> {
        self.counts
            .iter()
            .min_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)))
            .map(|(kmer, &count)| KmerFrequency::new(kmer, count))
    }

    /// The `n` most frequent k-mers.
    ///
    /// Sorted by count descending, ties by k-mer ascending, so the ranking is
    /// reproducible across runs.
    pub fn top(&self, n: usize) -> Vec<KmerFrequency> {
        let mut ranked: Vec<(&Bytes, u64)> =
            self.counts.iter().map(|(kmer, &count)| (kmer, count)).collect();
        ranked.sort_unstable_by_key(|&(kmer, count)| (Reverse(count), kmer));
        ranked
            .into_iter()
            .take(n)
            .map(|(kmer, count)| KmerFrequency::new(kmer, count))
            .collect()
    }
}

/// Counts the k-mers of a byte slice.
///
/// Convenience wrapper over [`KmerTable::count`] for borrowed input.
///
/// ```
/// use orifinder::kmer::count_kmers;
///
/// assert!(count_kmers(b"ACG", 4).is_empty());
/// assert_eq!(count_kmers(b"ACG", 3).len(), 1);
/// ```
pub fn count_kmers(seq: &[u8], k: usize) -> KmerTable {
    KmerTable::count(&Bytes::copy_from_slice(seq), k)
}

/// Number of length-`k` substrings in a span of length `len`.
pub(crate) const fn positions(len: usize, k: usize) -> usize {
    if k == 0 || k > len {
        0
    } else {
        len - k + 1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn atatat_k2() {
        let table = count_kmers(b"ATATAT", 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b"AT"), Some(3));
        assert_eq!(table.get(b"TA"), Some(2));
        assert_eq!(table.k(), 2);
    }

    #[test]
    fn top_one_of_atatat() {
        let top = count_kmers(b"ATATAT", 2).top(1);
        assert_eq!(
            top,
            vec![KmerFrequency {
                kmer: "AT".to_string(),
                count: 3
            }]
        );
    }

    #[test]
    fn k_larger_than_sequence_is_empty() {
        assert!(count_kmers(b"ACGT", 5).is_empty());
        assert!(count_kmers(b"", 1).is_empty());
    }

    #[test]
    fn k_zero_is_empty() {
        assert!(count_kmers(b"ACGT", 0).is_empty());
    }

    #[test]
    fn no_case_normalization() {
        let table = count_kmers(b"acgtACGT", 4);
        assert_eq!(table.get(b"acgt"), Some(1));
        assert_eq!(table.get(b"ACGT"), Some(1));
    }

    #[test]
    fn ambiguity_codes_are_counted() {
        let table = count_kmers(b"NNN", 2);
        assert_eq!(table.get(b"NN"), Some(2));
    }

    #[test]
    fn total_counts_every_position() {
        let table = count_kmers(b"GATTACA", 3);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn top_breaks_ties_lexicographically() {
        let top = count_kmers(b"TTGGCCAA", 1).top(4);
        let kmers: Vec<_> = top.iter().map(|f| f.kmer.as_str()).collect();
        assert_eq!(kmers, vec!["A", "C", "G", "T"]);
        assert!(top.iter().all(|f| f.count == 2));
    }

    #[test]
    fn top_truncates_and_sorts_descending() {
        let top = count_kmers(b"AAAACCCGGT", 1).top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].kmer, "A");
        assert_eq!(top[0].count, 4);
        assert_eq!(top[1].kmer, "C");
        assert_eq!(top[1].count, 3);
    }

    #[test]
    fn top_of_empty_table_is_empty() {
        assert!(KmerTable::default().top(20).is_empty());
    }

    #[test]
    fn most_frequent_of_empty_table_is_none() {
        assert!(KmerTable::default().most_frequent().is_none());
    }

    #[test]
    fn non_utf8_kmers_stay_distinct() {
        let top = count_kmers(&[0xff, 0xfe, 0xff, 0xfd], 1).top(3);
        let kmers: Vec<_> = top.iter().map(|f| f.kmer.as_str()).collect();
        assert_eq!(kmers, vec![r"\xff", r"\xfd", r"\xfe"]);
        assert_eq!(top[0].count, 2);
    }

    #[test]
    fn parallel_matches_sequential() {
        let seq = Bytes::from_static(b"ACGTTGCAACGTACGTTTGACGATCGATCGA");
        for k in 1..=6 {
            assert_eq!(
                KmerTable::count(&seq, k),
                KmerTable::count_parallel(&seq, k),
                "k = {k}"
            );
        }
    }

    #[test]
    fn kmer_length_rejects_zero() {
        assert_eq!(KmerLength::new(0), Err(KmerLengthError { k: 0, min: 1 }));
        assert_eq!(KmerLength::new(1).unwrap().to_string(), "1");
        assert_eq!(KmerLength::default().get(), DEFAULT_K);
    }
}
