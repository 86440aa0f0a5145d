//! Fuzz target for raw genome input.
//!
//! Arbitrary bytes must load without panicking, come out trimmed, and
//! yield a k-mer table whose counts cover every position.

#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;
use orifinder::format::GenomeFormat;
use orifinder::genome::Genome;
use orifinder::kmer::KmerTable;

fuzz_target!(|data: &[u8]| {
    let _ = GenomeFormat::sniff(data);

    let genome = Genome::from_bytes(Bytes::copy_from_slice(data));
    let seq = genome.as_bytes();
    assert!(seq.first().map_or(true, |b| !b.is_ascii_whitespace()));
    assert!(seq.last().map_or(true, |b| !b.is_ascii_whitespace()));

    for k in 1..=4 {
        let table = KmerTable::count(genome.bytes(), k);
        let positions = (seq.len() + 1).saturating_sub(k);
        assert_eq!(table.total(), positions as u64);
    }
});
