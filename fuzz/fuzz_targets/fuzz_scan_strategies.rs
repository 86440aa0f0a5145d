//! Fuzz target for `find_ori_candidate`.
//!
//! The first two bytes pick k and the window size; the rest is the genome.
//! Both scan strategies must agree and the candidate must stay in bounds.

#![no_main]

use libfuzzer_sys::fuzz_target;
use orifinder::kmer::KmerLength;
use orifinder::scan::{find_ori_candidate, ScanParams, ScanStrategy, WindowBound, WindowSize};

fuzz_target!(|data: &[u8]| {
    let [k, window, seq @ ..] = data else {
        return;
    };
    // Keep the rescan strategy cheap
    if seq.len() > 512 {
        return;
    }

    let (Ok(k), Ok(window)) = (
        KmerLength::new(usize::from(*k % 16)),
        WindowSize::new(usize::from(*window)),
    ) else {
        return;
    };

    for bound in [WindowBound::Exclusive, WindowBound::Inclusive] {
        let params = ScanParams::new(k, window).bound(bound);
        let sliding = find_ori_candidate(seq, &params.strategy(ScanStrategy::Sliding));
        let rescan = find_ori_candidate(seq, &params.strategy(ScanStrategy::Rescan));
        assert_eq!(sliding, rescan, "strategies disagree for {params:?}");

        if let Some(candidate) = sliding {
            assert!(candidate.position < bound.starts(seq.len(), window.get()));
            assert!(candidate.max_count >= 1);
        }
    }
});
