//! Builder pattern API for ergonomic ORI analysis.
//!
//! # Example
//!
//! ```rust,no_run
//! use orifinder::builder::OriFinder;
//!
//! let analysis = OriFinder::new()
//!     .k(9)?
//!     .window(500)?
//!     .analyze_path("E_coli.txt")?;
//!
//! if let Some(candidate) = analysis.candidate {
//!     println!("best ORI candidate position: {}", candidate.position);
//! }
//! # Ok::<(), orifinder::error::OriError>(())
//! ```

use std::{fmt::Debug, path::Path};

use crate::{
    config::{DEFAULT_MIN_OCCURRENCES, DEFAULT_TOP_N},
    error::{KmerLengthError, OriError, WindowSizeError},
    format::GenomeFormat,
    genome::Genome,
    kmer::KmerLength,
    run::{analyze, Analysis},
    scan::{ScanParams, ScanStrategy, WindowBound, WindowSize},
};

/// A builder for configuring analyses without rendering.
///
/// Starts from the same defaults as the CLI (k = 12, window = 1000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriFinder {
    params: ScanParams,
    top_n: usize,
    format: GenomeFormat,
}

impl Default for OriFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl OriFinder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            params: ScanParams::new(KmerLength::default(), WindowSize::default())
                .min_occurrences(DEFAULT_MIN_OCCURRENCES),
            top_n: DEFAULT_TOP_N,
            format: GenomeFormat::Auto,
        }
    }

    /// Sets the k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero.
    pub fn k(mut self, k: usize) -> Result<Self, KmerLengthError> {
        self.params.k = KmerLength::new(k)?;
        Ok(self)
    }

    /// Sets the window size.
    ///
    /// # Errors
    ///
    /// Returns [`WindowSizeError`] if `window` is zero.
    pub fn window(mut self, window: usize) -> Result<Self, WindowSizeError> {
        self.params.window = WindowSize::new(window)?;
        Ok(self)
    }

    /// Sets the minimum top-k-mer count a window needs to be a candidate.
    #[must_use]
    pub const fn min_occurrences(mut self, min_occurrences: u64) -> Self {
        self.params.min_occurrences = min_occurrences;
        self
    }

    #[must_use]
    pub const fn strategy(mut self, strategy: ScanStrategy) -> Self {
        self.params.strategy = strategy;
        self
    }

    #[must_use]
    pub const fn bound(mut self, bound: WindowBound) -> Self {
        self.params.bound = bound;
        self
    }

    /// Sets how many of the most frequent k-mers are reported.
    #[must_use]
    pub const fn top(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Sets the genome file format used by [`analyze_path`](Self::analyze_path).
    #[must_use]
    pub const fn genome_format(mut self, format: GenomeFormat) -> Self {
        self.format = format;
        self
    }

    /// Analyses an in-memory genome.
    ///
    /// ```rust
    /// use orifinder::builder::OriFinder;
    /// use orifinder::genome::Genome;
    ///
    /// let analysis = OriFinder::new()
    ///     .k(2)?
    ///     .window(3)?
    ///     .analyze(&Genome::from_text("AAAA"));
    ///
    /// assert_eq!(analysis.candidate.unwrap().max_count, 2);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn analyze(&self, genome: &Genome) -> Analysis {
        analyze(genome, &self.params, self.top_n)
    }

    /// Loads a genome file and analyses it.
    pub fn analyze_path<P>(&self, path: P) -> Result<Analysis, OriError>
    where
        P: AsRef<Path> + Debug,
    {
        let genome = Genome::from_path(path, self.format)?;
        Ok(self.analyze(&genome))
    }

    /// The scan parameters configured so far.
    pub const fn params(&self) -> ScanParams {
        self.params
    }

    pub const fn get_top(&self) -> usize {
        self.top_n
    }
}
