//! Run configuration.

use std::path::PathBuf;

use crate::{
    format::GenomeFormat,
    kmer::KmerLength,
    scan::{ScanParams, ScanStrategy, WindowBound, WindowSize},
};

pub use crate::{kmer::DEFAULT_K, scan::DEFAULT_WINDOW};

pub const DEFAULT_MIN_OCCURRENCES: u64 = 1;
pub const DEFAULT_TOP_N: usize = 20;
pub const DEFAULT_KMER_PLOT: &str = "kmer_distribution.png";
pub const DEFAULT_ORI_PLOT: &str = "ori_candidate.png";

/// Everything a full analysis run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub genome_format: GenomeFormat,
    pub k: KmerLength,
    pub window: WindowSize,
    pub min_occurrences: u64,
    pub bound: WindowBound,
    pub strategy: ScanStrategy,
    /// Number of k-mers in the distribution chart and report.
    pub top_n: usize,
    pub kmer_plot: PathBuf,
    pub ori_plot: PathBuf,
}

impl AnalysisConfig {
    /// A configuration with default parameters for `input`.
    ///
    /// ```
    /// use orifinder::config::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::new("E_coli.txt");
    /// assert_eq!(config.k.get(), 12);
    /// assert_eq!(config.window.get(), 1000);
    /// ```
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            genome_format: GenomeFormat::Auto,
            k: KmerLength::default(),
            window: WindowSize::default(),
            min_occurrences: DEFAULT_MIN_OCCURRENCES,
            bound: WindowBound::Exclusive,
            strategy: ScanStrategy::Sliding,
            top_n: DEFAULT_TOP_N,
            kmer_plot: PathBuf::from(DEFAULT_KMER_PLOT),
            ori_plot: PathBuf::from(DEFAULT_ORI_PLOT),
        }
    }

    /// The scan parameters of this run.
    pub const fn scan_params(&self) -> ScanParams {
        ScanParams::new(self.k, self.window)
            .min_occurrences(self.min_occurrences)
            .bound(self.bound)
            .strategy(self.strategy)
    }
}
