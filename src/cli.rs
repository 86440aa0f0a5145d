//! Command-line interface definition.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::{
    config::{
        AnalysisConfig, DEFAULT_K, DEFAULT_KMER_PLOT, DEFAULT_MIN_OCCURRENCES, DEFAULT_ORI_PLOT,
        DEFAULT_TOP_N, DEFAULT_WINDOW,
    },
    error::OriError,
    format::GenomeFormat,
    kmer::KmerLength,
    scan::{ScanStrategy, WindowBound, WindowSize},
};

/// Guess a genome's origin of replication from windowed k-mer frequencies.
#[derive(Parser, Debug)]
#[command(name = "orifinder")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Path to the genome (raw sequence text or FASTA)
    pub path: PathBuf,

    /// K-mer length
    #[arg(short, long = "kmer-len", default_value_t = DEFAULT_K, value_parser = parse_k)]
    pub k: usize,

    /// Sliding window size in bases
    #[arg(short, long, default_value_t = DEFAULT_WINDOW, value_parser = parse_window)]
    pub window: usize,

    /// Windows whose most frequent k-mer occurs fewer times are never candidates
    #[arg(long, default_value_t = DEFAULT_MIN_OCCURRENCES)]
    pub min_occurrences: u64,

    /// Number of k-mers in the distribution chart and report
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// How window k-mer tables are computed
    #[arg(long, value_enum, default_value = "sliding")]
    pub strategy: ScanStrategy,

    /// Also examine the window ending exactly at the genome end
    #[arg(long)]
    pub include_last_window: bool,

    /// Genome file format
    #[arg(long, value_enum, default_value = "auto")]
    pub genome_format: GenomeFormat,

    /// Output path of the k-mer distribution chart (.png or .svg)
    #[arg(long, default_value = DEFAULT_KMER_PLOT)]
    pub kmer_plot: PathBuf,

    /// Output path of the ORI candidate chart (.png or .svg)
    #[arg(long, default_value = DEFAULT_ORI_PLOT)]
    pub ori_plot: PathBuf,

    /// Do not open the charts in the default image viewer
    #[arg(long)]
    pub no_open: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress informational output (only print the report)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Converts parsed arguments into a run configuration.
    pub fn to_config(&self) -> Result<AnalysisConfig, OriError> {
        Ok(AnalysisConfig {
            input: self.path.clone(),
            genome_format: self.genome_format,
            k: KmerLength::new(self.k)?,
            window: WindowSize::new(self.window)?,
            min_occurrences: self.min_occurrences,
            bound: if self.include_last_window {
                WindowBound::Inclusive
            } else {
                WindowBound::Exclusive
            },
            strategy: self.strategy,
            top_n: self.top,
            kmer_plot: self.kmer_plot.clone(),
            ori_plot: self.ori_plot.clone(),
        })
    }
}

/// Output format for the analysis report.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines ending with the best ORI position
    #[default]
    Text,
    /// Pretty-printed JSON object
    Json,
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    KmerLength::new(k).map(KmerLength::get).map_err(|e| e.to_string())
}

fn parse_window(s: &str) -> Result<usize, String> {
    let window: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    WindowSize::new(window)
        .map(WindowSize::get)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["orifinder", "E_coli.txt"]).unwrap();
        let config = args.to_config().unwrap();
        assert_eq!(config.k.get(), 12);
        assert_eq!(config.window.get(), 1000);
        assert_eq!(config.bound, WindowBound::Exclusive);
        assert_eq!(config.strategy, ScanStrategy::Sliding);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(!args.no_open);
    }

    #[test]
    fn all_options() {
        let args = Args::try_parse_from([
            "orifinder",
            "g.fa",
            "-k",
            "9",
            "-w",
            "500",
            "--min-occurrences",
            "3",
            "--top",
            "10",
            "--strategy",
            "rescan",
            "--include-last-window",
            "--genome-format",
            "fasta",
            "--kmer-plot",
            "k.svg",
            "--ori-plot",
            "o.svg",
            "--no-open",
            "--format",
            "json",
            "--quiet",
        ])
        .unwrap();
        let config = args.to_config().unwrap();
        assert_eq!(config.k.get(), 9);
        assert_eq!(config.window.get(), 500);
        assert_eq!(config.min_occurrences, 3);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.strategy, ScanStrategy::Rescan);
        assert_eq!(config.bound, WindowBound::Inclusive);
        assert_eq!(config.genome_format, GenomeFormat::Fasta);
        assert_eq!(config.kmer_plot, PathBuf::from("k.svg"));
        assert_eq!(config.ori_plot, PathBuf::from("o.svg"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.no_open && args.quiet);
    }

    #[test]
    fn parse_k_rejects_zero_and_garbage() {
        assert!(parse_k("0").is_err());
        assert!(parse_k("abc").is_err());
        assert_eq!(parse_k("12"), Ok(12));
    }

    #[test]
    fn parse_window_rejects_zero() {
        assert!(parse_window("0").is_err());
        assert_eq!(parse_window("1000"), Ok(1000));
    }
}
