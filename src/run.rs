//! The analysis pipeline.
//!
//! [`analyze`] is the pure core: whole-genome k-mer counting and the ORI
//! window scan over an in-memory [`Genome`]. [`run`] wraps it with file
//! loading, chart rendering and best-effort image opening, and returns an
//! [`AnalysisReport`]. Nothing happens until one of them is called.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    cli::OutputFormat,
    config::AnalysisConfig,
    error::OriError,
    genome::Genome,
    kmer::{KmerFrequency, KmerTable},
    plot::{render_kmer_chart, render_ori_chart},
    scan::{find_ori_candidate, OriCandidate, ScanParams},
    viewer::{show, ImageViewer},
};

#[cfg(feature = "tracing")]
use tracing::{info, info_span, warn};

/// Result of analysing one genome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub genome_length: usize,
    pub k: usize,
    pub window_size: usize,
    /// Number of distinct k-mers in the whole genome.
    pub distinct_kmers: usize,
    /// Number of k-mer positions in the whole genome.
    pub total_kmers: u64,
    pub top_kmers: Vec<KmerFrequency>,
    pub candidate: Option<OriCandidate>,
}

/// An [`Analysis`] plus the charts written for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub kmer_plot: PathBuf,
    /// `None` when there was no candidate to draw.
    pub ori_plot: Option<PathBuf>,
}

/// Counts k-mers and scans for the ORI candidate.
///
/// # Example
///
/// ```rust
/// use orifinder::genome::Genome;
/// use orifinder::kmer::KmerLength;
/// use orifinder::run::analyze;
/// use orifinder::scan::{ScanParams, WindowSize};
///
/// let genome = Genome::from_text("ATATAT");
/// let params = ScanParams::new(KmerLength::new(2)?, WindowSize::new(4)?);
/// let analysis = analyze(&genome, &params, 20);
///
/// assert_eq!(analysis.top_kmers[0].kmer, "AT");
/// assert_eq!(analysis.candidate.unwrap().position, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn analyze(genome: &Genome, params: &ScanParams, top_n: usize) -> Analysis {
    let k = params.k.get();

    #[cfg(feature = "tracing")]
    let _span = info_span!("analyze", genome_length = genome.len(), k).entered();

    let table = KmerTable::count_parallel(genome.bytes(), k);

    #[cfg(feature = "tracing")]
    info!(distinct = table.len(), total = table.total(), "Counted genome k-mers");

    let candidate = find_ori_candidate(genome.as_bytes(), params);

    Analysis {
        genome_length: genome.len(),
        k,
        window_size: params.window.get(),
        distinct_kmers: table.len(),
        total_kmers: table.total(),
        top_kmers: table.top(top_n),
        candidate,
    }
}

/// Runs the full pipeline described by `config`.
///
/// Loads the genome, analyses it, renders both charts and hands each to
/// `viewer`. A missing ORI candidate skips the ORI chart; an empty k-mer
/// table fails with [`OriError::NoDataToPlot`].
///
/// # Example
///
/// ```rust,no_run
/// use orifinder::config::AnalysisConfig;
/// use orifinder::run::run;
/// use orifinder::viewer::SystemViewer;
///
/// let config = AnalysisConfig::new("E_coli.txt");
/// let report = run(&config, &SystemViewer)?;
/// println!("{:?}", report.analysis.candidate);
/// # Ok::<(), orifinder::error::OriError>(())
/// ```
pub fn run(config: &AnalysisConfig, viewer: &dyn ImageViewer) -> Result<AnalysisReport, OriError> {
    #[cfg(feature = "tracing")]
    info!(path = ?config.input, k = %config.k, window = %config.window, "Starting ORI analysis");

    let genome = Genome::from_path(&config.input, config.genome_format)?;
    let analysis = analyze(&genome, &config.scan_params(), config.top_n);

    render_kmer_chart(&analysis.top_kmers, &config.kmer_plot)?;
    show(viewer, &config.kmer_plot);

    let ori_plot = match &analysis.candidate {
        Some(candidate) => {
            render_ori_chart(candidate, analysis.genome_length, &config.ori_plot)?;
            show(viewer, &config.ori_plot);
            Some(config.ori_plot.clone())
        }
        None => {
            #[cfg(feature = "tracing")]
            warn!("No ORI candidate found; skipping ORI chart");
            None
        }
    };

    Ok(AnalysisReport {
        analysis,
        kmer_plot: config.kmer_plot.clone(),
        ori_plot,
    })
}

/// Writes `report` to `writer` as text or JSON.
pub fn write_report<W: Write>(
    report: &AnalysisReport,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), OriError> {
    match format {
        OutputFormat::Text => write_text(report, &mut writer)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn write_text<W: Write>(report: &AnalysisReport, writer: &mut W) -> Result<(), OriError> {
    let analysis = &report.analysis;
    writeln!(writer, "genome length: {}", analysis.genome_length)?;
    writeln!(writer, "k-mer length: {}", analysis.k)?;
    writeln!(writer, "window size: {}", analysis.window_size)?;
    writeln!(
        writer,
        "k-mers: {} distinct, {} total",
        analysis.distinct_kmers, analysis.total_kmers
    )?;
    writeln!(writer, "top {} k-mers:", analysis.top_kmers.len())?;
    for KmerFrequency { kmer, count } in &analysis.top_kmers {
        writeln!(writer, "  {kmer}\t{count}")?;
    }
    writeln!(writer, "k-mer chart: {}", display_path(&report.kmer_plot))?;
    match (&analysis.candidate, &report.ori_plot) {
        (Some(candidate), ori_plot) => {
            writeln!(
                writer,
                "top window k-mer: {} ({} occurrences)",
                candidate.kmer, candidate.max_count
            )?;
            if let Some(path) = ori_plot {
                writeln!(writer, "ORI chart: {}", display_path(path))?;
            }
            writeln!(writer, "Best ORI candidate position: {}", candidate.position)?;
        }
        (None, _) => writeln!(writer, "Best ORI candidate position: none")?,
    }
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{kmer::KmerLength, scan::WindowSize};

    fn params(k: usize, window: usize) -> ScanParams {
        ScanParams::new(KmerLength::new(k).unwrap(), WindowSize::new(window).unwrap())
    }

    fn report(candidate: Option<OriCandidate>) -> AnalysisReport {
        let ori_plot = candidate.as_ref().map(|_| PathBuf::from("ori.png"));
        AnalysisReport {
            analysis: Analysis {
                genome_length: 6,
                k: 2,
                window_size: 4,
                distinct_kmers: 2,
                total_kmers: 5,
                top_kmers: vec![
                    KmerFrequency {
                        kmer: "AT".to_string(),
                        count: 3,
                    },
                    KmerFrequency {
                        kmer: "TA".to_string(),
                        count: 2,
                    },
                ],
                candidate,
            },
            kmer_plot: PathBuf::from("kmers.png"),
            ori_plot,
        }
    }

    fn candidate() -> OriCandidate {
        OriCandidate {
            position: 0,
            window_size: 4,
            max_count: 2,
            kmer: "AT".to_string(),
        }
    }

    fn render(report: &AnalysisReport, format: OutputFormat) -> String {
        let mut out = Vec::new();
        write_report(report, format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn analyze_atatat() {
        let analysis = analyze(&Genome::from_text("ATATAT"), &params(2, 4), 20);
        assert_eq!(analysis.genome_length, 6);
        assert_eq!(analysis.distinct_kmers, 2);
        assert_eq!(analysis.total_kmers, 5);
        assert_eq!(analysis.top_kmers, report(None).analysis.top_kmers);
        assert_eq!(analysis.candidate, Some(candidate()));
    }

    #[test]
    fn analyze_empty_genome() {
        let analysis = analyze(&Genome::default(), &params(2, 4), 20);
        assert_eq!(analysis.total_kmers, 0);
        assert!(analysis.top_kmers.is_empty());
        assert!(analysis.candidate.is_none());
    }

    #[test]
    fn analyze_truncates_top_list() {
        let analysis = analyze(&Genome::from_text("ACGTTGCA"), &params(1, 4), 2);
        assert_eq!(analysis.top_kmers.len(), 2);
        assert_eq!(analysis.distinct_kmers, 4);
    }

    #[test]
    fn text_report_with_candidate() {
        let text = render(&report(Some(candidate())), OutputFormat::Text);
        insta::assert_snapshot!(text.trim_end(), @r"
        genome length: 6
        k-mer length: 2
        window size: 4
        k-mers: 2 distinct, 5 total
        top 2 k-mers:
          AT	3
          TA	2
        k-mer chart: kmers.png
        top window k-mer: AT (2 occurrences)
        ORI chart: ori.png
        Best ORI candidate position: 0
        ");
    }

    #[test]
    fn text_report_without_candidate() {
        let text = render(&report(None), OutputFormat::Text);
        assert!(text.ends_with("Best ORI candidate position: none\n"));
        assert!(!text.contains("ORI chart"));
    }

    #[test]
    fn json_report_is_flat() {
        let json = render(&report(Some(candidate())), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["genome_length"], 6);
        assert_eq!(value["top_kmers"][0]["kmer"], "AT");
        assert_eq!(value["candidate"]["position"], 0);
        assert_eq!(value["ori_plot"], "ori.png");
    }

    #[test]
    fn json_report_without_candidate_has_nulls() {
        let json = render(&report(None), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["candidate"].is_null());
        assert!(value["ori_plot"].is_null());
    }
}
