//! Tests for tracing instrumentation.
//!
//! These tests verify that tracing spans and events are emitted correctly
//! when the tracing feature is enabled.

#![cfg(feature = "tracing")]

use orifinder::config::AnalysisConfig;
use orifinder::format::GenomeFormat;
use orifinder::genome::Genome;
use orifinder::kmer::KmerLength;
use orifinder::run::{analyze, run};
use orifinder::scan::{ScanParams, WindowSize};
use orifinder::viewer::NoViewer;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A simple layer that counts events at or above a level.
struct EventCounter {
    level: Level,
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if event.metadata().level() <= &self.level {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_events<F: FnOnce()>(level: Level, f: F) -> usize {
    let event_count = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        level,
        count: Arc::clone(&event_count),
    };

    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);

    event_count.load(Ordering::SeqCst)
}

#[test]
fn genome_loading_emits_tracing_events() {
    let events = count_events(Level::INFO, || {
        let genome = Genome::from_path(fixture_path("small_genome.fa"), GenomeFormat::Auto)
            .expect("should load genome");
        assert_eq!(genome.len(), 227);
    });

    assert!(events > 0, "should emit tracing events");
}

#[test]
fn analyze_emits_tracing_events() {
    let events = count_events(Level::INFO, || {
        let genome = Genome::from_text("ATATATATAT");
        let params = ScanParams::new(
            KmerLength::new(2).expect("valid k"),
            WindowSize::new(4).expect("valid window"),
        );
        let analysis = analyze(&genome, &params, 5);
        assert!(analysis.candidate.is_some());
    });

    assert!(events > 0, "should emit tracing events");
}

#[test]
fn missing_candidate_emits_warning() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let mut config = AnalysisConfig::new(fixture_path("small_genome.txt"));
    config.window = WindowSize::new(1000).expect("valid window");
    config.kmer_plot = dir.path().join("kmers.png");
    config.ori_plot = dir.path().join("ori.png");

    let warnings = count_events(Level::WARN, || {
        let report = run(&config, &NoViewer).expect("run should succeed");
        assert!(report.ori_plot.is_none());
    });

    assert_eq!(warnings, 1, "should warn once about the skipped chart");
}
