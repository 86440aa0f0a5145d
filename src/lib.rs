//! # orifinder
//!
//! Guesses where a genome's origin of replication (ORI) lies by looking for
//! the sliding window whose most frequent k-mer is repeated the most.
//!
//! The crate counts k-mers over the whole genome, scans fixed-size windows
//! for the strongest local repeat, and renders two charts: the genome-wide
//! k-mer distribution and the position of the best candidate window.
//!
//! ## Quick start
//!
//! ```rust
//! use orifinder::builder::OriFinder;
//! use orifinder::genome::Genome;
//!
//! let genome = Genome::from_text("ATGATCAAGATCAAGATCAAGCTTGCA");
//! let analysis = OriFinder::new().k(4)?.window(12)?.analyze(&genome);
//!
//! let candidate = analysis.candidate.unwrap();
//! assert_eq!(candidate.position, 0);
//! assert_eq!(candidate.kmer, "GATC");
//! assert_eq!(candidate.max_count, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The full pipeline, including chart output and opening the charts in an
//! image viewer, is [`run::run`].
//!
//! ## Features
//!
//! - `tracing`: structured logging via the `tracing` crate (default)
//! - `gzip`: read gzip-compressed genome files
//! - `production`: both of the above

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod genome;
pub mod kmer;
pub mod plot;
pub mod run;
pub mod scan;
pub mod viewer;
